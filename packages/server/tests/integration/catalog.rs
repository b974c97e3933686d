use crate::common::{TestApp, routes};

#[tokio::test]
async fn lists_all_devices() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::DEVICES).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 6);
    assert_eq!(res.body[0]["type"], "Temperature Control");
}

#[tokio::test]
async fn device_by_id() {
    let app = TestApp::spawn().await;
    let res = app.get(&routes::device("2")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["name"], "Smart Light");
    assert_eq!(res.body["brightness"], 80);
}

#[tokio::test]
async fn device_id_with_trailing_text_uses_leading_number() {
    let app = TestApp::spawn().await;
    let res = app.get(&routes::device("1abc")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["name"], "Smart Thermostat");
}

#[tokio::test]
async fn unknown_or_malformed_device_is_not_found() {
    let app = TestApp::spawn().await;
    for id in ["99", "abc"] {
        let res = app.get(&routes::device(id)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "not_found");
        assert_eq!(res.body["message"], "Device not found");
    }
}

#[tokio::test]
async fn devices_filtered_by_type() {
    let app = TestApp::spawn().await;
    let res = app.get(&routes::devices_of_type("security")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 2);

    let res = app.get(&routes::devices_of_type("plumbing")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["message"], "No devices found for this type");
}

#[tokio::test]
async fn devices_filtered_by_status() {
    let app = TestApp::spawn().await;
    let res = app.get(&routes::devices_with_status("ONLINE")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 6);

    let res = app.get(&routes::devices_with_status("offline")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, serde_json::json!([]));
}

#[tokio::test]
async fn slides_and_services() {
    let app = TestApp::spawn().await;
    let slides = app.get(routes::SLIDES).await;
    assert_eq!(slides.status, 200);
    assert_eq!(slides.body.as_array().unwrap().len(), 3);

    let services = app.get(routes::SERVICES).await;
    assert_eq!(services.status, 200);
    assert_eq!(services.body.as_array().unwrap().len(), 3);
}
