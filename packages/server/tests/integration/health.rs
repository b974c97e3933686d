use crate::common::{Backend, TestApp, routes};

#[tokio::test]
async fn reports_file_backend_without_database() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::HEALTH).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["database"], "disconnected");
    assert_eq!(res.body["backend"], "file");
}

#[tokio::test]
async fn reports_database_backend_when_connected() {
    let app = TestApp::spawn_with(Backend::Sqlite).await;
    let res = app.get(routes::HEALTH).await;
    assert_eq!(res.body["database"], "connected");
    assert_eq!(res.body["backend"], "database");
}

#[tokio::test]
async fn openapi_document_lists_case_study_paths() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::OPENAPI).await;
    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/api/casestudies"]["get"].is_object());
    assert!(res.body["paths"]["/api/casestudies/{id}"]["put"].is_object());
    assert!(res.body["paths"]["/api/health"]["get"].is_object());
}

#[tokio::test]
async fn static_site_is_served_from_public_dir() {
    let app = TestApp::spawn().await;
    let (status, bytes) = app.get_bytes("/").await;
    assert_eq!(status, 200);
    assert!(String::from_utf8_lossy(&bytes).contains("Smart Home Showcase"));
}
