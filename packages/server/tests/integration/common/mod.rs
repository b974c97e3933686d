use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tempfile::TempDir;

use server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageConfig};
use server::connection::{ConnectionProbe, ConnectionStatus};
use server::state::AppState;

pub mod routes {
    pub const CASE_STUDIES: &str = "/api/casestudies";
    pub const HEALTH: &str = "/api/health";
    pub const DEVICES: &str = "/api/devices";
    pub const SLIDES: &str = "/api/slides";
    pub const SERVICES: &str = "/api/services";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn case_study(id: &str) -> String {
        format!("/api/casestudies/{id}")
    }

    pub fn device(id: &str) -> String {
        format!("/api/devices/{id}")
    }

    pub fn devices_of_type(device_type: &str) -> String {
        format!("/api/devices/type/{device_type}")
    }

    pub fn devices_with_status(status: &str) -> String {
        format!("/api/status/{status}")
    }
}

/// Which case study backend the spawned server should see.
pub enum Backend {
    File,
    Sqlite,
}

/// A running test server with its own data directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub config: AppConfig,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

/// Text fields plus an optional image for a case study form.
pub struct CaseStudyForm<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub industry: &'a str,
    pub image: Option<(&'a str, Vec<u8>)>,
}

impl<'a> CaseStudyForm<'a> {
    pub fn new(title: &'a str, description: &'a str, industry: &'a str) -> Self {
        Self {
            title,
            description,
            industry,
            image: None,
        }
    }

    pub fn with_image(mut self, file_name: &'a str, data: Vec<u8>) -> Self {
        self.image = Some((file_name, data));
        self
    }

    fn into_multipart(self) -> Form {
        let mut form = Form::new()
            .text("title", self.title.to_string())
            .text("description", self.description.to_string())
            .text("industry", self.industry.to_string());
        if let Some((file_name, data)) = self.image {
            let part = Part::bytes(data).file_name(file_name.to_string());
            form = form.part("image", part);
        }
        form
    }
}

fn test_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
            public_dir: dir.path().join("public"),
        },
        database: DatabaseConfig {
            url: None,
            connect_timeout_secs: 5,
            health_check_interval_secs: 10,
            reconnect_interval_secs: 5,
        },
        storage: StorageConfig {
            data_file: dir.path().join("data/casestudies.json"),
            uploads_dir: dir.path().join("uploads"),
            max_upload_size: 64 * 1024,
        },
    }
}

impl TestApp {
    /// Spawn a server whose database is unavailable, so case studies live in
    /// the JSON file store.
    pub async fn spawn() -> Self {
        Self::spawn_with(Backend::File).await
    }

    pub async fn spawn_with(backend: Backend) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = test_config(&dir);

        let connection: Arc<dyn ConnectionProbe> = match backend {
            Backend::File => Arc::new(ConnectionStatus::disconnected()),
            Backend::Sqlite => {
                let db_path = dir.path().join("test.db");
                let url = format!("sqlite://{}?mode=rwc", db_path.display());
                let db = server::database::init_db(&url, std::time::Duration::from_secs(5))
                    .await
                    .expect("Failed to initialize sqlite database");
                config.database.url = Some(url);
                Arc::new(ConnectionStatus::connected(db))
            }
        };

        std::fs::create_dir_all(&config.server.public_dir).expect("Failed to create public dir");
        std::fs::write(
            config.server.public_dir.join("index.html"),
            "<h1>Smart Home Showcase</h1>",
        )
        .expect("Failed to write index.html");

        let state = AppState::init(config.clone(), connection)
            .await
            .expect("Failed to build app state");
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            config,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.config.storage.uploads_dir.clone()
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_bytes(&self, path: &str) -> (u16, Vec<u8>) {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");
        let status = res.status().as_u16();
        let bytes = res.bytes().await.unwrap_or_default().to_vec();
        (status, bytes)
    }

    pub async fn post_form(&self, path: &str, form: CaseStudyForm<'_>) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form.into_multipart())
            .send()
            .await
            .expect("Failed to send multipart POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put_form(&self, path: &str, form: CaseStudyForm<'_>) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .multipart(form.into_multipart())
            .send()
            .await
            .expect("Failed to send multipart PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create a case study via the API and return its `id`.
    pub async fn create_case_study(&self, title: &str) -> String {
        let res = self
            .post_form(
                routes::CASE_STUDIES,
                CaseStudyForm::new(title, "Deployed 500 sensors across 3 sites", "Manufacturing"),
            )
            .await;
        assert_eq!(res.status, 201, "create_case_study failed: {}", res.text);
        res.id()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> String {
        self.body["id"]
            .as_str()
            .expect("response body should contain 'id'")
            .to_string()
    }
}

/// Smallest valid PNG: a 1x1 transparent pixel.
pub const PNG_PIXEL: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];
