use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use contact_relay::config::Config;
use contact_relay::email::{ContactMessage, DeliveryError, Mailer};
use contact_relay::rate_limit::{CooldownStore, InMemoryCooldownStore};

/// Mailer double that records every message it is handed.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<ContactMessage>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<ContactMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            return Err(DeliveryError::from("535 authentication failed"));
        }
        Ok(())
    }
}

/// A running test server instance with its mail double and cooldown store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub mailer: Arc<RecordingMailer>,
    pub cooldowns: Arc<InMemoryCooldownStore>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit form-urlencoded data to the contact handler, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/contact-handler"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a valid contact form.
    pub async fn submit_valid(&self) -> (Value, StatusCode) {
        self.submit_form(&[
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("message", "Hello there"),
            ("_honey", ""),
        ])
        .await
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 65_536,
        trusted_proxies: vec![],
        cooldown_secs: 60,
        static_dir: None,
        site_url: Some("https://example.com".to_string()),
        log_level: "warn".to_string(),
        smtp: None,
    }
}

/// Spawn a test app whose deliveries succeed.
pub async fn spawn_app() -> TestApp {
    spawn_with(Some(Arc::new(RecordingMailer::default()))).await
}

/// Spawn a test app whose deliveries always fail.
pub async fn spawn_failing_app() -> TestApp {
    spawn_with(Some(Arc::new(RecordingMailer::failing()))).await
}

/// Spawn a test app with no mail transport configured.
pub async fn spawn_unconfigured_app() -> TestApp {
    spawn_with(None).await
}

async fn spawn_with(mailer: Option<Arc<RecordingMailer>>) -> TestApp {
    let cooldowns = Arc::new(InMemoryCooldownStore::new());
    let recorder = mailer.clone().unwrap_or_default();

    let app = contact_relay::build_app(
        test_config(),
        mailer.map(|m| m as Arc<dyn Mailer>),
        cooldowns.clone() as Arc<dyn CooldownStore>,
    );

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        mailer: recorder,
        cooldowns,
    }
}
