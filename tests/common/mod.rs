#![allow(dead_code)]

use chrono::{Datelike, Local};
use ephemerides::{app, config::Config, AppState};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use wiremock::MockServer;

pub struct TestApp {
    pub addr: SocketAddr,
    pub http: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.http.post(self.url(path)).json(body).send().await.unwrap()
    }
}

/// Feed template pointing at the mock server; the language becomes the first
/// path segment so mocks can assert which feed was requested.
pub fn feed_template(mock: &MockServer) -> String {
    format!("{}/{{lang}}/feed/onthisday/{{type}}/{{month}}/{{day}}", mock.uri())
}

pub fn today_feed_path(lang: &str) -> String {
    let now = Local::now();
    format!("/{}/feed/onthisday/events/{:02}/{:02}", lang, now.month(), now.day())
}

pub fn test_config(mock: &MockServer, overrides: &[(&str, &str)]) -> Config {
    let root = env!("CARGO_MANIFEST_DIR");
    let mut vars: HashMap<String, String> = HashMap::from([
        ("DEBUG".to_string(), "false".to_string()),
        ("WIKIPEDIA_API_BASE".to_string(), feed_template(mock)),
        ("WIKIPEDIA_TIMEOUT_SECONDS".to_string(), "2".to_string()),
        ("TRANSLATIONS_DIR".to_string(), format!("{}/translations", root)),
        ("TEMPLATES_DIR".to_string(), format!("{}/templates", root)),
        ("STATIC_DIR".to_string(), format!("{}/static", root)),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub async fn spawn_app(mock: &MockServer) -> TestApp {
    spawn_app_with(test_config(mock, &[])).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let state = AppState::new(config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state).into_make_service())
            .await
            .unwrap();
    });

    TestApp {
        addr,
        http: reqwest::Client::new(),
    }
}
