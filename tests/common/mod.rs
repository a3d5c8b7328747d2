#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
};
use car_rental_backend::config::AppConfig;
use car_rental_backend::infrastructure::{database, storage};
use car_rental_backend::services::storage::LocalMediaStore;
use car_rental_backend::{AppState, create_app};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "---------------------------carrental0123456789";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _media: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Body is not JSON ({}): {:?}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                        name, value
                    )
                    .as_bytes(),
                );
            }
            Part::File(name, file_name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

impl TestApp {
    pub async fn new() -> Self {
        let media = tempfile::tempdir().unwrap();
        let config = AppConfig {
            media_root: media.path().to_path_buf(),
            ..AppConfig::development()
        };

        let db = database::setup_database(&config).await.unwrap();
        let store = storage::setup_storage(&config).await.unwrap();
        let state = AppState::new(db, store, config);

        Self {
            app: create_app(state.clone()),
            state,
            _media: media,
        }
    }

    pub fn media_path(&self, relative: &str) -> PathBuf {
        LocalMediaStore::new(self.state.config.media_root.clone()).absolute_path(relative)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn login(&self) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/login",
                None,
                json!({"userName": "Paras", "password": "123"}),
            ))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["data"]["token"]
            .as_str()
            .expect("login returns a token")
            .to_string()
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, token: &str, parts: &[Part<'_>]) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Authorization", format!("Bearer {}", token))
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(parts)))
                .unwrap(),
        )
        .await
    }

    /// Create a category without image and return its id
    pub async fn create_category(&self, token: &str, name: &str) -> i64 {
        let response = self
            .post_form(
                "/api/categories",
                token,
                &[
                    Part::Text("name", name),
                    Part::Text("description", "test category"),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()["data"]["id"].as_i64().unwrap()
    }

    /// Create a vehicle without images and return its id
    pub async fn create_vehicle(&self, token: &str, name: &str, category_id: i64) -> i64 {
        let category_id = category_id.to_string();
        let response = self
            .post_form(
                "/api/vehicles",
                token,
                &[
                    Part::Text("name", name),
                    Part::Text("categoryId", &category_id),
                    Part::Text("pricePerDay", "150"),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()["data"]["id"].as_i64().unwrap()
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
