#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use roster_server::config::{database::sync_schema, AppConfig};
use roster_server::domain::student::{dto::CreateStudentRequest, entity::student, service::StudentService};
use roster_server::{app, AppState};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration: 3600,
        db_schema_update: true,
        log_dir: std::env::temp_dir().to_string_lossy().into_owned(),
    }
}

/// 인메모리 SQLite로 전체 라우터를 구성합니다.
pub async fn setup() -> TestApp {
    let config = test_config();
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to create in-memory database");
    sync_schema(&db).await.expect("Failed to create schema");

    let router = app(AppState {
        db: db.clone(),
        config,
    });

    TestApp { router, db }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_response_body(response.into_body()).await)
    }

    /// 사용자를 등록하고 발급된 토큰을 반환합니다.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .send(create_json_request(
                Method::POST,
                "/api/register",
                None,
                json!({ "name": "Admin", "email": email, "password": TEST_PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

        body["result"]["token"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(create_json_request(
            Method::POST,
            "/api/login",
            None,
            json!({ "email": email, "password": password }),
        ))
        .await
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(create_request(Method::GET, uri, Some(token))).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(create_request(Method::DELETE, uri, Some(token))).await
    }

    pub async fn post_json(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(create_json_request(Method::POST, uri, Some(token), body))
            .await
    }

    pub async fn put_json(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(create_json_request(Method::PUT, uri, Some(token), body))
            .await
    }

    /// 학생 생성 헬퍼 (API를 거치지 않고 서비스로 직접 생성)
    pub async fn create_student(&self, name: &str, ra: &str) -> student::Model {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        StudentService::create_student(
            &self.db,
            CreateStudentRequest {
                name: name.to_string(),
                email,
                cpf: format!("{:0>11}", ra),
                ra: ra.to_string(),
            },
        )
        .await
        .expect("Failed to create student")
    }

    /// "John Doe" 1명을 포함한 학생 10명 생성
    pub async fn seed_ten_students(&self) -> Vec<student::Model> {
        let mut students = vec![self.create_student("John Doe", "1").await];
        for i in 2..=10 {
            students.push(self.create_student(&format!("Student {i}"), &i.to_string()).await);
        }
        students
    }

    pub async fn create_team(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self
            .post_json("/api/teams", token, json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create team failed: {body}");

        body["result"]["id"].as_i64().unwrap()
    }
}

pub fn create_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn create_json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// 응답 본문을 JSON으로 파싱합니다. 본문이 없으면 `Value::Null`.
pub async fn parse_response_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// 목록 응답의 이름 목록
pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}
