use axum_test::TestServer;
use httpmock::prelude::*;
use portfolio_web::config::Config;
use portfolio_web::web::{AppState, router};
use serde_json::{Value, json};

#[macro_export]
macro_rules! assert_contains_all {
    ($html:expr, $expected_items:expr) => {
        for expected in $expected_items {
            assert!(
                $html.contains(expected),
                "Page should contain '{}', but it was not found in:\n{}",
                expected,
                $html
            );
        }
    };
}

#[macro_export]
macro_rules! assert_not_contains_any {
    ($html:expr, $unexpected_items:expr) => {
        for unexpected in $unexpected_items {
            assert!(
                !$html.contains(unexpected),
                "Page should not contain '{}', but it was found in:\n{}",
                unexpected,
                $html
            );
        }
    };
}

pub fn test_config(backend: &MockServer) -> Config {
    Config {
        api_url: backend.base_url(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

/// A site wired to `backend` as its REST API.
pub fn test_site(backend: &MockServer) -> TestServer {
    let state = AppState::new(test_config(backend)).expect("app state");
    TestServer::new(router(state)).expect("test server")
}

#[allow(dead_code)]
pub fn project_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": format!("{title} description"),
        "techStack": "Rust, Axum",
        "image": format!("/uploads/{id}.png"),
        "liveLink": format!("https://{id}.example.com"),
        "githubLink": format!("https://github.com/example/{id}"),
    })
}

#[allow(dead_code)]
pub async fn mock_projects(backend: &MockServer, projects: Vec<Value>) -> httpmock::Mock<'_> {
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/projects");
            then.status(200)
                .json_body(json!({ "success": true, "projects": projects }));
        })
        .await
}
