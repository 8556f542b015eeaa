mod common;

use axum::http::StatusCode;
use common::{mock_projects, project_json, test_site};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_root_redirects_home() {
    let backend = MockServer::start_async().await;
    let site = test_site(&backend);

    let response = site.get("/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/home");
}

#[tokio::test]
async fn test_home_renders_layout() {
    let backend = MockServer::start_async().await;
    let site = test_site(&backend);

    let response = site.get("/home").await;

    response.assert_status_ok();
    let html = response.text();
    assert_contains_all!(
        html,
        [
            "Hi, welcome to my portfolio",
            r#"<a href="/home" class="active">Home</a>"#,
            r#"href="/assets/style.css""#,
        ]
    );
}

#[tokio::test]
async fn test_unknown_route_renders_not_found() {
    let backend = MockServer::start_async().await;
    let site = test_site(&backend);

    let response = site.get("/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_contains_all!(
        response.text(),
        ["404 - Page Not Found", "/does-not-exist"]
    );
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let backend = MockServer::start_async().await;
    let site = test_site(&backend);

    let response = site.get("/assets/style.css").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/css");

    let missing = site.get("/assets/missing.css").await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_projects_page_lists_projects() {
    let backend = MockServer::start_async().await;
    let projects = mock_projects(
        &backend,
        vec![
            project_json("p1", "Folio"),
            json!({"_id": "p2", "title": "<b>Bold</b>", "image": "https://cdn.example.com/b.png"}),
        ],
    )
    .await;
    let site = test_site(&backend);

    let response = site.get("/projects").await;

    response.assert_status_ok();
    projects.assert_async().await;
    let html = response.text();
    let local_image = format!(r#"src="{}/uploads/p1.png""#, backend.base_url());
    assert_contains_all!(
        html,
        [
            "Folio",
            "Folio description",
            "Rust, Axum",
            local_image.as_str(),
            r#"src="https://cdn.example.com/b.png""#,
            "https://p1.example.com",
            "Live Demo",
            "GitHub",
            "&lt;b&gt;Bold&lt;/b&gt;",
        ]
    );
    assert_not_contains_any!(html, ["No projects available", "<b>Bold</b>"]);
}

#[tokio::test]
async fn test_projects_page_empty_and_failing_backend() {
    let backend = MockServer::start_async().await;
    let site = test_site(&backend);

    let mut failing = backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/projects");
            then.status(500);
        })
        .await;
    let response = site.get("/projects").await;
    response.assert_status_ok();
    assert_contains_all!(response.text(), ["No projects available"]);
    failing.delete_async().await;

    mock_projects(&backend, vec![]).await;
    let response = site.get("/projects").await;
    assert_contains_all!(response.text(), ["No projects available"]);
}

#[tokio::test]
async fn test_about_page_shows_first_entry() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/about");
            then.status(200).json_body(json!([
                {"_id": "a1", "name": "Ann Dev", "bio": "Builds things", "profilePic": "/uploads/ann.jpg", "resume": "/uploads/cv.pdf"},
                {"_id": "a2", "name": "Old Entry", "bio": "Outdated"}
            ]));
        })
        .await;
    let site = test_site(&backend);

    let html = site.get("/about").await.text();
    let resume = format!("{}/uploads/cv.pdf", backend.base_url());

    assert_contains_all!(
        html,
        [
            "Ann Dev",
            "Builds things",
            "Download Resume",
            resume.as_str(),
        ]
    );
    assert_not_contains_any!(html, ["Old Entry"]);
}

#[tokio::test]
async fn test_about_entry_without_files_is_shown() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/about");
            then.status(200).json_body(json!({"about": [
                {"_id": "a1", "name": "Ann Dev", "bio": "Builds things", "profilePic": null, "resume": null}
            ]}));
        })
        .await;
    mock_projects(
        &backend,
        vec![json!({"_id": "p1", "title": "Null Links", "liveLink": null, "githubLink": null})],
    )
    .await;
    let site = test_site(&backend);

    let html = site.get("/about").await.text();
    assert_contains_all!(html, ["Ann Dev", "Builds things"]);
    assert_not_contains_any!(html, ["turning ideas into working software", "Download Resume"]);

    let html = site.get("/projects").await.text();
    assert_contains_all!(html, ["Null Links"]);
    assert_not_contains_any!(html, ["No projects available", "Live Demo"]);
}

#[tokio::test]
async fn test_about_page_falls_back_without_backend_data() {
    let backend = MockServer::start_async().await;
    let site = test_site(&backend);

    let response = site.get("/about").await;

    response.assert_status_ok();
    assert_contains_all!(response.text(), ["About Me", "turning ideas into working software"]);
}

#[tokio::test]
async fn test_skills_page_groups_by_category() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/skills");
            then.status(200).json_body(json!({
                "success": true,
                "skills": [
                    {"_id": "s1", "name": "Rust", "icon": "FaRust", "category": "Backend", "level": "Expert"},
                    {"_id": "s2", "name": "Svelte", "icon": "SiSvelte", "category": "Frontend", "level": ""},
                    {"_id": "s3", "name": "Git", "icon": "FaGit", "category": ""}
                ]
            }));
        })
        .await;
    let site = test_site(&backend);

    let html = site.get("/skills").await.text();

    assert_contains_all!(
        html,
        ["<h3>Backend</h3>", "<h3>Frontend</h3>", "<h3>Other</h3>", "Rust", "Expert", "FaGit"]
    );
    let backend_at = html.find("<h3>Backend</h3>").unwrap();
    let frontend_at = html.find("<h3>Frontend</h3>").unwrap();
    assert!(backend_at < frontend_at);
}

#[tokio::test]
async fn test_contact_success_clears_form() {
    let backend = MockServer::start_async().await;
    let contact = backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact").json_body(json!({
                "name": "Ann",
                "email": "ann@example.com",
                "message": "Hello there"
            }));
            then.status(200).json_body(json!({"success": true}));
        })
        .await;
    let site = test_site(&backend);

    let response = site
        .post("/contact")
        .form(&[
            ("name", "Ann"),
            ("email", "ann@example.com"),
            ("message", "Hello there"),
        ])
        .await;

    response.assert_status_ok();
    contact.assert_async().await;
    let html = response.text();
    assert_contains_all!(html, ["Message sent successfully!", r#"name="name" placeholder="Your Name" value="""#]);
    assert_not_contains_any!(html, ["Hello there", "Failed to send message"]);
}

#[tokio::test]
async fn test_contact_rejected_keeps_input() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(200).json_body(json!({"success": false}));
        })
        .await;
    let site = test_site(&backend);

    let response = site
        .post("/contact")
        .form(&[
            ("name", "Ann"),
            ("email", "ann@example.com"),
            ("message", "Hello there"),
        ])
        .await;

    let html = response.text();
    assert_contains_all!(
        html,
        [
            "Failed to send message. Please try again.",
            r#"value="Ann""#,
            ">Hello there</textarea>",
        ]
    );
    assert_not_contains_any!(html, ["Message sent successfully!"]);
}

#[tokio::test]
async fn test_contact_validation_skips_backend() {
    let backend = MockServer::start_async().await;
    let contact = backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(200).json_body(json!({"success": true}));
        })
        .await;
    let site = test_site(&backend);

    let response = site
        .post("/contact")
        .form(&[("name", "Ann"), ("email", "not-an-email"), ("message", "Hi")])
        .await;

    assert_contains_all!(response.text(), ["Please enter a valid email address"]);
    assert_eq!(contact.hits_async().await, 0);
}

#[tokio::test]
async fn test_login_success_sets_cookie_and_redirects() {
    let backend = MockServer::start_async().await;
    let login = backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/users/login")
                .json_body(json!({"email": "admin@example.com", "password": "hunter2"}));
            then.status(200)
                .json_body(json!({"success": true, "token": "abc123"}));
        })
        .await;
    let site = test_site(&backend);

    let response = site
        .post("/login")
        .form(&[("email", "admin@example.com"), ("password", "hunter2")])
        .await;

    login.assert_async().await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin?notice=logged_in");
    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("token=abc123;"));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_with_unsafe_token_skips_cookie() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/users/login");
            then.status(200)
                .json_body(json!({"success": true, "token": "abc; Domain=evil.example"}));
        })
        .await;
    let site = test_site(&backend);

    let response = site
        .post("/login")
        .form(&[("email", "admin@example.com"), ("password", "hunter2")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin?notice=logged_in");
    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn test_login_failure_shows_backend_message() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/users/login");
            then.status(401)
                .json_body(json!({"success": false, "message": "Invalid credentials"}));
        })
        .await;
    let site = test_site(&backend);

    let response = site
        .post("/login")
        .form(&[("email", "admin@example.com"), ("password", "wrong-pass")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert_contains_all!(html, ["Invalid credentials", r#"value="admin@example.com""#]);
    assert_not_contains_any!(html, ["wrong-pass"]);
}

#[tokio::test]
async fn test_login_failure_without_message_uses_default() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/users/login");
            then.status(500).body("oops");
        })
        .await;
    let site = test_site(&backend);

    let response = site
        .post("/login")
        .form(&[("email", "admin@example.com"), ("password", "pw")])
        .await;

    assert_contains_all!(response.text(), ["Login Failed! Check your credentials."]);
}
