mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn private_routes_require_both_cookies() -> Result<()> {
    let app = TestApp::new().await;
    let cookies = app.sign_up("user@example.org").await?;

    let anonymous = app
        .request(Method::GET, "/api/v1/private/whoami", None, None)
        .await?;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let user_cookie_only: String = cookies
        .split("; ")
        .filter(|pair| pair.starts_with("MarketPlace="))
        .collect();
    let without_session = app
        .request(
            Method::GET,
            "/api/v1/private/whoami",
            Some(&user_cookie_only),
            None,
        )
        .await?;
    assert_eq!(without_session.status, StatusCode::UNAUTHORIZED);

    let forged = app
        .request(
            Method::GET,
            "/api/v1/private/whoami",
            Some("MarketPlace=1; session_id=forged"),
            None,
        )
        .await?;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let whoami = app
        .request(Method::GET, "/api/v1/private/whoami", Some(&cookies), None)
        .await?;
    assert_eq!(whoami.status, StatusCode::OK);
    assert_eq!(whoami.body["data"]["email"], "user@example.org");

    Ok(())
}

#[tokio::test]
async fn session_of_another_user_is_rejected() -> Result<()> {
    let app = TestApp::new().await;
    let alice = app.sign_up("alice@example.org").await?;
    let bob = app.sign_up("bob@example.org").await?;

    let pick = |cookies: &str, name: &str| -> String {
        cookies
            .split("; ")
            .filter(|pair| pair.starts_with(name))
            .collect()
    };
    let mixed = format!(
        "{}; {}",
        pick(&alice, "MarketPlace="),
        pick(&bob, "session_id=")
    );

    let response = app
        .request(Method::GET, "/api/v1/private/whoami", Some(&mixed), None)
        .await?;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn sign_out_ends_the_session() -> Result<()> {
    let app = TestApp::new().await;
    let cookies = app.sign_up("leaving@example.org").await?;
    assert_eq!(app.sessions.len().await, 1);

    let signed_out = app
        .request(Method::GET, "/api/v1/private/signout", Some(&cookies), None)
        .await?;
    assert_eq!(signed_out.status, StatusCode::OK);
    assert_eq!(signed_out.headers.get_all(header::SET_COOKIE).iter().count(), 2);
    assert!(app.sessions.is_empty().await);

    let again = app
        .request(Method::GET, "/api/v1/private/whoami", Some(&cookies), None)
        .await?;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn sign_in_rejects_bad_credentials() -> Result<()> {
    let app = TestApp::new().await;
    app.register("user@example.org", "password").await?;

    for body in [
        json!({ "email": "user@example.org", "password": "wrong-password" }),
        json!({ "email": "nobody@example.org", "password": "password" }),
    ] {
        let response = app
            .request(Method::POST, "/api/v1/signin", None, Some(body))
            .await?;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], "incorrect email or password");
        assert!(response.headers.get(header::SET_COOKIE).is_none());
    }

    assert!(app.sessions.is_empty().await);

    Ok(())
}

#[tokio::test]
async fn register_validates_and_rejects_duplicates() -> Result<()> {
    let app = TestApp::new().await;

    let invalid = app.register("not-an-email", "pw").await?;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(invalid.body["errors"].get("email").is_some());

    let first = app.register("user@example.org", "password").await?;
    assert_eq!(first.status, StatusCode::CREATED);

    let duplicate = app.register("user@example.org", "password").await?;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let malformed = app
        .request(Method::POST, "/api/v1/register", None, Some(json!([1, 2])))
        .await?;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn health_metrics_and_request_id() -> Result<()> {
    let app = TestApp::new().await;
    app.sign_up("metrics@example.org").await?;

    let health = app.request(Method::GET, "/api/v1/health", None, None).await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "success");
    assert!(health.headers.get("x-request-id").is_some());

    let metrics = app.request(Method::GET, "/metrics", None, None).await?;
    assert_eq!(metrics.status, StatusCode::OK);
    let text = metrics.body.as_str().unwrap_or_default();
    assert!(text.contains("auth_service_request_counter"));
    assert!(text.contains("operation=\"SignIn\""));

    let docs = app
        .request(Method::GET, "/api-docs/openapi.json", None, None)
        .await?;
    assert_eq!(docs.status, StatusCode::OK);
    assert!(docs.body["paths"].get("/api/v1/private/product/product/{id}").is_some());

    Ok(())
}

#[tokio::test]
async fn cors_echoes_listed_origin_and_skips_wildcard() -> Result<()> {
    let app = TestApp::with_origins(&["*", "http://localhost:3000"]).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())?;
    let response = app.send(request).await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("http://localhost:3000"))
    );
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some(&HeaderValue::from_static("true"))
    );

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/health")
        .header(header::ORIGIN, "https://elsewhere.example.org")
        .body(Body::empty())?;
    let response = app.send(request).await?;
    assert!(response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

    Ok(())
}
