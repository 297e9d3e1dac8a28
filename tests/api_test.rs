use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chffr_backend::{
    config::Config,
    database::{pool::create_memory_pool, schema::ensure_schema},
    models::{
        device::{CreateDevice, Device},
        user::{CreateUser, User},
    },
    routes, AppState,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        google_client_id: "google-test-client".into(),
        github_client_id: "github-test-client".into(),
        ..Config::default()
    }
}

async fn setup_app_with(config: Config) -> (Router, AppState) {
    let pool = create_memory_pool().await.expect("pool");
    ensure_schema(&pool).await.expect("schema");

    let state = AppState::new(pool, &config);
    (routes::router(state.clone()), state)
}

async fn setup_app() -> (Router, AppState) {
    setup_app_with(test_config()).await
}

async fn seed_user(state: &AppState, email: &str, provider_id: &str) -> User {
    state
        .user_service
        .create(CreateUser {
            email: email.into(),
            provider: "github".into(),
            provider_id: provider_id.into(),
            name: Some("Test User".into()),
        })
        .await
        .expect("seed user")
}

async fn seed_device(state: &AppState, dongle_id: &str, user_id: i64) -> Device {
    state
        .device_service
        .create(CreateDevice {
            dongle_id: dongle_id.into(),
            user_id,
            name: None,
        })
        .await
        .expect("seed device")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::HOST, "localhost:3000")
        .body(Body::empty())
        .unwrap()
}

fn get_as(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn protected_routes_require_bearer_header() {
    let (app, _) = setup_app().await;

    for uri in ["/v1/me", "/v1/me/devices"] {
        let resp = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(resp).await, "Unauthorized");

        let resp = app.clone().oneshot(get_as(uri, "Token 1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(resp).await, "Unauthorized");
    }
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (app, _) = setup_app().await;

    for uri in ["/v1/me", "/v1/me/devices"] {
        let resp = app.clone().oneshot(get_as(uri, "Bearer 999")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(resp).await, "User not found");
    }
}

#[tokio::test]
async fn me_returns_caller_record() {
    let (app, state) = setup_app().await;
    let user = seed_user(&state, "alice@example.com", "gh-alice").await;
    seed_user(&state, "bob@example.com", "gh-bob").await;

    let resp = app
        .oneshot(get_as("/v1/me", &format!("Bearer {}", user.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let returned: User = serde_json::from_value(body_json(resp).await).unwrap();
    assert_eq!(returned, user);
}

#[tokio::test]
async fn my_devices_lists_only_owned_devices() {
    let (app, state) = setup_app().await;
    let alice = seed_user(&state, "alice@example.com", "gh-alice").await;
    let bob = seed_user(&state, "bob@example.com", "gh-bob").await;

    let first = seed_device(&state, "dongle-a1", alice.id).await;
    seed_device(&state, "dongle-b1", bob.id).await;
    let second = seed_device(&state, "dongle-a2", alice.id).await;

    let resp = app
        .clone()
        .oneshot(get_as("/v1/me/devices", &format!("Bearer {}", alice.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let devices: Vec<Device> = serde_json::from_value(body_json(resp).await).unwrap();
    assert_eq!(devices, vec![first, second]);

    let carol = seed_user(&state, "carol@example.com", "gh-carol").await;
    let resp = app
        .oneshot(get_as("/v1/me/devices", &format!("Bearer {}", carol.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}

#[tokio::test]
async fn device_lookup_by_dongle_id() {
    let (app, state) = setup_app().await;
    let user = seed_user(&state, "alice@example.com", "gh-alice").await;
    let device = seed_device(&state, "a2a0ccea32023010", user.id).await;

    let resp = app
        .clone()
        .oneshot(get("/v1.1/devices/a2a0ccea32023010"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let returned: Device = serde_json::from_value(body_json(resp).await).unwrap();
    assert_eq!(returned, device);

    let resp = app
        .oneshot(get("/v1.1/devices/non-existent-dongle"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "Device not found");
}

#[tokio::test]
async fn login_redirects_supported_providers() {
    let (app, _) = setup_app().await;

    let resp = app.clone().oneshot(get("/auth/login/google")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert!(location.starts_with("https://accounts.google.com/"));
    assert!(location.contains("client_id=google-test-client"));
    assert!(location.contains(
        "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback%2Fgoogle"
    ));

    let resp = app.oneshot(get("/auth/login/github")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://github.com/login/oauth/authorize"));
    assert!(location.contains("client_id=github-test-client"));
}

fn get_via_proxy(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::HOST, "10.0.0.5:3000")
        .header("x-forwarded-proto", "https")
        .header("x-forwarded-host", "evil.example.com")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn login_ignores_forwarded_headers_unless_trusted() {
    let (app, _) = setup_app().await;
    let resp = app.oneshot(get_via_proxy("/auth/login/google")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.contains("redirect_uri=http%3A%2F%2F10.0.0.5%3A3000%2F"));
    assert!(!location.contains("evil.example.com"));

    let (app, _) = setup_app_with(Config {
        trust_forwarded_headers: true,
        ..test_config()
    })
    .await;
    let resp = app.oneshot(get_via_proxy("/auth/login/github")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.contains("redirect_uri=https%3A%2F%2Fevil.example.com%2F"));
}

#[tokio::test]
async fn login_rejects_unknown_provider() {
    let (app, _) = setup_app().await;

    let resp = app.oneshot(get("/auth/login/bogus")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "Provider not supported");
}

#[tokio::test]
async fn callback_requires_code() {
    let (app, _) = setup_app().await;

    for uri in ["/auth/callback/google", "/auth/callback/google?code="] {
        let resp = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Authorization code not provided");
    }
}

#[tokio::test]
async fn callback_echoes_code() {
    let (app, _) = setup_app().await;

    let resp = app
        .oneshot(get("/auth/callback/google?code=abc&state=xyz"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["code"], "abc");
    assert_eq!(body["message"], "OAuth callback for google");
    assert!(body["note"].as_str().unwrap().contains("placeholder"));
}

#[tokio::test]
async fn callback_uses_first_of_repeated_codes() {
    let (app, _) = setup_app().await;

    let resp = app
        .clone()
        .oneshot(get("/auth/callback/google?code=abc&code=def"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["code"], "abc");

    let resp = app
        .oneshot(get("/auth/callback/github?state=1&state=2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "Authorization code not provided");
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let (app, _) = setup_app().await;

    let resp = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({ "status": "ok" }));

    let resp = app.oneshot(get("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    assert!(doc["paths"]["/v1/me"].is_object());
    assert!(doc["paths"]["/v1.1/devices/{dongle_id}"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
}
