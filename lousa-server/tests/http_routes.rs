//! Route tests driven in-process through the router

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lousa_server::{build_router, AppState, ServerConfig};
use tower::ServiceExt;

fn state_with_token(token: Option<&str>) -> AppState {
    let config = ServerConfig {
        admin_token: token.map(str::to_string),
        ..ServerConfig::default()
    };
    AppState::new(config)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::HOST, "sala.local:5001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_entry_page() {
    let (status, body) = get(build_router(state_with_token(None)), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<body class="celular">"#));
}

#[tokio::test]
async fn test_display_page_uses_request_host() {
    let (status, body) = get(build_router(state_with_token(None)), "/lousa").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"window.PUBLIC_URL = "http://sala.local:5001";"#));
}

#[tokio::test]
async fn test_display_page_prefers_configured_url() {
    let config = ServerConfig {
        public_url: Some("https://lousa.escola.br".to_string()),
        ..ServerConfig::default()
    };
    let (_, body) = get(build_router(AppState::new(config)), "/lousa").await;
    assert!(body.contains(r#"window.PUBLIC_URL = "https://lousa.escola.br";"#));
}

#[tokio::test]
async fn test_script_is_served() {
    let app = build_router(state_with_token(None));
    let response = app
        .oneshot(Request::builder().uri("/static/script.js").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("application/javascript"));
}

#[tokio::test]
async fn test_stats_empty() {
    let (status, body) = get(build_router(state_with_token(None)), "/stats").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"total": 0, "top": [], "recent": []}));
}

#[tokio::test]
async fn test_stats_after_submissions() {
    let state = state_with_token(None);
    for name in ["Ana", "Bia", "Ana"] {
        state.board.submit(name).await.unwrap();
    }

    let (_, body) = get(build_router(state), "/stats").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "total": 3,
            "top": [{"nome": "Ana", "qtd": 2}, {"nome": "Bia", "qtd": 1}],
            "recent": ["Ana", "Bia", "Ana"],
        })
    );
}

#[tokio::test]
async fn test_admin_reset_denied() {
    let state = state_with_token(Some("abc"));
    state.board.submit("Ana").await.unwrap();

    for uri in ["/admin/reset", "/admin/reset?token=", "/admin/reset?token=xyz"] {
        let (status, body) = get(build_router(state.clone()), uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body, "Acesso negado");
    }

    assert_eq!(state.board.snapshot().await.total, 1);
}

#[tokio::test]
async fn test_admin_reset_denied_when_unconfigured() {
    let state = state_with_token(None);
    state.board.submit("Ana").await.unwrap();

    let (status, _) = get(build_router(state.clone()), "/admin/reset?token=abc").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(state.board.snapshot().await.total, 1);
}

#[tokio::test]
async fn test_admin_reset_ok() {
    let state = state_with_token(Some("abc"));
    state.board.submit("Ana").await.unwrap();
    let (_id, mut frames) = state.board.connect().await.unwrap();
    frames.try_recv().unwrap();

    let (status, body) = get(build_router(state.clone()), "/admin/reset?token=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert!(state.board.snapshot().await.is_empty());

    let frame: serde_json::Value = serde_json::from_str(&frames.try_recv().unwrap()).unwrap();
    assert_eq!(frame["event"], "stats_update");
    assert_eq!(frame["data"]["total"], 0);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = get(build_router(state_with_token(None)), "/nada").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
