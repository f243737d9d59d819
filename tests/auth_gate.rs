//! Bearer-token and role checks observed through the real router.
mod support;

use axum::http::StatusCode;
use business_catalog::services::auth::roles;
use serde_json::json;
use tower::ServiceExt;

use support::{SECRET, json_body, request, router, token};

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let res = router(Some(SECRET))
        .oneshot(request("GET", "/api/v1/auth/me", None, None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(res).await,
        json!({ "message": "authorization header missing" })
    );
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let res = router(Some(SECRET))
        .oneshot(request("GET", "/api/v1/users", Some("Basic dXNlcjpwYXNz"), None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(res).await["message"],
        "authorization header must use the Bearer scheme"
    );
}

#[tokio::test]
async fn empty_bearer_token_is_unauthorized() {
    let res = router(Some(SECRET))
        .oneshot(request("GET", "/api/v1/users", Some("Bearer "), None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await["message"], "bearer token missing");
}

#[tokio::test]
async fn expired_token_is_reported_as_expired() {
    let bearer = format!("Bearer {}", token(SECRET, roles::ADMIN, -3600));
    let res = router(Some(SECRET))
        .oneshot(request("GET", "/api/v1/users", Some(&bearer), None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await, json!({ "message": "token expired" }));
}

#[tokio::test]
async fn token_signed_with_another_secret_is_invalid() {
    let bearer = format!("Bearer {}", token("some-other-secret", roles::ADMIN, 3600));
    let res = router(Some(SECRET))
        .oneshot(request("GET", "/api/v1/users", Some(&bearer), None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await, json!({ "message": "token invalid" }));
}

#[tokio::test]
async fn user_role_is_forbidden_on_admin_routes() {
    let bearer = format!("Bearer {}", token(SECRET, roles::USER, 3600));

    for (method, uri) in [
        ("GET", "/api/v1/users"),
        ("POST", "/api/v1/articles"),
        ("POST", "/api/v1/business-categories"),
        ("DELETE", "/api/v1/subsectors/abcdefghij"),
    ] {
        let res = router(Some(SECRET))
            .oneshot(request(method, uri, Some(&bearer), Some("{}")))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(
            json_body(res).await,
            json!({ "message": "insufficient permission" })
        );
    }
}

#[tokio::test]
async fn authentication_runs_before_body_parsing() {
    let res = router(Some(SECRET))
        .oneshot(request("POST", "/api/v1/articles", None, Some("{not json")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_secret_fails_closed_with_500() {
    let bearer = format!("Bearer {}", token(SECRET, roles::SUPERADMIN, 3600));

    for authorization in [None, Some(bearer.as_str())] {
        let res = router(None)
            .oneshot(request("GET", "/api/v1/auth/me", authorization, None))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(res).await,
            json!({ "message": "authentication is not configured" })
        );
    }
}

#[tokio::test]
async fn same_request_gives_same_outcome() {
    let bearer = format!("Bearer {}", token(SECRET, roles::USER, 3600));
    let app = router(Some(SECRET));

    for _ in 0..3 {
        let res = app
            .clone()
            .oneshot(request("GET", "/api/v1/users", Some(&bearer), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
