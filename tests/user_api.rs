mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

use common::{body_json, test_app};

fn alice() -> serde_json::Value {
    json!({
        "username": "alice",
        "firstName": "Alice",
        "lastName": "Smith",
        "email": "alice@example.com",
        "password": "s3cret",
        "phone": "555-0100",
        "userStatus": 1
    })
}

#[tokio::test]
async fn create_and_fetch_user() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app.send_json("POST", "/v2/user", &alice()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], 200);
    let id: i64 = body["message"].as_str().unwrap().parse()?;
    assert!(id > 0);

    let fetched = body_json(app.send_get("/v2/user/alice").await).await;
    assert_eq!(fetched["username"], "alice");
    assert_eq!(fetched["firstName"], "Alice");
    assert_eq!(fetched["email"], "alice@example.com");
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_rejected() -> anyhow::Result<()> {
    let app = test_app().await?;

    app.send_json("POST", "/v2/user", &alice()).await;
    let response = app.send_json("POST", "/v2/user", &alice()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "user already exists");
    Ok(())
}

#[tokio::test]
async fn fetch_unknown_user_is_404() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app.send_get("/v2/user/nobody").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "user not found");
    Ok(())
}

#[tokio::test]
async fn batch_create_users() -> anyhow::Result<()> {
    let app = test_app().await?;

    let users = json!([
        {"username": "bob", "password": "pw", "userStatus": 1},
        {"username": "carol", "password": "pw", "userStatus": 1}
    ]);
    let response = app
        .send_json("POST", "/v2/user/createWithArray", &users)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "ok");

    assert_eq!(
        app.send_get("/v2/user/carol").await.status(),
        StatusCode::OK
    );

    let response = app
        .send_json("POST", "/v2/user/createWithList", &json!([{"username": "dave"}]))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn update_keeps_password_and_reports_id() -> anyhow::Result<()> {
    let app = test_app().await?;

    let created = body_json(app.send_json("POST", "/v2/user", &alice()).await).await;
    let id = created["message"].as_str().unwrap().to_string();

    let mut update = alice();
    update["firstName"] = json!("Alicia");
    update["password"] = json!("new-password-ignored");
    let response = app.send_json("PUT", "/v2/user/alice", &update).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], id);

    let fetched = body_json(app.send_get("/v2/user/alice").await).await;
    assert_eq!(fetched["firstName"], "Alicia");
    // The stored credential is untouched, so the old password still logs in
    let response = app
        .send_get("/v2/user/login?username=alice&password=s3cret")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send_json("PUT", "/v2/user/nobody", &alice()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn login_sets_session_cookie_and_headers() -> anyhow::Result<()> {
    let app = test_app().await?;
    app.send_json("POST", "/v2/user", &alice()).await;

    let response = app
        .send_get("/v2/user/login?username=alice&password=s3cret")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()?
        .to_string();
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.contains("HttpOnly"));
    assert!(response.headers().contains_key("x-expires-after"));
    assert_eq!(response.headers()["x-rate-limit"], "5000");

    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("logged in user session:"));

    // The cookie alone must satisfy the auth gate on protected routes
    let jwt_pair = cookie.split(';').next().unwrap().to_string();
    let request = Request::builder()
        .method("GET")
        .uri("/v2/pet/findByStatus?status=available")
        .header(header::COOKIE, jwt_pair)
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_failures_are_distinguished() -> anyhow::Result<()> {
    let app = test_app().await?;
    app.send_json("POST", "/v2/user", &alice()).await;

    let response = app
        .send_get("/v2/user/login?username=nobody&password=pw")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "user not found");

    let response = app
        .send_get("/v2/user/login?username=alice&password=wrong")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "invalid username/password supplied"
    );
    Ok(())
}

#[tokio::test]
async fn logout_expires_the_cookie() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app.send_get("/v2/user/logout").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str()?.to_string();
    assert!(cookie.starts_with("jwt=;"));
    assert!(cookie.contains("1970"));
    assert_eq!(body_json(response).await["message"], "ok");
    Ok(())
}

#[tokio::test]
async fn delete_is_soft_and_not_repeatable() -> anyhow::Result<()> {
    let app = test_app().await?;
    app.send_json("POST", "/v2/user", &alice()).await;

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/v2/user/alice")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.send(delete()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "alice");

    // The record survives with the deleted marker
    let fetched = body_json(app.send_get("/v2/user/alice").await).await;
    assert_eq!(fetched["userStatus"], -1);

    let response = app.send(delete()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "user not found, maybe user already deleted"
    );

    // A deleted user can no longer log in
    let response = app
        .send_get("/v2/user/login?username=alice&password=s3cret")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "user not found, maybe user deleted"
    );

    let response = app.send(delete()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
