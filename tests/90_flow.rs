mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// register → login → read as user; writes are refused for the same token
#[tokio::test]
async fn user_can_read_but_not_write() -> Result<()> {
    let server = common::spawn_server().await?;

    let admin = server.token_for("root", "admin").await?;
    let record = server.create_record(&admin, "Shared", "Visible to every role").await?;

    let res = server
        .register("user1", "user1@example.com", "pw", "user")
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server.login("user1@example.com", "pw").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.json::<Value>().await?["token"]
        .as_str()
        .map(str::to_string)
        .expect("token in login response");

    let res = server.list("/user/data", &format!("Bearer {}", token)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([record]));

    let res = server
        .client
        .post(server.url("/admin/data"))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "Nope", "description": "Not allowed" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.list("/user/data", &token).await?;
    assert_eq!(res.json::<Value>().await?, json!([record]));
    Ok(())
}

#[tokio::test]
async fn admin_sees_user_route_too() -> Result<()> {
    let server = common::spawn_server().await?;
    let admin = server.token_for("root", "admin").await?;

    let res = server.list("/user/data", &admin).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}
