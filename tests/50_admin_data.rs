mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn admin_crud_round() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("root", "admin").await?;
    let auth = format!("Bearer {}", token);

    let created = server.create_record(&token, "First", "The first record").await?;
    assert_eq!(created["title"], "First");
    assert_eq!(created["description"], "The first record");
    let id = created["id"].as_i64().expect("numeric id");

    let res = server.list("/admin/data", &auth).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([created]));

    let res = server
        .client
        .put(server.url(&format!("/admin/data/{}", id)))
        .header("Authorization", &auth)
        .json(&json!({ "title": "Renamed", "description": "Changed" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated, json!({ "id": id, "title": "Renamed", "description": "Changed" }));

    let res = server
        .client
        .delete(server.url(&format!("/admin/data/{}", id)))
        .header("Authorization", &auth)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Data deleted");
    assert_eq!(body["deleted"], updated);

    let res = server.list("/admin/data", &auth).await?;
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_requires_title_and_description() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("root", "admin").await?;

    let res = server
        .client
        .post(server.url("/admin/data"))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "Only a title" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Title and description are required");

    let res = server.list("/admin/data", &token).await?;
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn update_and_delete_of_missing_id_leave_table_unchanged() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("root", "admin").await?;
    let auth = format!("Bearer {}", token);
    let kept = server.create_record(&token, "Kept", "Untouched").await?;

    for id in ["9999", "not-a-number"] {
        let res = server
            .client
            .put(server.url(&format!("/admin/data/{}", id)))
            .header("Authorization", &auth)
            .json(&json!({ "title": "x", "description": "y" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "PUT {}", id);
        assert_eq!(res.json::<Value>().await?["error"], "Data not found");

        let res = server
            .client
            .delete(server.url(&format!("/admin/data/{}", id)))
            .header("Authorization", &auth)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "DELETE {}", id);
    }

    let res = server.list("/admin/data", &auth).await?;
    assert_eq!(res.json::<Value>().await?, json!([kept]));
    Ok(())
}

#[tokio::test]
async fn update_validates_body_before_lookup() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("root", "admin").await?;
    let record = server.create_record(&token, "Kept", "Untouched").await?;

    let res = server
        .client
        .put(server.url(&format!("/admin/data/{}", record["id"])))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "", "description": "y" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server.list("/admin/data", &token).await?;
    assert_eq!(res.json::<Value>().await?, json!([record]));
    Ok(())
}
