mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn root_banner_names_the_api() -> Result<()> {
    let app = common::test_app().await;

    let (status, body) = common::get(&app, "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Employee Task Tracker API");
    Ok(())
}

#[tokio::test]
async fn health_reports_database_ok() -> Result<()> {
    let app = common::test_app().await;

    let (status, body) = common::get(&app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "ok");
    Ok(())
}
