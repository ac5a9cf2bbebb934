use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use bounty_board::league::LeagueState;
use bounty_board::store::{CsvFileStore, DatabaseStore};
use bounty_board::test_support::common::{
    init_tracing_for_tests, sqlite_memory_db, temp_csv_path, test_state,
};
use serde_json::{json, Value};
use std::sync::Arc;

async fn smoke_workflow(state: web::Data<LeagueState>) -> anyhow::Result<()> {
    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(bounty_board::configure_routes),
    )
    .await;

    // 1) Plain result with rebuys through the JSON API
    let req = test::TestRequest::post()
        .uri("/api/results")
        .set_json(json!({
            "variant": "3 FREE",
            "result": {"type": "plain", "first": "Ann", "second": "Bo", "third": "Cy"},
            "rebuys": "Cy 2"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let applied: Value = test::read_body_json(res).await;
    assert_eq!(applied["players_updated"], 3);
    assert_eq!(applied["deltas"]["Cy"], 4.0);

    // 2) Two-way chop through the HTML form
    let req = test::TestRequest::post()
        .uri("/results")
        .set_form([
            ("variant", "3 FREE"),
            ("shape", "2chop"),
            ("chop1", "Bo"),
            ("chop2", "Cy"),
            ("second", "Ann"),
            ("third", ""),
            ("rebuys", ""),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = String::from_utf8(test::read_body(res).await.to_vec())?;
    assert!(page.contains("Saved! 3 players updated"));

    // 3) Ranking: Ann 12, Bo 12, Cy 11
    let req = test::TestRequest::get().uri("/api/leaderboard").to_request();
    let board: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(board["total_players"], 3);
    let rows: Vec<(u64, String)> = board["leaderboard"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["rank"].as_u64().unwrap(), r["name"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "Ann".to_string()),
            (1, "Bo".to_string()),
            (3, "Cy".to_string())
        ]
    );

    let req = test::TestRequest::get().uri("/api/players").to_request();
    let names: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names, vec!["Ann", "Bo", "Cy"]);

    // 4) CSV export carries a BOM and a header
    let req = test::TestRequest::get().uri("/export/ledger.csv").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert!(body.starts_with(b"\xEF\xBB\xBFname,score,rank"));

    // 5) Poster assets are missing in the test config
    let req = test::TestRequest::get().uri("/export/poster.png").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: Value = test::read_body_json(res).await;
    assert!(err["error"].is_string());

    // 6) Empty submission is a warning and changes nothing
    let req = test::TestRequest::post()
        .uri("/api/results")
        .set_json(json!({"variant": "5 FREE", "result": {"type": "plain"}}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let warn: Value = test::read_body_json(res).await;
    assert!(warn["warning"].is_string());

    // 7) Delete, then replace the whole ledger
    let req = test::TestRequest::post()
        .uri("/api/players/delete")
        .set_json(json!({"names": ["Cy", "Nobody"]}))
        .to_request();
    let removed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(removed["removed"], 1);

    let req = test::TestRequest::put()
        .uri("/api/ledger")
        .set_json(json!({"players": [{"name": "Dee", "score": 2.5}, {"name": "Dee", "score": 1.0}]}))
        .to_request();
    let replaced: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(replaced["players"], json!([{"name": "Dee", "score": 3.5}]));

    let req = test::TestRequest::get().uri("/api/ledger").to_request();
    let ledger: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ledger, replaced);

    // 8) Board page renders the surviving player
    let req = test::TestRequest::get().uri("/").to_request();
    let page = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec())?;
    assert!(page.contains("Dee"));

    Ok(())
}

#[actix_web::test]
async fn smoke_workflow_csv_store() -> anyhow::Result<()> {
    init_tracing_for_tests();
    let store = Arc::new(CsvFileStore::new(temp_csv_path()));
    smoke_workflow(test_state(store.clone())).await?;

    let saved = std::fs::read_to_string(store.path())?;
    assert!(saved.starts_with("name,score"));
    std::fs::remove_file(store.path())?;
    Ok(())
}

#[actix_web::test]
async fn smoke_workflow_database_store() -> anyhow::Result<()> {
    init_tracing_for_tests();
    let store = Arc::new(DatabaseStore::new(sqlite_memory_db().await));
    smoke_workflow(test_state(store)).await
}

#[actix_web::test]
async fn unwritable_store_warns_and_keeps_serving() -> anyhow::Result<()> {
    init_tracing_for_tests();
    let path = std::env::temp_dir()
        .join(format!("missing-dir-{}", uuid::Uuid::new_v4()))
        .join("ledger.csv");
    let app = test::init_service(
        App::new()
            .app_data(test_state(Arc::new(CsvFileStore::new(path))))
            .configure(bounty_board::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/results")
        .set_json(json!({
            "variant": "5 FREE",
            "result": {"type": "plain", "first": "Ann"}
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let warn: Value = test::read_body_json(res).await;
    assert!(warn["warning"].is_string());

    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
