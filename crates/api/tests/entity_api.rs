//! HTTP-level integration tests for collection plans and the entities that
//! hang off them.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_plan, delete, get, post_json, put_json, token_for};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn setup_data() -> serde_json::Value {
    json!({
        "target_sales": 10000.0,
        "drop_count": 2,
        "price_segments": [
            {"name": "entry", "min_price": 0.0, "max_price": 50.0, "percentage": 50.0},
            {"name": "premium", "min_price": 50.01, "percentage": 50.0}
        ],
        "product_families": [
            {"family": "Dresses", "percentage": 60.0},
            {"family": "Tops", "percentage": 40.0}
        ],
        "monthly_distribution": [
            {"month": 3, "percentage": 50.0},
            {"month": 4, "percentage": 50.0}
        ]
    })
}

// ---------------------------------------------------------------------------
// Collection plan CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_plan_returns_201(pool: PgPool) {
    let user = Uuid::new_v4();
    let token = token_for(user);

    let response = post_json(
        build_test_app(pool),
        "/api/collection-plans",
        Some(&token),
        json!({"name": "  SS26 Core  ", "season": "SS26", "year": 2026, "location": "Madrid"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "SS26 Core");
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["owner_id"], user.to_string());
    assert_eq!(json["data"]["setup_data"]["drop_count"], 0);
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_plan_rejects_unknown_status(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let response = post_json(
        build_test_app(pool),
        "/api/collection-plans",
        Some(&token),
        json!({"name": "Plan", "status": "published"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_plans_is_owner_scoped_and_filters_status(pool: PgPool) {
    let alice = token_for(Uuid::new_v4());
    let bob = token_for(Uuid::new_v4());

    create_plan(&pool, &alice, json!({"name": "A draft"})).await;
    create_plan(&pool, &alice, json!({"name": "A live", "status": "active"})).await;
    create_plan(&pool, &bob, json!({"name": "B draft"})).await;

    let response = get(build_test_app(pool.clone()), "/api/collection-plans", Some(&alice)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = get(
        build_test_app(pool),
        "/api/collection-plans?status=active",
        Some(&alice),
    )
    .await;
    let json = body_json(response).await;
    let plans = json["data"].as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["name"], "A live");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_plan_is_not_found(pool: PgPool) {
    let owner = token_for(Uuid::new_v4());
    let stranger = token_for(Uuid::new_v4());
    let id = create_plan(&pool, &owner, json!({"name": "Private"})).await;

    let uri = format!("/api/collection-plans/{id}");
    let response = get(build_test_app(pool.clone()), &uri, Some(&stranger)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        Some(&stranger),
        json!({"name": "Hijacked"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool.clone()), &uri, Some(&stranger)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(build_test_app(pool), &uri, Some(&owner)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Private");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_plan(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let id = create_plan(&pool, &token, json!({"name": "Old"})).await;
    let uri = format!("/api/collection-plans/{id}");

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        Some(&token),
        json!({"name": "New", "status": "active", "location": "Lisbon"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "New");
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["location"], "Lisbon");

    let response = delete(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_replaces_setup_data(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let id = create_plan(&pool, &token, json!({"name": "Wizard"})).await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/collection-plans/{id}/save"),
        Some(&token),
        json!({"setup_data": setup_data(), "name": "  Wizard SS26 ", "status": "active"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Wizard SS26");
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["setup_data"]["target_sales"], 10000.0);
    assert_eq!(
        json["data"]["setup_data"]["product_families"][0]["family"],
        "Dresses"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_rejects_invalid_setup_data(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let id = create_plan(&pool, &token, json!({"name": "Wizard"})).await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/collection-plans/{id}/save"),
        Some(&token),
        json!({"setup_data": {"drop_count": 60}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_planner_create_forces_draft(pool: PgPool) {
    let token = token_for(Uuid::new_v4());

    let response = post_json(
        build_test_app(pool),
        "/api/planner/create",
        Some(&token),
        json!({"name": "From wizard", "season": "FW26", "setup_data": setup_data()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["setup_data"]["drop_count"], 2);
}

// ---------------------------------------------------------------------------
// SKUs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sku_margin_is_derived(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let plan_id = create_plan(&pool, &token, json!({"name": "Plan"})).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/skus",
        Some(&token),
        json!({
            "collection_plan_id": plan_id,
            "name": "Linen dress",
            "family": "Dresses",
            "pvp": 80.0,
            "cost": 20.0,
            "units": 100,
            "channel": "dtc"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["margin"], 75.0);
    let sku_id = json["data"]["id"].as_i64().unwrap();

    // Changing the cost recomputes the margin.
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/skus/{sku_id}"),
        Some(&token),
        json!({"cost": 40.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["margin"], 50.0);

    let response = get(
        build_test_app(pool),
        &format!("/api/skus?collection_plan_id={plan_id}"),
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sku_validation(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let plan_id = create_plan(&pool, &token, json!({"name": "Plan"})).await;

    let base = json!({
        "collection_plan_id": plan_id,
        "name": "Tee",
        "family": "Tops",
        "pvp": 30.0,
        "cost": 10.0
    });

    let mut negative = base.clone();
    negative["cost"] = json!(-1.0);
    let response = post_json(build_test_app(pool.clone()), "/api/skus", Some(&token), negative).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut channel = base.clone();
    channel["channel"] = json!("carrier-pigeon");
    let response = post_json(build_test_app(pool.clone()), "/api/skus", Some(&token), channel).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut units = base;
    units["units"] = json!(-5);
    let response = post_json(build_test_app(pool), "/api/skus", Some(&token), units).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sku_drop_must_belong_to_plan(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let plan_a = create_plan(&pool, &token, json!({"name": "A"})).await;
    let plan_b = create_plan(&pool, &token, json!({"name": "B"})).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/drops",
        Some(&token),
        json!({"collection_plan_id": plan_b, "name": "Drop B1", "launch_date": "2026-03-01"}),
    )
    .await;
    let drop_b = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool),
        "/api/skus",
        Some(&token),
        json!({
            "collection_plan_id": plan_a,
            "drop_id": drop_b,
            "name": "Misfiled",
            "family": "Tops",
            "pvp": 20.0,
            "cost": 5.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sku_on_foreign_plan_is_not_found(pool: PgPool) {
    let owner = token_for(Uuid::new_v4());
    let stranger = token_for(Uuid::new_v4());
    let plan_id = create_plan(&pool, &owner, json!({"name": "Private"})).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/skus",
        Some(&owner),
        json!({
            "collection_plan_id": plan_id,
            "name": "Coat",
            "family": "Outerwear",
            "pvp": 200.0,
            "cost": 90.0
        }),
    )
    .await;
    let sku_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/skus/{sku_id}"),
        Some(&stranger),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], format!("Sku with id {sku_id} not found"));

    let response = get(
        build_test_app(pool),
        &format!("/api/skus?collection_plan_id={plan_id}"),
        Some(&stranger),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Drops and commercial actions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_drop_crud_and_date_validation(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let plan_id = create_plan(&pool, &token, json!({"name": "Plan"})).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/drops",
        Some(&token),
        json!({
            "collection_plan_id": plan_id,
            "name": "Backwards",
            "launch_date": "2026-04-10",
            "end_date": "2026-04-01"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/drops",
        Some(&token),
        json!({
            "collection_plan_id": plan_id,
            "name": "Spring 1",
            "drop_number": 1,
            "launch_date": "2026-03-01",
            "channels": ["dtc", "wholesale"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["channels"], json!(["dtc", "wholesale"]));
    let drop_id = json["data"]["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/drops/{drop_id}"),
        Some(&token),
        json!({"end_date": "2026-03-31"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["end_date"], "2026-03-31");

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/drops/{drop_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        build_test_app(pool),
        &format!("/api/drops?collection_plan_id={plan_id}"),
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_commercial_action_type_defaults_and_validates(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let plan_id = create_plan(&pool, &token, json!({"name": "Plan"})).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/commercial-actions",
        Some(&token),
        json!({"collection_plan_id": plan_id, "name": "Launch", "start_date": "2026-03-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["action_type"], "promotion");
    let action_id = json["data"]["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/commercial-actions/{action_id}"),
        Some(&token),
        json!({"action_type": "raffle"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        build_test_app(pool),
        &format!("/api/commercial-actions/{action_id}"),
        Some(&token),
        json!({"action_type": "campaign"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["action_type"], "campaign");
}

// ---------------------------------------------------------------------------
// Tech packs
// ---------------------------------------------------------------------------

async fn create_sku(pool: &PgPool, token: &str, plan_id: i64, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/skus",
        Some(token),
        json!({
            "collection_plan_id": plan_id,
            "name": name,
            "family": "Dresses",
            "pvp": 80.0,
            "cost": 30.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tech_pack_crud_and_sku_link(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let plan_a = create_plan(&pool, &token, json!({"name": "A"})).await;
    let plan_b = create_plan(&pool, &token, json!({"name": "B"})).await;
    let sku_a = create_sku(&pool, &token, plan_a, "Slip dress").await;
    let sku_b = create_sku(&pool, &token, plan_b, "Wrap dress").await;

    // A SKU from another plan cannot be linked.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/tech-packs",
        Some(&token),
        json!({"collection_plan_id": plan_a, "sku_id": sku_b, "name": "Sketch"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/tech-packs",
        Some(&token),
        json!({"collection_plan_id": plan_a, "sku_id": sku_a, "name": "Sketch"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let pack_id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["specs"], json!({}));

    let uri = format!("/api/tech-packs/{pack_id}");
    let response = get(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Sketch");
    assert_eq!(json["data"]["sku_id"], sku_a);

    let stranger = token_for(Uuid::new_v4());
    let response = get(build_test_app(pool.clone()), &uri, Some(&stranger)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        Some(&token),
        json!({"sku_id": sku_b}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        Some(&token),
        json!({"description": "Silk satin, bias cut", "specs": {"fabric": "silk"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Sketch");
    assert_eq!(json["data"]["sku_id"], sku_a);
    assert_eq!(json["data"]["specs"]["fabric"], "silk");

    // Deleting the SKU unlinks the tech pack but keeps it.
    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/skus/{sku_a}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["sku_id"].is_null());

    let response = delete(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete(build_test_app(pool), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Overview and reports
// ---------------------------------------------------------------------------

/// Plan with one drop, two SKUs (one unassigned), a tech pack and an action.
async fn seeded_plan(pool: &PgPool, token: &str) -> i64 {
    let plan_id = create_plan(pool, token, json!({"name": "SS26", "setup_data": setup_data()})).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/drops",
        Some(token),
        json!({"collection_plan_id": plan_id, "name": "March", "launch_date": "2026-03-01"}),
    )
    .await;
    let drop_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/skus",
        Some(token),
        json!({
            "collection_plan_id": plan_id,
            "drop_id": drop_id,
            "name": "Midi dress",
            "family": "dresses",
            "pvp": 100.0,
            "cost": 40.0,
            "units": 10,
            "launch_date": "2026-03-01"
        }),
    )
    .await;
    let dress_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/skus",
        Some(token),
        json!({
            "collection_plan_id": plan_id,
            "name": "Tank top",
            "family": "Tops",
            "pvp": 40.0,
            "cost": 20.0,
            "units": 20
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/tech-packs",
        Some(token),
        json!({"collection_plan_id": plan_id, "sku_id": dress_id, "name": "Midi dress TP"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/commercial-actions",
        Some(token),
        json!({
            "collection_plan_id": plan_id,
            "name": "Launch event",
            "action_type": "event",
            "start_date": "2026-03-01"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    plan_id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overview_aggregates_plan(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let plan_id = seeded_plan(&pool, &token).await;

    let response = get(
        build_test_app(pool),
        &format!("/api/collection-plans/{plan_id}/overview"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let overview = &body_json(response).await["data"];

    assert_eq!(overview["totals"]["sku_count"], 2);
    assert_eq!(overview["totals"]["total_units"], 30);
    assert_eq!(overview["totals"]["projected_revenue"], 1800.0);
    assert_eq!(overview["totals"]["total_cost"], 800.0);
    assert_eq!(overview["totals"]["average_margin"], 55.0);
    assert_eq!(overview["totals"]["sales_gap"], 8200.0);

    assert_eq!(overview["family_mix"][0]["name"], "Dresses");
    assert_eq!(overview["family_mix"][0]["sku_count"], 1);
    assert_eq!(overview["family_mix"][0]["actual_pct"], 50.0);

    assert_eq!(overview["drops"]["planned_count"], 2);
    assert_eq!(overview["drops"]["unassigned_skus"], 1);
    assert_eq!(overview["creative"]["tech_pack_count"], 1);
    assert_eq!(overview["creative"]["sku_coverage_pct"], 50.0);
    assert_eq!(overview["commercial_action_count"], 1);

    let warnings: Vec<&str> = overview["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w.as_str().unwrap())
        .collect();
    assert!(warnings.contains(&"1 drops scheduled but 2 planned"));
    assert!(warnings.contains(&"1 SKUs are not assigned to a drop"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_snapshots_overview(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let stranger = token_for(Uuid::new_v4());
    let plan_id = seeded_plan(&pool, &token).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/reports",
        Some(&token),
        json!({"collection_plan_id": plan_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "SS26 overview");
    assert_eq!(json["data"]["report_type"], "overview");
    assert_eq!(json["data"]["content"]["totals"]["sku_count"], 2);
    let report_id = json["data"]["id"].as_i64().unwrap();

    // Later edits do not change the stored snapshot.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/skus",
        Some(&token),
        json!({
            "collection_plan_id": plan_id,
            "name": "Late addition",
            "family": "Tops",
            "pvp": 25.0,
            "cost": 10.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/reports/{report_id}");
    let response = get(build_test_app(pool.clone()), &uri, Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"]["totals"]["sku_count"], 2);

    let response = get(build_test_app(pool.clone()), &uri, Some(&stranger)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/reports?collection_plan_id={plan_id}"),
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = delete(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_plan_cascades_to_children(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let plan_id = seeded_plan(&pool, &token).await;

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/collection-plans/{plan_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skus WHERE collection_plan_id = $1")
        .bind(plan_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signal_create_normalizes_keyword_and_conflicts(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let body = json!({
        "source": "instagram",
        "keyword": "#Linen",
        "mention_count": 12,
        "engagement": 340,
        "period_start": "2026-03-01",
        "period_end": "2026-03-07"
    });

    let response = post_json(build_test_app(pool.clone()), "/api/signals", Some(&token), body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["keyword"], "linen");

    let response = post_json(build_test_app(pool.clone()), "/api/signals", Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(
        build_test_app(pool),
        "/api/signals?source=instagram&keyword=linen",
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["mention_count"], 12);
}
