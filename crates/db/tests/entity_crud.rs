use atelier_db::models::collection_plan::{CreateCollectionPlan, UpdateCollectionPlan};
use atelier_db::models::plan_drop::CreatePlanDrop;
use atelier_db::models::raw_content::NewRawContent;
use atelier_db::models::signal::{CreateSignal, SignalFilter};
use atelier_db::models::sku::{CreateSku, UpdateSku};
use atelier_db::models::tech_pack::{CreateTechPack, UpdateTechPack};
use atelier_db::repositories::{
    CollectionPlanRepo, PlanDropRepo, RawContentRepo, SignalRepo, SkuRepo, TechPackRepo,
};
use chrono::NaiveDate;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn new_plan(owner: Uuid, name: &str, status: Option<&str>) -> CreateCollectionPlan {
    CreateCollectionPlan {
        owner_id: owner,
        name: name.to_string(),
        season: Some("SS26".to_string()),
        year: Some(2026),
        location: None,
        status: status.map(String::from),
        setup_data: json!({}),
    }
}

fn new_sku(plan_id: i64, drop_id: Option<i64>) -> CreateSku {
    CreateSku {
        collection_plan_id: plan_id,
        drop_id,
        name: "Linen shirt".to_string(),
        reference: Some("LS-001".to_string()),
        family: "Shirts".to_string(),
        category: None,
        color: Some("ecru".to_string()),
        pvp: 59.9,
        cost: 18.0,
        margin: None,
        units: None,
        channel: None,
        launch_date: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap(pool: PgPool) {
    atelier_db::health_check(&pool).await.unwrap();

    let tables = [
        "collection_plans",
        "drops",
        "skus",
        "commercial_actions",
        "tech_packs",
        "raw_contents",
        "signals",
        "ai_recommendations",
        "reports",
    ];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

// ---------------------------------------------------------------------------
// Collection plans
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plan_defaults_and_owner_scope(pool: PgPool) {
    let owner = Uuid::new_v4();
    let plan = CollectionPlanRepo::create(&pool, &new_plan(owner, "Core", None))
        .await
        .unwrap();
    assert_eq!(plan.status, "draft");
    assert_eq!(plan.owner_id, owner);

    let found = CollectionPlanRepo::find_by_id_for_owner(&pool, plan.id, owner)
        .await
        .unwrap();
    assert!(found.is_some());

    let other = Uuid::new_v4();
    assert!(CollectionPlanRepo::find_by_id_for_owner(&pool, plan.id, other)
        .await
        .unwrap()
        .is_none());
    assert!(CollectionPlanRepo::update(&pool, plan.id, other, &UpdateCollectionPlan::default())
        .await
        .unwrap()
        .is_none());
    assert!(!CollectionPlanRepo::delete(&pool, plan.id, other).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plan_update_keeps_unset_fields(pool: PgPool) {
    let owner = Uuid::new_v4();
    let plan = CollectionPlanRepo::create(&pool, &new_plan(owner, "Core", None))
        .await
        .unwrap();

    let updated = CollectionPlanRepo::update(
        &pool,
        plan.id,
        owner,
        &UpdateCollectionPlan {
            status: Some("active".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.status, "active");
    assert_eq!(updated.name, "Core");
    assert_eq!(updated.season.as_deref(), Some("SS26"));
    assert!(updated.updated_at >= plan.updated_at);

    let saved = CollectionPlanRepo::save_setup_data(
        &pool,
        plan.id,
        owner,
        &json!({"drop_count": 4}),
        None,
        None,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(saved.setup_data["drop_count"], 4);
    assert_eq!(saved.name, "Core");
    assert_eq!(saved.status, "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_setup_data_is_all_or_nothing(pool: PgPool) {
    let owner = Uuid::new_v4();
    let plan = CollectionPlanRepo::create(&pool, &new_plan(owner, "Core", None))
        .await
        .unwrap();

    let saved = CollectionPlanRepo::save_setup_data(
        &pool,
        plan.id,
        owner,
        &json!({"drop_count": 2}),
        Some("Core SS26"),
        Some("active"),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(saved.name, "Core SS26");
    assert_eq!(saved.status, "active");

    // A rejected status leaves the name and setup data untouched.
    let result = CollectionPlanRepo::save_setup_data(
        &pool,
        plan.id,
        owner,
        &json!({"drop_count": 5}),
        Some("Renamed"),
        Some("published"),
    )
    .await;
    assert!(result.is_err());

    let current = CollectionPlanRepo::find_by_id_for_owner(&pool, plan.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.name, "Core SS26");
    assert_eq!(current.setup_data["drop_count"], 2);

    assert!(CollectionPlanRepo::save_setup_data(
        &pool,
        plan.id,
        Uuid::new_v4(),
        &json!({}),
        None,
        None,
    )
    .await
    .unwrap()
    .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_check_constraint(pool: PgPool) {
    let result =
        CollectionPlanRepo::create(&pool, &new_plan(Uuid::new_v4(), "Bad", Some("published")))
            .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_status_spans_owners(pool: PgPool) {
    CollectionPlanRepo::create(&pool, &new_plan(Uuid::new_v4(), "A", Some("active")))
        .await
        .unwrap();
    CollectionPlanRepo::create(&pool, &new_plan(Uuid::new_v4(), "B", Some("active")))
        .await
        .unwrap();
    CollectionPlanRepo::create(&pool, &new_plan(Uuid::new_v4(), "C", None))
        .await
        .unwrap();

    let active = CollectionPlanRepo::list_by_status(&pool, "active").await.unwrap();
    assert_eq!(active.len(), 2);
}

// ---------------------------------------------------------------------------
// SKUs and drops
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sku_crud(pool: PgPool) {
    let plan = CollectionPlanRepo::create(&pool, &new_plan(Uuid::new_v4(), "P", None))
        .await
        .unwrap();

    let sku = SkuRepo::create(&pool, &new_sku(plan.id, None)).await.unwrap();
    assert_eq!(sku.units, 0);
    assert_eq!(sku.margin, None);

    let updated = SkuRepo::update(
        &pool,
        sku.id,
        &UpdateSku {
            units: Some(120),
            margin: Some(69.95),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.units, 120);
    assert_eq!(updated.margin, Some(69.95));
    assert_eq!(updated.name, "Linen shirt");

    assert_eq!(SkuRepo::list(&pool, Some(plan.id)).await.unwrap().len(), 1);
    assert_eq!(SkuRepo::list(&pool, None).await.unwrap().len(), 1);

    assert!(SkuRepo::delete(&pool, sku.id).await.unwrap());
    assert!(SkuRepo::find_by_id(&pool, sku.id).await.unwrap().is_none());
    assert!(!SkuRepo::delete(&pool, sku.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_drop_unassigns_skus(pool: PgPool) {
    let plan = CollectionPlanRepo::create(&pool, &new_plan(Uuid::new_v4(), "P", None))
        .await
        .unwrap();
    let drop = PlanDropRepo::create(
        &pool,
        &CreatePlanDrop {
            collection_plan_id: plan.id,
            name: "Drop 1".to_string(),
            drop_number: Some(1),
            launch_date: date(2026, 3, 1),
            end_date: None,
            channels: None,
            description: None,
        },
    )
    .await
    .unwrap();
    assert!(drop.channels.is_empty());

    let sku = SkuRepo::create(&pool, &new_sku(plan.id, Some(drop.id)))
        .await
        .unwrap();
    assert_eq!(sku.drop_id, Some(drop.id));

    assert!(PlanDropRepo::delete(&pool, drop.id).await.unwrap());
    let sku = SkuRepo::find_by_id(&pool, sku.id).await.unwrap().unwrap();
    assert_eq!(sku.drop_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tech_pack_crud_and_sku_unlink(pool: PgPool) {
    let plan = CollectionPlanRepo::create(&pool, &new_plan(Uuid::new_v4(), "P", None))
        .await
        .unwrap();
    let sku = SkuRepo::create(&pool, &new_sku(plan.id, None)).await.unwrap();

    let pack = TechPackRepo::create(
        &pool,
        &CreateTechPack {
            collection_plan_id: plan.id,
            sku_id: Some(sku.id),
            name: "Shirt sketch".to_string(),
            sketch_url: None,
            description: None,
            specs: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(pack.specs, json!({}));

    let updated = TechPackRepo::update(
        &pool,
        pack.id,
        &UpdateTechPack {
            specs: Some(json!({"fabric": "linen"})),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Shirt sketch");
    assert_eq!(updated.sku_id, Some(sku.id));
    assert_eq!(updated.specs["fabric"], "linen");

    assert!(TechPackRepo::update(&pool, pack.id + 1000, &UpdateTechPack::default())
        .await
        .unwrap()
        .is_none());

    assert!(SkuRepo::delete(&pool, sku.id).await.unwrap());
    let unlinked = TechPackRepo::find_by_id(&pool, pack.id).await.unwrap().unwrap();
    assert_eq!(unlinked.sku_id, None);

    assert!(TechPackRepo::delete(&pool, pack.id).await.unwrap());
    assert!(TechPackRepo::find_by_id(&pool, pack.id).await.unwrap().is_none());
    assert!(!TechPackRepo::delete(&pool, pack.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Social listening
// ---------------------------------------------------------------------------

fn post(source: &str, external_id: &str, text: &str) -> NewRawContent {
    NewRawContent {
        source: source.to_string(),
        external_id: external_id.to_string(),
        author: None,
        text: text.to_string(),
        url: None,
        engagement: 3,
        published_at: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_raw_content_processing_queue(pool: PgPool) {
    let items = vec![
        post("instagram", "1", "#linen"),
        post("instagram", "2", "#denim"),
        post("instagram", "1", "duplicate external id"),
    ];
    let inserted = RawContentRepo::insert_many(&pool, &items).await.unwrap();
    assert_eq!(inserted, 2);

    let pending = RawContentRepo::list_unprocessed(&pool, 10).await.unwrap();
    assert_eq!(pending.len(), 2);

    RawContentRepo::mark_processed(&pool, pending[0].id, &["linen".to_string()])
        .await
        .unwrap();

    let pending = RawContentRepo::list_unprocessed(&pool, 10).await.unwrap();
    assert_eq!(pending.len(), 1);

    let since = chrono::Utc::now() - chrono::Duration::days(1);
    let processed = RawContentRepo::list_processed_since(&pool, since).await.unwrap();
    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0].hashtags, vec!["linen".to_string()]);
    assert!(processed[0].processed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signal_upsert_overwrites_period(pool: PgPool) {
    let mut signal = CreateSignal {
        source: "tiktok".to_string(),
        keyword: "linen".to_string(),
        mention_count: 4,
        engagement: 40,
        period_start: date(2026, 3, 1),
        period_end: date(2026, 3, 7),
    };
    let first = SignalRepo::upsert(&pool, &signal).await.unwrap();

    signal.mention_count = 9;
    signal.period_end = date(2026, 3, 8);
    let second = SignalRepo::upsert(&pool, &signal).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.mention_count, 9);
    assert_eq!(second.period_end, date(2026, 3, 8));

    // A plain insert of the same period hits the unique constraint.
    let err = SignalRepo::create(&pool, &signal).await.unwrap_err();
    let constraint = err
        .as_database_error()
        .and_then(|e| e.constraint())
        .map(String::from);
    assert_eq!(constraint.as_deref(), Some("uq_signals_source_keyword_period"));

    let listed = SignalRepo::list(
        &pool,
        &SignalFilter {
            keyword: Some("LINEN".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_keywords_sums_sources(pool: PgPool) {
    for (source, keyword, mentions) in [
        ("tiktok", "linen", 5),
        ("instagram", "linen", 2),
        ("instagram", "denim", 6),
    ] {
        SignalRepo::create(
            &pool,
            &CreateSignal {
                source: source.to_string(),
                keyword: keyword.to_string(),
                mention_count: mentions,
                engagement: 0,
                period_start: date(2026, 3, 1),
                period_end: date(2026, 3, 7),
            },
        )
        .await
        .unwrap();
    }

    let top = SignalRepo::top_keywords(&pool, date(2026, 2, 1), None)
        .await
        .unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].keyword, "linen");
    assert_eq!(top[0].mention_count, 7);

    let limited = SignalRepo::top_keywords(&pool, date(2026, 2, 1), Some(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);

    let none = SignalRepo::top_keywords(&pool, date(2026, 4, 1), None)
        .await
        .unwrap();
    assert!(none.is_empty());
}
