//! Integration tests for the Shift Pay Engine.
//!
//! This test suite covers:
//! - Shift income over HTTP (night premium, rest, clock times, open shifts)
//! - Deductions over HTTP (insurance thresholds, income tax)
//! - Weekly holiday allowance recalculation over HTTP
//! - Monthly estimation over HTTP
//! - Write-triggered recalculation over the in-memory store
//! - Worker and owner monthly summaries
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use tower::ServiceExt;

use shift_pay_engine::api::{AppState, create_router};
use shift_pay_engine::config::{ConfigLoader, RateTable};
use shift_pay_engine::error::EngineError;
use shift_pay_engine::models::{
    MemberRole, Membership, MonthlySummary, SalaryConfig, ShiftRecord, Workplace,
};
use shift_pay_engine::recalculation::{RecalculationCommand, Recalculator, coalesce};
use shift_pay_engine::store::InMemoryStore;
use shift_pay_engine::summary::{SummaryAggregator, Viewer};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
        .unwrap()
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_shift(id: &str, date: &str, start: &str, end: Option<&str>) -> Value {
    json!({
        "id": id,
        "worker_id": "worker_001",
        "work_date": date,
        "scheduled_start": start,
        "scheduled_end": end,
        "hourly_rate": 10000
    })
}

fn hourly_salary() -> Value {
    json!({
        "pay_cycle": { "cycle": "monthly", "pay_date_of_month": 25 },
        "pay_basis": "hourly",
        "hourly_rate": 10000,
        "has_income_tax": true,
        "has_holiday_allowance": true
    })
}

fn all_deductions_salary() -> Value {
    json!({
        "pay_cycle": { "cycle": "monthly", "pay_date_of_month": 25 },
        "pay_basis": "hourly",
        "hourly_rate": 10000,
        "has_national_pension": true,
        "has_health_insurance": true,
        "has_employment_insurance": true,
        "has_income_tax": true
    })
}

fn store_shift(id: &str, worker: &str, date: &str, start: &str, end: &str) -> ShiftRecord {
    ShiftRecord::new(
        id,
        worker,
        make_date(date),
        make_datetime(date, start),
        Some(NaiveDateTime::parse_from_str(end, "%Y-%m-%d %H:%M:%S").unwrap()),
        10_000,
    )
}

fn cafe() -> Workplace {
    Workplace {
        id: "cafe".to_string(),
        name: "Corner Cafe".to_string(),
    }
}

fn worker_salary() -> SalaryConfig {
    let mut salary = SalaryConfig::hourly(10_000, 25);
    salary.has_holiday_allowance = true;
    salary.has_night_allowance = true;
    salary.has_income_tax = true;
    salary
}

fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store
        .add_membership(Membership {
            id: "m1".to_string(),
            user_id: "minji".to_string(),
            workplace: cafe(),
            role: MemberRole::Worker,
            nickname: "Minji".to_string(),
            salary: Some(worker_salary()),
        })
        .unwrap();
    store
        .add_membership(Membership {
            id: "o1".to_string(),
            user_id: "owner".to_string(),
            workplace: cafe(),
            role: MemberRole::Owner,
            nickname: "Boss".to_string(),
            salary: None,
        })
        .unwrap();

    // Monday 18:00 to Tuesday 02:00, then two 5h day shifts
    store
        .insert_shift(store_shift("mon", "m1", "2025-03-03", "18:00:00", "2025-03-04 02:00:00"))
        .unwrap();
    store
        .insert_shift(store_shift("tue", "m1", "2025-03-04", "09:00:00", "2025-03-04 14:00:00"))
        .unwrap();
    store
        .insert_shift(store_shift("wed", "m1", "2025-03-05", "09:00:00", "2025-03-05 14:00:00"))
        .unwrap();
    store
}

/// Runs the commands a batch of shift writes would trigger.
fn recalculate_after_writes(store: &InMemoryStore, written: &[(&str, &str)]) {
    let rates = RateTable::default();
    let recalculator = Recalculator::new(store, &rates);
    let commands = coalesce(
        written
            .iter()
            .map(|(worker, date)| RecalculationCommand::week(*worker, make_date(date))),
    );
    for command in &commands {
        recalculator.execute(command, &worker_salary()).unwrap();
    }
}

// =============================================================================
// SECTION 1: Shift Income Tests
// =============================================================================

#[tokio::test]
async fn test_overnight_shift_night_premium() {
    let body = json!({
        "shift": create_shift("s1", "2025-01-01", "2025-01-01T21:00:00", Some("2025-01-02T07:00:00")),
        "night_allowance_enabled": true
    });

    let (status, result) = post(create_router_for_test(), "/shifts/income", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["earnings"]["gross_work_minutes"], 600);
    assert_eq!(result["earnings"]["night_work_minutes"], 480);
    assert_eq!(result["earnings"]["base_pay"], 100_000);
    assert_eq!(result["earnings"]["night_allowance"], 40_000);
    assert_eq!(result["earnings"]["gross_income"], 140_000);
}

#[tokio::test]
async fn test_day_shift_with_rest_and_holiday_share() {
    let mut shift = create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T17:00:00"));
    shift["rest_minutes"] = json!(60);
    shift["hourly_rate"] = json!(10030);
    let body = json!({
        "shift": shift,
        "daily_holiday_allowance_share": 16000,
        "night_allowance_enabled": true
    });

    let (status, result) = post(create_router_for_test(), "/shifts/income", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["earnings"]["night_work_minutes"], 0);
    assert_eq!(result["earnings"]["net_work_minutes"], 420);
    assert_eq!(result["earnings"]["base_pay"], 70_210);
    assert_eq!(result["earnings"]["holiday_allowance_share"], 16_000);
    assert_eq!(result["earnings"]["gross_income"], 86_210);
}

#[tokio::test]
async fn test_clock_times_override_schedule_and_truncate_seconds() {
    let mut shift = create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T17:00:00"));
    shift["actual_start"] = json!("2025-01-06T09:05:30");
    shift["actual_end"] = json!("2025-01-06T17:10:59");

    let (status, result) = post(
        create_router_for_test(),
        "/shifts/income",
        json!({ "shift": shift }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["earnings"]["gross_work_minutes"], 485);
    // 485 / 60 × 10,000 = 80,833.3
    assert_eq!(result["earnings"]["base_pay"], 80_833);
}

#[tokio::test]
async fn test_clocked_in_shift_is_open() {
    let mut shift = create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T17:00:00"));
    shift["actual_start"] = json!("2025-01-06T09:00:00");

    let body = json!({
        "shift": shift,
        "daily_holiday_allowance_share": 16000,
        "night_allowance_enabled": true
    });
    let (status, result) = post(create_router_for_test(), "/shifts/income", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["earnings"]["gross_work_minutes"], 0);
    assert_eq!(result["earnings"]["holiday_allowance_share"], 0);
    assert_eq!(result["earnings"]["gross_income"], 0);
}

// =============================================================================
// SECTION 2: Deduction Tests
// =============================================================================

#[tokio::test]
async fn test_income_threshold_applies_insurance() {
    let body = json!({
        "gross_income": 2_200_000,
        "total_work_minutes": 0,
        "salary": all_deductions_salary()
    });

    let (status, result) = post(create_router_for_test(), "/deductions", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["national_pension"], 99_000);
    assert_eq!(result["health_insurance"], 88_089);
    assert_eq!(result["employment_insurance"], 19_800);
    assert_eq!(result["income_tax"], 66_000);
    assert_eq!(result["local_income_tax"], 6_600);
    assert_eq!(result["total_deductions"], 279_489);
    assert_eq!(result["net_income"], 1_920_511);
}

#[tokio::test]
async fn test_below_both_thresholds_only_income_tax() {
    let body = json!({
        "gross_income": 2_199_999,
        "total_work_minutes": 59 * 60,
        "salary": all_deductions_salary()
    });

    let (status, result) = post(create_router_for_test(), "/deductions", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["national_pension"], 0);
    assert_eq!(result["health_insurance"], 0);
    assert_eq!(result["employment_insurance"], 0);
    assert_eq!(result["income_tax"], 65_999);
}

#[tokio::test]
async fn test_hours_threshold_applies_insurance() {
    let body = json!({
        "gross_income": 1_000_000,
        "total_work_minutes": 60 * 60,
        "salary": all_deductions_salary()
    });

    let (_, result) = post(create_router_for_test(), "/deductions", body).await;

    assert_eq!(result["national_pension"], 45_000);
    assert_eq!(result["employment_insurance"], 9_000);
}

// =============================================================================
// SECTION 3: Weekly Recalculation Tests
// =============================================================================

#[tokio::test]
async fn test_week_at_900_minutes_earns_allowance() {
    let body = json!({
        "salary": hourly_salary(),
        "shifts": [
            create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T14:00:00")),
            create_shift("s2", "2025-01-07", "2025-01-07T09:00:00", Some("2025-01-07T14:00:00")),
            create_shift("s3", "2025-01-08", "2025-01-08T09:00:00", Some("2025-01-08T14:00:00")),
        ]
    });

    let (status, result) = post(create_router_for_test(), "/weeks/recalculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["pay_basis"], "hourly");
    assert_eq!(result["week"]["weekly_work_minutes"], 900);
    assert_eq!(result["week"]["weekly_holiday_allowance"], 50_000);
    assert_eq!(result["week"]["daily_holiday_allowance_share"], 16_666);
    for shift in result["week"]["shifts"].as_array().unwrap() {
        assert_eq!(shift["earnings"]["gross_income"], 66_666);
    }
}

#[tokio::test]
async fn test_week_at_899_minutes_earns_nothing() {
    let body = json!({
        "salary": hourly_salary(),
        "shifts": [
            create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T14:00:00")),
            create_shift("s2", "2025-01-07", "2025-01-07T09:00:00", Some("2025-01-07T14:00:00")),
            create_shift("s3", "2025-01-08", "2025-01-08T09:00:00", Some("2025-01-08T13:59:00")),
        ]
    });

    let (status, result) = post(create_router_for_test(), "/weeks/recalculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["week"]["weekly_work_minutes"], 899);
    assert_eq!(result["week"]["weekly_holiday_allowance"], 0);
}

#[tokio::test]
async fn test_fixed_pay_week_is_skipped() {
    let body = json!({
        "salary": {
            "pay_cycle": { "cycle": "monthly", "pay_date_of_month": 25 },
            "pay_basis": "fixed",
            "fixed_rate": 2000000
        },
        "shifts": [
            create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T14:00:00")),
        ]
    });

    let (status, result) = post(create_router_for_test(), "/weeks/recalculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["pay_basis"], "fixed");
    assert!(result["week"].is_null());
}

// =============================================================================
// SECTION 4: Monthly Estimation Tests
// =============================================================================

#[tokio::test]
async fn test_month_estimate_spreads_deduction() {
    let mut shift = create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T17:00:00"));
    shift["earnings"] = json!({ "gross_income": 80000 });
    let body = json!({
        "salary": hourly_salary(),
        "year": 2025,
        "month": 1,
        "shifts": [shift]
    });

    let (status, result) = post(create_router_for_test(), "/months/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["estimate"]["estimated_monthly_income"], 80_000);
    assert_eq!(result["estimate"]["estimated_daily_deduction"], 2_640);
    assert_eq!(
        result["estimate"]["shifts"][0]["earnings"]["estimated_net_income"],
        77_360
    );
}

#[tokio::test]
async fn test_fixed_daily_month_multiplies_days_worked() {
    let body = json!({
        "salary": {
            "pay_cycle": { "cycle": "daily" },
            "pay_basis": "fixed",
            "fixed_rate": 90000
        },
        "year": 2025,
        "month": 1,
        "shifts": [
            create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T17:00:00")),
            create_shift("s2", "2025-01-07", "2025-01-07T09:00:00", Some("2025-01-07T17:00:00")),
            create_shift("s3", "2025-01-20", "2025-01-20T09:00:00", Some("2025-01-20T17:00:00")),
        ]
    });

    let (status, result) = post(create_router_for_test(), "/months/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["estimate"]["estimated_monthly_income"], 270_000);
    assert_eq!(result["estimate"]["estimated_total_minutes"], 1_440);
}

#[tokio::test]
async fn test_empty_month_has_no_estimate() {
    let body = json!({ "salary": hourly_salary(), "year": 2025, "month": 1, "shifts": [] });

    let (status, result) = post(create_router_for_test(), "/months/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["estimate"].is_null());
}

// =============================================================================
// SECTION 5: Recalculation Over The Store
// =============================================================================

#[test]
fn test_week_recalculation_persists_shares_and_estimates() {
    let store = seeded_store();
    recalculate_after_writes(&store, &[("m1", "2025-03-03"), ("m1", "2025-03-04"), ("m1", "2025-03-05")]);

    let mon = store.shift("mon").unwrap().unwrap();
    assert_eq!(mon.earnings.gross_work_minutes, 480);
    assert_eq!(mon.earnings.night_work_minutes, 240);
    assert_eq!(mon.earnings.base_pay, 80_000);
    assert_eq!(mon.earnings.night_allowance, 20_000);
    // 1,080 min over 3 shifts: 6h average day, 20,000 each
    assert_eq!(mon.earnings.holiday_allowance_share, 20_000);
    assert_eq!(mon.earnings.gross_income, 120_000);
    // 260,000 gross: 7,800 + 780 over 3 days
    assert_eq!(mon.earnings.estimated_net_income, 117_140);

    let tue = store.shift("tue").unwrap().unwrap();
    assert_eq!(tue.earnings.gross_income, 70_000);
    assert_eq!(tue.earnings.estimated_net_income, 67_140);
}

#[test]
fn test_deleting_a_shift_rebalances_week_and_month() {
    let store = seeded_store();
    recalculate_after_writes(&store, &[("m1", "2025-03-03")]);

    store.remove_shift("wed").unwrap();
    recalculate_after_writes(&store, &[("m1", "2025-03-05")]);

    let mon = store.shift("mon").unwrap().unwrap();
    // 780 minutes no longer qualifies
    assert_eq!(mon.earnings.holiday_allowance_share, 0);
    assert_eq!(mon.earnings.gross_income, 100_000);
    // 150,000 gross: 4,500 + 450 over 2 days
    assert_eq!(mon.earnings.estimated_net_income, 97_525);
}

#[test]
fn test_recalculation_is_idempotent() {
    let store = seeded_store();
    recalculate_after_writes(&store, &[("m1", "2025-03-03")]);
    let first: Vec<ShiftRecord> = ["mon", "tue", "wed"]
        .iter()
        .map(|id| store.shift(id).unwrap().unwrap())
        .collect();

    recalculate_after_writes(&store, &[("m1", "2025-03-03")]);
    let second: Vec<ShiftRecord> = ["mon", "tue", "wed"]
        .iter()
        .map(|id| store.shift(id).unwrap().unwrap())
        .collect();

    assert_eq!(first, second);
}

// =============================================================================
// SECTION 6: Monthly Summary Tests
// =============================================================================

#[test]
fn test_worker_summary_after_recalculation() {
    let store = seeded_store();
    recalculate_after_writes(&store, &[("m1", "2025-03-03")]);

    let rates = RateTable::default();
    let aggregator = SummaryAggregator::new(&store, &store, &rates);
    let summary = aggregator
        .summarize(Viewer::Worker, "minji", 2025, 3, make_date("2025-03-10"))
        .unwrap();

    let MonthlySummary::Worker(summary) = summary else {
        panic!("Expected worker summary");
    };
    assert_eq!(summary.workplaces.len(), 1);
    let cafe = &summary.workplaces[0];
    assert_eq!(cafe.workplace_name, "Corner Cafe");
    assert_eq!(cafe.shift_count, 3);
    assert_eq!(cafe.total_work_minutes, 1_080);
    assert_eq!(cafe.total_night_minutes, 240);
    assert_eq!(cafe.base_pay, 180_000);
    assert_eq!(cafe.night_allowance, 20_000);
    assert_eq!(cafe.holiday_allowance, 60_000);
    assert_eq!(cafe.gross_income, 260_000);
    assert_eq!(cafe.deductions.total_deductions, 8_580);
    assert_eq!(cafe.net_income, 251_420);
    assert_eq!(cafe.days_until_payday, Some(15));
    assert_eq!(summary.total_net_income, 251_420);
}

#[test]
fn test_owner_summary_after_recalculation() {
    let store = seeded_store();
    recalculate_after_writes(&store, &[("m1", "2025-03-03")]);

    let rates = RateTable::default();
    let aggregator = SummaryAggregator::new(&store, &store, &rates);
    let summary = aggregator
        .summarize(Viewer::Owner, "owner", 2025, 3, make_date("2025-03-10"))
        .unwrap();

    let MonthlySummary::Owner(summary) = summary else {
        panic!("Expected owner summary");
    };
    assert_eq!(summary.workplaces.len(), 1);
    let workers = &summary.workplaces[0].workers;
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].nickname, "Minji");
    assert_eq!(workers[0].total_work_minutes, 1_080);
    assert_eq!(workers[0].gross_income, 260_000);
    assert_eq!(workers[0].net_income, 251_420);

    // nobody worked in April
    let april = aggregator.owner_summary("owner", 2025, 4).unwrap();
    assert!(april.workplaces[0].workers.is_empty());
}

#[test]
fn test_summary_serializes_with_view_tag() {
    let store = seeded_store();
    let rates = RateTable::default();
    let aggregator = SummaryAggregator::new(&store, &store, &rates);

    let summary = aggregator
        .summarize(Viewer::Owner, "owner", 2025, 3, make_date("2025-03-10"))
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["view"], "owner");
    assert_eq!(json["user_id"], "owner");
}

// =============================================================================
// SECTION 7: Error Cases
// =============================================================================

#[test]
fn test_admin_viewer_is_rejected() {
    let store = seeded_store();
    let rates = RateTable::default();
    let aggregator = SummaryAggregator::new(&store, &store, &rates);

    let result = aggregator.summarize(Viewer::Admin, "root", 2025, 3, make_date("2025-03-10"));

    assert!(matches!(result, Err(EngineError::UnsupportedViewer { .. })));
}

#[test]
fn test_missing_config_dir_is_reported() {
    match ConfigLoader::load("./config/does-not-exist") {
        Err(EngineError::ConfigNotFound { path }) => assert!(path.ends_with("rates.yaml")),
        other => panic!("Expected ConfigNotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_shifts_from_two_workers_rejected() {
    let mut other = create_shift("s2", "2025-01-07", "2025-01-07T09:00:00", Some("2025-01-07T14:00:00"));
    other["worker_id"] = json!("worker_002");
    let body = json!({
        "salary": hourly_salary(),
        "shifts": [
            create_shift("s1", "2025-01-06", "2025-01-06T09:00:00", Some("2025-01-06T14:00:00")),
            other,
        ]
    });

    let (status, result) = post(create_router_for_test(), "/weeks/recalculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_SHIFT");
}

#[tokio::test]
async fn test_shift_outside_month_rejected() {
    let body = json!({
        "salary": hourly_salary(),
        "year": 2025,
        "month": 2,
        "shifts": [
            create_shift("s1", "2025-01-31", "2025-01-31T09:00:00", Some("2025-01-31T14:00:00")),
        ]
    });

    let (status, result) = post(create_router_for_test(), "/months/estimate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_SHIFT");
}

#[tokio::test]
async fn test_missing_shift_is_validation_error() {
    let (status, result) = post(
        create_router_for_test(),
        "/shifts/income",
        json!({ "night_allowance_enabled": true }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_wrong_type_is_malformed_json() {
    let (status, result) = post(
        create_router_for_test(),
        "/deductions",
        json!({ "gross_income": "lots", "total_work_minutes": 0, "salary": hourly_salary() }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}
