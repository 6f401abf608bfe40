//! Integration tests for the analytics endpoints.
//!
//! Fixed past years keep the expectations independent of today's date.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde_json::json;

async fn seed_acme(client: &TestClient) -> String {
    let id = client.create_company("all", "Acme").await;
    client.record_payment("all", &id, 100.0, "2024-01-15").await;
    client.record_payment("all", &id, 50.0, "2024-03-10").await;
    id
}

#[tokio::test]
async fn test_summary_for_past_year() {
    let client = TestClient::new();
    seed_acme(&client).await;
    client.create_company("all", "Dormant").await;

    let (status, body) = client.get_json("/api/all/analytics/summary?year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "All Stocks");
    assert_eq!(body["total_cents"], 15000);
    assert_eq!(body["total_formatted"], "£150.00");
    assert_eq!(body["months_considered"], 12);
    // 15000 / 12 = 1250
    assert_eq!(body["average_per_month_cents"], 1250);
    assert_eq!(body["average_formatted"], "£12.50");
    assert_eq!(body["payment_count"], 2);
    assert_eq!(body["company_count"], 2);
    assert_eq!(body["paying_company_count"], 1);
    assert_eq!(body["largest_payment_cents"], 10000);
    assert_eq!(body["monthly"][0], 10000);
    assert_eq!(body["monthly"][2], 5000);
}

#[tokio::test]
async fn test_summary_applies_tax_rate() {
    let client = TestClient::new();
    let id = client.create_company("all", "Acme").await;
    client.record_payment("all", &id, 1000.0, "2023-06-01").await;

    let (status, _) = client
        .put_json("/api/settings", json!({ "tax_rate": 7.5 }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = client.get_json("/api/all/analytics/summary?year=2023").await;
    assert_eq!(body["tax"]["gross_cents"], 100000);
    assert_eq!(body["tax"]["tax_paid_cents"], 7500);
    assert_eq!(body["tax"]["net_cents"], 92500);
    assert_eq!(body["net_formatted"], "£925.00");
}

#[tokio::test]
async fn test_empty_year_summary() {
    let client = TestClient::new();

    let (status, body) = client.get_json("/api/isa/analytics/summary?year=2022").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "ISA Stocks and Shares");
    assert_eq!(body["total_cents"], 0);
    assert_eq!(body["average_per_month_cents"], 0);
}

#[tokio::test]
async fn test_monthly_breakdown() {
    let client = TestClient::new();
    seed_acme(&client).await;

    let (status, body) = client.get_json("/api/all/analytics/monthly?year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_data"], true);
    assert_eq!(body["buckets"].as_array().unwrap().len(), 12);
    assert_eq!(body["buckets"][0], 10000);
    assert_eq!(body["buckets"][1], 0);

    let rows = body["breakdown"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0]["month"], "January");
    assert_eq!(rows[0]["payment_count"], 1);
    assert_eq!(rows[2]["total_cents"], 5000);
    assert_eq!(body["breakdown"]["year_to_date_cents"], 15000);
}

#[tokio::test]
async fn test_averages_use_active_months_across_history() {
    let client = TestClient::new();
    let acme = client.create_company("all", "Acme").await;
    let globex = client.create_company("all", "Globex").await;
    client.create_company("all", "Dormant").await;

    // Acme: two payments in one month, one in another year -> 2 active months.
    client.record_payment("all", &acme, 10.0, "2023-05-01").await;
    client.record_payment("all", &acme, 10.0, "2023-05-20").await;
    client.record_payment("all", &acme, 40.0, "2024-05-01").await;
    // Globex: one active month.
    client.record_payment("all", &globex, 25.0, "2024-07-01").await;

    let (status, body) = client.get_json("/api/all/analytics/averages").await;
    assert_eq!(status, StatusCode::OK);

    let companies = body["companies"].as_array().unwrap();
    assert_eq!(companies.len(), 2, "companies without income are left out");
    assert_eq!(companies[0]["name"], "Acme");
    assert_eq!(companies[0]["average_cents"], 3000);
    assert_eq!(companies[0]["active_months"], 2);
    assert_eq!(companies[0]["average_formatted"], "£30.00");
    assert_eq!(companies[1]["name"], "Globex");
    assert_eq!(companies[1]["average_cents"], 2500);
}

#[tokio::test]
async fn test_distribution_percentages() {
    let client = TestClient::new();
    let acme = client.create_company("all", "Acme").await;
    let globex = client.create_company("all", "Globex").await;
    client.create_company("all", "Dormant").await;
    client.record_payment("all", &acme, 30.0, "2024-02-01").await;
    client.record_payment("all", &globex, 10.0, "2024-02-01").await;

    let (_, body) = client
        .get_json("/api/all/analytics/distribution?year=2024")
        .await;
    assert_eq!(body["total_cents"], 4000);

    let slices = body["slices"].as_array().unwrap();
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0]["name"], "Acme");
    assert_eq!(slices[0]["percentage"], 75.0);
    assert_eq!(slices[1]["percentage"], 25.0);
}

#[tokio::test]
async fn test_compare_two_years() {
    let client = TestClient::new();
    let id = client.create_company("all", "Acme").await;
    client.record_payment("all", &id, 100.0, "2023-01-10").await;
    client.record_payment("all", &id, 150.0, "2024-01-10").await;
    client.record_payment("all", &id, 20.0, "2024-02-10").await;
    client.record_payment("all", &id, 40.0, "2023-03-10").await;

    let (status, body) = client
        .get_json("/api/all/analytics/compare?year1=2023&year2=2024")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year1"], 2023);
    assert_eq!(body["year2"], 2024);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 12);

    // January: 100 -> 150
    assert_eq!(rows[0]["month"], "January");
    assert_eq!(rows[0]["difference_cents"], 5000);
    assert_eq!(rows[0]["percent_change"], 50.0);
    assert_eq!(rows[0]["percent_formatted"], "+50.0%");

    // February: nothing -> 20 counts as new income.
    assert_eq!(rows[1]["percent_change"], 100.0);
    assert_eq!(rows[1]["percent_formatted"], "+100.0%");

    // March: 40 -> nothing
    assert_eq!(rows[2]["percent_change"], -100.0);
    assert_eq!(rows[2]["percent_formatted"], "-100.0%");

    // April: nothing either year.
    assert!(rows[3]["percent_change"].is_null());
    assert_eq!(rows[3]["percent_formatted"], "N/A");

    assert_eq!(body["totals"]["month"], "Total");
    assert_eq!(body["totals"]["year1_cents"], 14000);
    assert_eq!(body["totals"]["year2_cents"], 17000);
}

#[tokio::test]
async fn test_compare_rejects_unsupported_year() {
    let client = TestClient::new();

    let (status, _) = client
        .get("/api/all/analytics/compare?year1=1990&year2=2024")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analytics_respect_owner() {
    let client = TestClient::new();
    seed_acme(&client).await;

    let (_, body) = client
        .as_owner("someone-else")
        .get_json("/api/all/analytics/summary?year=2024")
        .await;
    assert_eq!(body["total_cents"], 0);
}
