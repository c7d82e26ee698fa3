//! API integration tests
//!
//! These run against a live server (cargo run) with a migrated database.

use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};

use deskhive_server::models::user::RenterClaims;

const BASE_URL: &str = "http://localhost:8080/api/v1";
const DEV_JWT_SECRET: &str = "change-this-secret-in-production";

/// Build a bearer token the way the external identity service would
fn token_for(email: &str, owner: bool) -> String {
    let now = Utc::now().timestamp();
    let claims = RenterClaims {
        sub: email.to_string(),
        name: None,
        owner,
        iat: now,
        exp: now + 3600,
    };
    claims
        .create_token(DEV_JWT_SECRET)
        .expect("Failed to sign test token")
}

async fn create_branch_and_office(client: &Client, owner_token: &str) -> (String, String) {
    let response = client
        .post(format!("{}/branches", BASE_URL))
        .bearer_auth(owner_token)
        .json(&json!({
            "name": "Downtown Hub",
            "street": "Av. Corrientes 1234",
            "city": "Buenos Aires"
        }))
        .send()
        .await
        .expect("Failed to create branch");
    assert_eq!(response.status(), 201);
    let branch: Value = response.json().await.expect("Invalid branch response");
    let branch_id = branch["id"].as_str().expect("No branch id").to_string();

    let response = client
        .post(format!("{}/offices", BASE_URL))
        .bearer_auth(owner_token)
        .json(&json!({
            "branch_id": branch_id,
            "name": "Corner office",
            "price": 400,
            "capacity": 4
        }))
        .send()
        .await
        .expect("Failed to create office");
    assert_eq!(response.status(), 201);
    let office: Value = response.json().await.expect("Invalid office response");
    let office_id = office["id"].as_str().expect("No office id").to_string();

    (branch_id, office_id)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_requests_require_bearer_token() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_booking_scenario_with_overlap_rejection() {
    let client = Client::new();
    let owner_token = token_for("owner@example.com", true);
    let renter_token = token_for("renter@example.com", false);
    let (_branch_id, office_id) = create_branch_and_office(&client, &owner_token).await;

    // 4 hours at 400/hr -> pending booking priced 1600
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({
            "office_id": office_id,
            "start_time": "2031-12-08T14:00:00Z",
            "end_time": "2031-12-08T18:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);
    let booking: Value = response.json().await.expect("Invalid booking response");
    assert_eq!(booking["status"], "Pending");
    let price: f64 = booking["price"]
        .as_str()
        .expect("Price should be a decimal string")
        .parse()
        .expect("Price should parse");
    assert_eq!(price, 1600.0);

    // An overlapping request for the same office fails
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({
            "office_id": office_id,
            "start_time": "2031-12-08T15:00:00Z",
            "end_time": "2031-12-08T16:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send overlapping booking");
    assert_eq!(response.status(), 409);

    // The pending booking shows up as an occupied slot
    let response = client
        .get(format!(
            "{}/offices/{}/occupied-slots?date=2031-12-08",
            BASE_URL, office_id
        ))
        .bearer_auth(&renter_token)
        .send()
        .await
        .expect("Failed to fetch occupied slots");
    assert!(response.status().is_success());
    let slots: Value = response.json().await.expect("Invalid slots response");
    assert_eq!(slots.as_array().map(|s| s.len()), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_non_hour_aligned_booking_is_rejected() {
    let client = Client::new();
    let owner_token = token_for("owner@example.com", true);
    let renter_token = token_for("renter@example.com", false);
    let (_branch_id, office_id) = create_branch_and_office(&client, &owner_token).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({
            "office_id": office_id,
            "start_time": "2031-12-09T14:30:00Z",
            "end_time": "2031-12-09T16:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_inactivity_rules_do_not_block_bookings() {
    let client = Client::new();
    let owner_token = token_for("owner@example.com", true);
    let renter_token = token_for("renter@example.com", false);
    let (_branch_id, office_id) = create_branch_and_office(&client, &owner_token).await;

    // Close the office on every Monday
    let response = client
        .post(format!("{}/offices/{}/inactivities", BASE_URL, office_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "weekday": 0 }))
        .send()
        .await
        .expect("Failed to create inactivity");
    assert_eq!(response.status(), 201);

    // 2031-12-08 is a Monday; the booking still goes through on
    // overlap/deletion checks alone.
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({
            "office_id": office_id,
            "start_time": "2031-12-08T09:00:00Z",
            "end_time": "2031-12-08T11:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_webhook_always_acknowledges() {
    let client = Client::new();

    // Unknown action on a random booking id: acknowledged, nothing done
    let response = client
        .post(format!(
            "{}/webhooks/payments/bookings/{}",
            BASE_URL,
            uuid::Uuid::new_v4()
        ))
        .json(&json!({
            "id": 12345,
            "live_mode": false,
            "type": "test",
            "action": "test.created",
            "data": { "id": "1" }
        }))
        .send()
        .await
        .expect("Failed to post webhook");
    assert_eq!(response.status(), 200);

    // Even an unparseable body is acknowledged
    let response = client
        .post(format!(
            "{}/webhooks/payments/bookings/{}",
            BASE_URL,
            uuid::Uuid::new_v4()
        ))
        .body("not json")
        .send()
        .await
        .expect("Failed to post webhook");
    assert_eq!(response.status(), 200);
}
