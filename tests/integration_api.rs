//! API Integration Tests
//!
//! Drive the real router end to end against fresh in-memory state.

use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{create_account, create_customer, send_get, send_json, test_app};

#[tokio::test]
async fn test_create_and_fetch_account() {
    let app = test_app();
    let customer_id = create_customer(&app, "John Doe").await;

    let (status, created) = send_json(
        &app,
        "POST",
        "/accounts/",
        json!({ "customerId": customer_id, "amount": 30.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["customerId"], customer_id);
    assert_eq!(created["amount"], 30.0);
    let account_number = created["accountNumber"].as_str().unwrap();
    assert!(!account_number.is_empty());

    let (status, fetched) = send_get(&app, &format!("/accounts/{account_number}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_supplied_account_number_is_ignored() {
    let app = test_app();
    let customer_id = create_customer(&app, "John Doe").await;

    let (status, created) = send_json(
        &app,
        "POST",
        "/accounts/",
        json!({
            "id": 999,
            "customerId": customer_id,
            "amount": 10.0,
            "accountNumber": "client-picked"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(created["accountNumber"], "client-picked");
    assert_ne!(created["id"], 999);
}

#[tokio::test]
async fn test_create_account_failures() {
    let app = test_app();
    let customer_id = create_customer(&app, "John Doe").await;

    // Unknown customer
    let (status, body) = send_json(
        &app,
        "POST",
        "/accounts/",
        json!({ "customerId": customer_id + 100, "amount": 10.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "customer_not_found");

    // Negative starting balance
    let (status, body) = send_json(
        &app,
        "POST",
        "/accounts/",
        json!({ "customerId": customer_id, "amount": -1.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_amount");
}

#[tokio::test]
async fn test_get_unknown_account() {
    let app = test_app();

    let (status, body) = send_get(&app, "/accounts/no-such-number").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "account_not_found");
}

#[tokio::test]
async fn test_get_all_accounts() {
    let app = test_app();
    let customer_id = create_customer(&app, "John Doe").await;
    let first = create_account(&app, customer_id, 250.0).await;
    let second = create_account(&app, customer_id, 300.0).await;

    let (status, body) = send_get(&app, "/accounts/all").await;
    assert_eq!(status, StatusCode::OK);
    let accounts = body.as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    let numbers: Vec<&str> = accounts
        .iter()
        .map(|a| a["accountNumber"].as_str().unwrap())
        .collect();
    assert!(numbers.contains(&first.as_str()));
    assert!(numbers.contains(&second.as_str()));
}

#[tokio::test]
async fn test_transfer_money() {
    let app = test_app();
    let customer_id = create_customer(&app, "John Doe").await;
    let from = create_account(&app, customer_id, 250.0).await;
    let to = create_account(&app, customer_id, 300.0).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/accounts/transferMoney",
        json!({
            "fromAccountNumber": from,
            "toAccountNumber": to,
            "amount": 100.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fromAccount"]["amount"], 150.0);
    assert_eq!(body["toAccount"]["amount"], 400.0);

    // The new balances are committed, not just echoed.
    let (_, from_fetched) = send_get(&app, &format!("/accounts/{from}")).await;
    let (_, to_fetched) = send_get(&app, &format!("/accounts/{to}")).await;
    assert_eq!(from_fetched["amount"], 150.0);
    assert_eq!(to_fetched["amount"], 400.0);
}

#[tokio::test]
async fn test_transfer_insufficient_funds() {
    let app = test_app();
    let customer_id = create_customer(&app, "John Doe").await;
    let from = create_account(&app, customer_id, 250.0).await;
    let to = create_account(&app, customer_id, 300.0).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/accounts/transferMoney",
        json!({
            "fromAccountNumber": from,
            "toAccountNumber": to,
            "amount": 500.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "insufficient_funds");

    // Both balances untouched.
    let (_, from_fetched) = send_get(&app, &format!("/accounts/{from}")).await;
    let (_, to_fetched) = send_get(&app, &format!("/accounts/{to}")).await;
    assert_eq!(from_fetched["amount"], 250.0);
    assert_eq!(to_fetched["amount"], 300.0);
}

#[tokio::test]
async fn test_transfer_validation_failures() {
    let app = test_app();
    let customer_id = create_customer(&app, "John Doe").await;
    let from = create_account(&app, customer_id, 250.0).await;
    let to = create_account(&app, customer_id, 300.0).await;

    for amount in [0.0, -10.0] {
        let (status, body) = send_json(
            &app,
            "POST",
            "/accounts/transferMoney",
            json!({
                "fromAccountNumber": from,
                "toAccountNumber": to,
                "amount": amount
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "invalid_amount");
    }

    let (status, body) = send_json(
        &app,
        "POST",
        "/accounts/transferMoney",
        json!({
            "fromAccountNumber": "no-such-number",
            "toAccountNumber": to,
            "amount": 10.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "account_not_found");
}

#[tokio::test]
async fn test_customer_endpoints() {
    let app = test_app();

    let (status, created) = send_json(
        &app,
        "POST",
        "/customers/",
        json!({
            "name": "Jane Dyre",
            "age": 28,
            "city": "Edgebeston",
            "phoneNumber": "9876532130"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = created["id"].as_i64().unwrap();

    let (status, fetched) = send_get(&app, &format!("/customers/{customer_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send_json(
        &app,
        "POST",
        "/customers/",
        json!({
            "name": "Too Young",
            "age": 0,
            "city": "Nowhere",
            "phoneNumber": "0"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_age");

    let (status, body) = send_get(&app, &format!("/customers/{}", customer_id + 100)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "customer_not_found");

    let (status, body) = send_get(&app, "/customers/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
