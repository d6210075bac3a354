//! API Routes
//!
//! HTTP endpoint definitions. Wire names are camelCase; the account balance
//! travels as `amount`. Server-generated fields (`id`, `accountNumber`)
//! arriving in a create body are ignored.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, Customer};
use crate::error::AppError;

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub customer_id: i64,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_number: String,
    pub to_account_number: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub from_account: Account,
    pub to_account: Account,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub age: i32,
    pub city: String,
    pub phone_number: String,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Accounts
        .route("/accounts", post(create_account))
        .route("/accounts/", post(create_account))
        .route("/accounts/all", get(get_all_accounts))
        .route("/accounts/transferMoney", post(transfer_money))
        .route("/accounts/:account_number", get(get_account))
        // Customers
        .route("/customers", post(create_customer))
        .route("/customers/", post(create_customer))
        .route("/customers/all", get(get_all_customers))
        .route("/customers/:customer_id", get(get_customer))
}

// =========================================================================
// Account endpoints
// =========================================================================

async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let account = state
        .accounts
        .create_account(request.customer_id, request.amount)?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn get_account(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<Account>, AppError> {
    let account = state.accounts.get_account(&account_number)?;
    Ok(Json(account))
}

async fn transfer_money(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let (from_account, to_account) = state
        .accounts
        .transfer_money(
            &request.from_account_number,
            &request.to_account_number,
            request.amount,
        )
        .await?;

    Ok(Json(TransferResponse {
        from_account,
        to_account,
    }))
}

async fn get_all_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    Json(state.accounts.get_all_accounts())
}

// =========================================================================
// Customer endpoints
// =========================================================================

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let customer = state.customers.add_customer(
        &request.name,
        request.age,
        &request.city,
        &request.phone_number,
    )?;
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<Json<Customer>, AppError> {
    let customer = state.customers.get_customer(customer_id)?;
    Ok(Json(customer))
}

async fn get_all_customers(State(state): State<AppState>) -> Json<Vec<Customer>> {
    Json(state.customers.get_all_customers())
}
