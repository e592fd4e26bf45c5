//! Payment transactions and checkout sessions.

use serde::Deserialize;
use serde_json::json;

use super::{ApiClient, ApiError, RequestOptions};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentResponse {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}

pub async fn create_payment(
    api: &ApiClient,
    user_id: &str,
    plan_id: &str,
) -> Result<PaymentResponse, ApiError> {
    let options = RequestOptions::post().json(&json!({ "userId": user_id, "planId": plan_id }))?;
    api.fetch("/api/v1/payment", options).await
}

pub async fn payment_status(api: &ApiClient, transaction_id: &str) -> Result<PaymentResponse, ApiError> {
    api.fetch(&format!("/api/v1/payment/{transaction_id}"), RequestOptions::get())
        .await
}

/// Start a hosted checkout session for `plan_id`.
pub async fn create_payment_session(api: &ApiClient, plan_id: &str) -> Result<serde_json::Value, ApiError> {
    let options = RequestOptions::post().json(&json!({ "planId": plan_id }))?;
    api.fetch("/api/v1/payment/create-session", options).await
}

pub async fn payment_session_status(
    api: &ApiClient,
    session_id: &str,
) -> Result<serde_json::Value, ApiError> {
    api.fetch(&format!("/api/v1/payment/status/{session_id}"), RequestOptions::new())
        .await
}

pub async fn payment_history(api: &ApiClient) -> Result<serde_json::Value, ApiError> {
    api.fetch("/api/v1/payment/history", RequestOptions::new())
        .await
}
