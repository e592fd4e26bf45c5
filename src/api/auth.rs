//! Account endpoints: login, registration, email verification, password reset.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ApiError, RequestOptions};
use crate::session::User;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Body of the registration call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub cpf: String,
    pub accepted_terms_and_conditions: bool,
    /// ISO date, `YYYY-MM-DD`.
    pub birthdate: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: Option<String>,
    pub message: Option<String>,
}

/// Outcome of verification and password-reset calls.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    pub success: bool,
    pub message: Option<String>,
}

pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let options = RequestOptions::post().json(&json!({ "email": email, "password": password }))?;
    api.fetch("/api/v1/user/login", options).await
}

pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
    api.fetch("/api/v1/user/register", RequestOptions::post().json(request)?)
        .await
}

pub async fn verify_email(api: &ApiClient, token: &str) -> Result<StatusResponse, ApiError> {
    api.fetch(&format!("/api/v1/user/verify-email/{token}"), RequestOptions::post())
        .await
}

pub async fn request_password_reset(api: &ApiClient, email: &str) -> Result<StatusResponse, ApiError> {
    let options = RequestOptions::post().json(&json!({ "email": email }))?;
    api.fetch("/api/v1/user/forgot-password", options).await
}

pub async fn reset_password(
    api: &ApiClient,
    token: &str,
    new_password: &str,
) -> Result<StatusResponse, ApiError> {
    let options = RequestOptions::post().json(&json!({ "password": new_password }))?;
    api.fetch(&format!("/api/v1/user/reset-password/{token}"), options)
        .await
}

/// Second registration step: attach a plan to a freshly registered user.
pub async fn select_plan(api: &ApiClient, user_id: &str, plan: &str) -> Result<RegisterResponse, ApiError> {
    let options = RequestOptions::post().json(&json!({ "userId": user_id, "plan": plan }))?;
    api.fetch("/api/v1/user/select-plan", options).await
}
