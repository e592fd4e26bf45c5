//! Partner listing and chat endpoints.

use serde::Deserialize;
use serde_json::json;

use super::{ApiClient, ApiError, RequestOptions};
use crate::matching::Partner;

pub const DEFAULT_HISTORY_PAGE: u32 = 1;
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PartnerListResponse {
    success: bool,
    partners: Vec<Partner>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PartnerDetailsResponse {
    success: bool,
    partner: Option<Partner>,
}

#[derive(Debug, Clone, Deserialize)]
struct CompatibilityResponse {
    score: f64,
}

/// All partners. An unsuccessful listing is an empty list.
pub async fn available_partners(api: &ApiClient) -> Result<Vec<Partner>, ApiError> {
    let response: PartnerListResponse = api.fetch("/api/v1/partner", RequestOptions::get()).await?;
    Ok(if response.success {
        response.partners
    } else {
        Vec::new()
    })
}

pub async fn partner_by_id(api: &ApiClient, partner_id: &str) -> Result<Option<Partner>, ApiError> {
    let response: PartnerDetailsResponse = api
        .fetch(&format!("/api/v1/partner/{partner_id}"), RequestOptions::get())
        .await?;
    Ok(response.partner.filter(|_| response.success))
}

/// One page of chat history. Paging travels in the `X-Page`/`X-Limit` headers.
pub async fn message_history(
    api: &ApiClient,
    partner_id: &str,
    page: u32,
    limit: u32,
) -> Result<serde_json::Value, ApiError> {
    let options = RequestOptions::get()
        .header("X-Page", page.to_string())
        .header("X-Limit", limit.to_string());
    api.fetch(&format!("/api/v1/chat/{partner_id}/history"), options)
        .await
}

pub async fn send_message(
    api: &ApiClient,
    partner_id: &str,
    message: &str,
) -> Result<serde_json::Value, ApiError> {
    let options = RequestOptions::post().json(&json!({ "message": message }))?;
    api.fetch(&format!("/api/v1/chat/{partner_id}/message"), options)
        .await
}

/// Server-side compatibility score, as opposed to [`crate::matching::compatibility_score`].
pub async fn remote_compatibility(api: &ApiClient, partner_id: &str) -> Result<f64, ApiError> {
    let response: CompatibilityResponse = api
        .fetch(
            &format!("/api/v1/partner/{partner_id}/compatibility"),
            RequestOptions::get(),
        )
        .await?;
    Ok(response.score)
}
