//! Subscription plan endpoints and the built-in fallback catalog.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ApiError, RequestOptions};
use crate::matching::PlanTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(flatten)]
    pub details: NewPlan,
}

/// A plan without the server-assigned `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub billing_cycle: String,
    /// `0` means unlimited.
    #[serde(default)]
    pub max_conversation_limit: u32,
    #[serde(default)]
    pub has_voice_calls: bool,
    #[serde(default)]
    pub has_video_calls: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub list_of_exclusive_content: u32,
}

impl Plan {
    pub fn tier(&self) -> PlanTier {
        PlanTier::from_plan_name(&self.details.name)
    }
}

pub async fn active_plans(api: &ApiClient) -> Result<Vec<Plan>, ApiError> {
    api.fetch("/api/v1/plan", RequestOptions::get()).await
}

/// Active plans, or [`default_plans`] when the listing fails or is empty.
pub async fn active_plans_or_default(api: &ApiClient) -> Vec<Plan> {
    match active_plans(api).await {
        Ok(plans) if !plans.is_empty() => plans,
        Ok(_) => {
            tracing::info!("plan listing empty, using built-in plans");
            default_plans()
        }
        Err(err) => {
            tracing::warn!(error = %err, "plan listing failed, using built-in plans");
            default_plans()
        }
    }
}

pub async fn create_plan(api: &ApiClient, plan: &NewPlan) -> Result<Plan, ApiError> {
    api.fetch("/api/v1/plan", RequestOptions::post().json(plan)?)
        .await
}

pub async fn plan_by_id(api: &ApiClient, plan_id: &str) -> Result<Plan, ApiError> {
    api.fetch(&format!("/api/v1/plan/{plan_id}"), RequestOptions::get())
        .await
}

pub async fn available_plans(api: &ApiClient) -> Result<serde_json::Value, ApiError> {
    api.fetch("/api/v1/plans", RequestOptions::new()).await
}

pub async fn user_plan(api: &ApiClient) -> Result<serde_json::Value, ApiError> {
    api.fetch("/api/v1/user/plan", RequestOptions::new()).await
}

/// Switch the signed-in user's plan.
pub async fn select_plan(api: &ApiClient, plan_id: &str) -> Result<serde_json::Value, ApiError> {
    let options = RequestOptions::post().json(&json!({ "planId": plan_id }))?;
    api.fetch("/api/v1/user/select-plan", options).await
}

/// First plan whose display name belongs to `tier`.
pub fn find_plan_by_tier(plans: &[Plan], tier: PlanTier) -> Option<&Plan> {
    plans.iter().find(|plan| tier.matches_plan_name(&plan.details.name))
}

/// Catalog shown when the backend cannot list plans.
pub fn default_plans() -> Vec<Plan> {
    let plan = |id: &str, name: &str, description: &str, price: f64, voice: bool, video: bool, exclusive: u32| Plan {
        id: id.to_string(),
        created_at: String::new(),
        details: NewPlan {
            name: name.to_string(),
            description: description.to_string(),
            price,
            billing_cycle: "monthly".to_string(),
            max_conversation_limit: if price == 0.0 { 5 } else { 0 },
            has_voice_calls: voice,
            has_video_calls: video,
            is_active: true,
            list_of_exclusive_content: exclusive,
        },
    };

    vec![
        plan("basic_default", "Básico", "Para quem está começando a explorar.", 0.0, false, false, 0),
        plan("premium_default", "Premium", "Para quem deseja uma experiência mais completa.", 29.9, true, false, 5),
        plan("vip_default", "VIP", "A experiência definitiva para conexões profundas.", 49.9, true, true, 15),
    ]
}
