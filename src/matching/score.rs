//! Profile-based compatibility scoring.
//!
//! A weighted point system over five categories. Categories the user left
//! empty are skipped entirely (neither numerator nor denominator). The
//! resulting fraction is mapped into `[50, 100]` so a match is never shown as
//! discouragingly low, then capped at [`PREMIUM_PREVIEW_CAP`] for premium
//! partners seen without a premium or VIP plan.

use super::profile::EmotionalProfile;
use super::types::{Partner, PlanTier};

pub const INTERESTS_WEIGHT: f64 = 30.0;
pub const IDEAL_TRAITS_WEIGHT: f64 = 25.0;
pub const COMMUNICATION_WEIGHT: f64 = 20.0;
pub const GOALS_WEIGHT: f64 = 15.0;
pub const DEAL_BREAKERS_WEIGHT: f64 = 10.0;

/// Lowest score a computed match can produce.
pub const SCORE_FLOOR: u8 = 50;

/// Highest score a premium partner may show to a viewer without premium access.
pub const PREMIUM_PREVIEW_CAP: u8 = 70;

/// Who is looking at the partner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer<'a> {
    pub profile: Option<&'a EmotionalProfile>,
    pub plan: PlanTier,
}

impl<'a> Viewer<'a> {
    pub fn new(profile: Option<&'a EmotionalProfile>, plan: PlanTier) -> Self {
        Self { profile, plan }
    }
}

/// Compute the compatibility percentage between `partner` and `viewer`.
///
/// Falls back to the partner's served `compatibility` when the viewer has no
/// profile or every category is empty. The premium cap applies to both the
/// computed and the fallback value.
pub fn compatibility_score(partner: &Partner, viewer: &Viewer<'_>) -> u8 {
    let score = viewer
        .profile
        .and_then(|profile| profile_score(partner, profile))
        .unwrap_or_else(|| partner.compatibility.min(100));

    if partner.is_premium && !viewer.plan.has_premium_access() {
        score.min(PREMIUM_PREVIEW_CAP)
    } else {
        score
    }
}

/// Weighted score in `[50, 100]`, or `None` when no category contributed.
fn profile_score(partner: &Partner, profile: &EmotionalProfile) -> Option<u8> {
    let mut score = 0.0;
    let mut total_points = 0.0;

    if !profile.interests.is_empty() {
        let shared = count_shared(&profile.interests, &partner.interests);
        score += shared as f64 / profile.interests.len() as f64 * INTERESTS_WEIGHT;
        total_points += INTERESTS_WEIGHT;
    }

    if !profile.ideal_partner_traits.is_empty() {
        let shared = count_shared(&profile.ideal_partner_traits, &partner.tags);
        score += shared as f64 / profile.ideal_partner_traits.len() as f64 * IDEAL_TRAITS_WEIGHT;
        total_points += IDEAL_TRAITS_WEIGHT;
    }

    if !profile.communication_style.is_empty() {
        if contains_ignore_case(&partner.personality, &profile.communication_style) {
            score += COMMUNICATION_WEIGHT;
        }
        total_points += COMMUNICATION_WEIGHT;
    }

    if !profile.companionship_goals.is_empty() {
        if mentions_any(&partner.description, &profile.companionship_goals) {
            score += GOALS_WEIGHT;
        }
        total_points += GOALS_WEIGHT;
    }

    if !profile.deal_breakers.is_empty() {
        if !mentions_any(&partner.description, &profile.deal_breakers) {
            score += DEAL_BREAKERS_WEIGHT;
        }
        total_points += DEAL_BREAKERS_WEIGHT;
    }

    if total_points == 0.0 {
        return None;
    }

    let raw = (score / total_points).clamp(0.0, 1.0);
    Some((raw * 50.0).round() as u8 + SCORE_FLOOR)
}

/// How many of the user's selections the partner also lists. Bounded by
/// `user_side.len()` however often the partner repeats an entry.
fn count_shared(user_side: &[String], partner_side: &[String]) -> usize {
    user_side
        .iter()
        .filter(|item| partner_side.contains(item))
        .count()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn mentions_any(text: &str, phrases: &[String]) -> bool {
    let text = text.to_lowercase();
    phrases
        .iter()
        .any(|phrase| text.contains(&phrase.to_lowercase()))
}
