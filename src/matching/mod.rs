pub mod profile;
pub mod score;
pub mod types;

pub use profile::{EmotionalProfile, ProfileField, Toggle};
pub use score::{compatibility_score, Viewer};
pub use types::{Partner, PlanTier};

/// Score every partner for `viewer` and order them best match first.
///
/// Returns copies with `compatibility` overwritten. Equal scores keep their
/// input order.
pub fn rank_partners(partners: &[Partner], viewer: &Viewer<'_>) -> Vec<Partner> {
    let mut ranked: Vec<Partner> = partners
        .iter()
        .map(|partner| Partner {
            compatibility: compatibility_score(partner, viewer),
            ..partner.clone()
        })
        .collect();
    ranked.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));
    ranked
}

/// Browse filters for the partner listing.
#[derive(Debug, Clone, Default)]
pub struct PartnerFilter {
    /// Case-insensitive text matched against name, description, personality, and interests.
    pub search: String,
    /// Keep partners carrying any of these tags. Empty keeps all.
    pub tags: Vec<String>,
    pub online_only: bool,
}

impl PartnerFilter {
    /// Whether `partner` passes the filter for a viewer on `plan`.
    /// Premium partners are hidden from viewers without premium access.
    pub fn matches(&self, partner: &Partner, plan: PlanTier) -> bool {
        let search = self.search.to_lowercase();
        let search_match = partner.name.to_lowercase().contains(&search)
            || partner.description.to_lowercase().contains(&search)
            || partner.personality.to_lowercase().contains(&search)
            || partner
                .interests
                .iter()
                .any(|interest| interest.to_lowercase().contains(&search));

        let tag_match = self.tags.is_empty() || self.tags.iter().any(|t| partner.tags.contains(t));
        let online_match = !self.online_only || partner.is_online;
        let plan_match = !partner.is_premium || plan.has_premium_access();

        search_match && tag_match && online_match && plan_match
    }

    pub fn apply<'p>(&self, partners: &'p [Partner], plan: PlanTier) -> Vec<&'p Partner> {
        partners.iter().filter(|p| self.matches(p, plan)).collect()
    }
}

/// Every tag used by any partner, sorted and de-duplicated.
pub fn all_tags(partners: &[Partner]) -> Vec<String> {
    let tags: std::collections::BTreeSet<&String> =
        partners.iter().flat_map(|p| p.tags.iter()).collect();
    tags.into_iter().cloned().collect()
}
