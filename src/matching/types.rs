//! Partner and plan tier definitions.
//!
//! Defines [`Partner`] (a companion record as served by the backend) and
//! [`PlanTier`] (the viewer's subscription level).

use serde::{Deserialize, Serialize};

/// Subscription tier of the viewing user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Basic,
    Premium,
    Vip,
    /// No plan selected yet (the backend sends `null`).
    #[default]
    #[serde(other)]
    Unset,
}

/// Display names the plan catalog uses for each tier, lowercase.
const BASIC_NAMES: &[&str] = &["básico", "basico", "basic", "gratuito", "free"];
const PREMIUM_NAMES: &[&str] = &["premium", "intermediário", "intermediario"];
const VIP_NAMES: &[&str] = &["vip", "avançado", "avancado", "pro", "professional"];

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Vip => "vip",
            Self::Unset => "unset",
        }
    }

    /// Whether this tier unlocks premium partners at full compatibility.
    pub fn has_premium_access(&self) -> bool {
        match self {
            Self::Premium | Self::Vip => true,
            Self::Basic | Self::Unset => false,
        }
    }

    /// Display names a catalog plan may carry for this tier.
    pub fn plan_names(&self) -> &'static [&'static str] {
        match self {
            Self::Basic => BASIC_NAMES,
            Self::Premium => PREMIUM_NAMES,
            Self::Vip => VIP_NAMES,
            Self::Unset => &[],
        }
    }

    /// Whether a catalog plan name belongs to this tier (case-insensitive containment).
    pub fn matches_plan_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.plan_names().iter().any(|alias| name.contains(alias))
    }

    /// Infer the tier from a catalog plan display name. Basic aliases are
    /// tried first, then premium, then VIP.
    pub fn from_plan_name(name: &str) -> Self {
        [Self::Basic, Self::Premium, Self::Vip]
            .into_iter()
            .find(|tier| tier.matches_plan_name(name))
            .unwrap_or(Self::Unset)
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            "vip" => Ok(Self::Vip),
            "unset" | "none" => Ok(Self::Unset),
            _ => Err(format!("unknown plan tier: {s}")),
        }
    }
}

/// A companion as listed by `/api/v1/partner`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub avatar: String,
    /// Free-text blurb, matched against companionship goals and deal-breakers.
    pub description: String,
    /// Personality descriptors, matched against the user's ideal partner traits.
    pub tags: Vec<String>,
    /// Free-text personality, matched against the user's communication style.
    pub personality: String,
    pub is_online: bool,
    pub is_premium: bool,
    pub interests: Vec<String>,
    /// Display score. Served as a static default, overwritten by ranking.
    #[serde(deserialize_with = "deserialize_percentage")]
    pub compatibility: u8,
}

/// Accept any JSON number (or `null`) and clamp it into `0..=100`.
fn deserialize_percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(value.round().clamp(0.0, 100.0) as u8)
}
