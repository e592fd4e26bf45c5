use aitolove::matching::{rank_partners, EmotionalProfile, Partner, PlanTier, Viewer};
use anyhow::Result;
use std::path::Path;

use super::{partners::print_partner_row, read_json};

/// Rank a partner file against an optional profile file, offline.
pub fn score_files(profile_path: Option<&Path>, partners_path: &Path, plan: PlanTier) -> Result<()> {
    let profile: Option<EmotionalProfile> = profile_path.map(read_json::<EmotionalProfile>).transpose()?;
    let partners: Vec<Partner> = read_json(partners_path)?;

    let ranked = rank_partners(&partners, &Viewer::new(profile.as_ref(), plan));

    println!("Compatibility ({plan} plan)");
    println!("{}", "=".repeat(40));
    for partner in &ranked {
        print_partner_row(partner);
    }
    Ok(())
}
