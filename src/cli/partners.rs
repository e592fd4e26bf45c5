use aitolove::api::partner;
use aitolove::matching::{all_tags, rank_partners, EmotionalProfile, Partner, PartnerFilter, Viewer};
use anyhow::{bail, Result};
use std::path::Path;

use super::{print_json, read_json, Context};

/// Print one ranked row.
pub fn print_partner_row(partner: &Partner) {
    let premium = if partner.is_premium { " [premium]" } else { "" };
    let online = if partner.is_online { "online" } else { "offline" };
    println!(
        "  {:>3}%  {:<20} {:<8}{}  {}",
        partner.compatibility,
        partner.name,
        online,
        premium,
        partner.tags.join(", ")
    );
}

pub async fn list(ctx: &Context, filter: &PartnerFilter, profile_path: Option<&Path>) -> Result<()> {
    let user = ctx.session.current_user()?;
    let plan = user.as_ref().map(|u| u.plan_tier()).unwrap_or_default();
    let profile: Option<EmotionalProfile> = match profile_path {
        Some(path) => Some(read_json(path)?),
        None => user.and_then(|u| u.emotional_profile),
    };

    let partners = partner::available_partners(&ctx.api).await?;
    let visible: Vec<Partner> = filter.apply(&partners, plan).into_iter().cloned().collect();
    let ranked = rank_partners(&visible, &Viewer::new(profile.as_ref(), plan));

    println!("Partners ({} of {})", ranked.len(), partners.len());
    println!("{}", "=".repeat(40));
    for partner in &ranked {
        print_partner_row(partner);
    }
    println!();
    println!("Tags: {}", all_tags(&partners).join(", "));
    if profile.is_none() {
        println!();
        println!("No emotional profile yet; scores are defaults. See `aitolove profile toggle`.");
    }
    Ok(())
}

pub async fn show(ctx: &Context, partner_id: &str) -> Result<()> {
    let Some(partner) = partner::partner_by_id(&ctx.api, partner_id).await? else {
        bail!("partner not found: {partner_id}");
    };

    let user = ctx.session.current_user()?;
    let plan = user.as_ref().map(|u| u.plan_tier()).unwrap_or_default();
    let profile = user.and_then(|u| u.emotional_profile);
    let score = aitolove::matching::compatibility_score(&partner, &Viewer::new(profile.as_ref(), plan));

    println!("{}", partner.name);
    println!("{}", "=".repeat(40));
    println!("  Compatibility:   {score}%");
    println!("  Personality:     {}", partner.personality);
    println!("  Tags:            {}", partner.tags.join(", "));
    println!("  Interests:       {}", partner.interests.join(", "));
    println!("  Premium:         {}", partner.is_premium);
    println!("  Online:          {}", partner.is_online);
    println!();
    println!("{}", partner.description);
    Ok(())
}

pub async fn history(ctx: &Context, partner_id: &str, page: u32, limit: u32) -> Result<()> {
    let history = partner::message_history(&ctx.api, partner_id, page, limit).await?;
    print_json(&history)
}

pub async fn send(ctx: &Context, partner_id: &str, message: &str) -> Result<()> {
    let reply = partner::send_message(&ctx.api, partner_id, message).await?;
    print_json(&reply)
}
