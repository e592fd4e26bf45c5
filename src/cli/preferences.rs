use aitolove::api::preferences::{self, Preference};
use anyhow::{Context as _, Result};

use super::{print_json, Context};

pub async fn show(ctx: &Context) -> Result<()> {
    let prefs = preferences::user_preferences(&ctx.api).await?;
    print_json(&prefs)
}

pub async fn all(ctx: &Context) -> Result<()> {
    let all = preferences::all_preferences(&ctx.api).await?;
    for pref in &all {
        for entry in &pref.preferences {
            println!("  {:<16} {:<20} {}", entry.category, entry.name, entry.value);
        }
    }
    Ok(())
}

/// Load the user's preferences, change one value, and save the record.
pub async fn set(ctx: &Context, category: &str, name: &str, value: &str) -> Result<()> {
    let current = preferences::user_preferences(&ctx.api).await?;
    let mut prefs = Preference::from_stored(current)
        .context("unexpected shape for saved preferences; refusing to overwrite")?;
    prefs.set_value(category, name, value);

    let saved = preferences::set_user_preferences(&ctx.api, &prefs).await?;
    println!(
        "{category}/{name} = {}",
        saved.value_of(category, name).unwrap_or(value)
    );
    Ok(())
}

pub async fn reset(ctx: &Context) -> Result<()> {
    let response = preferences::reset_user_preferences(&ctx.api).await?;
    print_json(&response)
}
