use aitolove::matching::{EmotionalProfile, ProfileField, Toggle};
use anyhow::{Context as _, Result};

use super::Context;

pub fn show(ctx: &Context) -> Result<()> {
    let user = ctx
        .session
        .current_user()?
        .context("not signed in; run `aitolove login` first")?;
    let profile = user.emotional_profile.unwrap_or_default();

    println!("Emotional profile for {}", user.name);
    println!("{}", "=".repeat(40));
    for field in ProfileField::ALL {
        let value = match profile.selections(field) {
            Some(items) => items.join(", "),
            None => profile.communication_style.clone(),
        };
        println!("  {:<22} {}", field.as_str(), value);
    }
    Ok(())
}

pub fn options(field: ProfileField) {
    println!("{} (up to {})", field, field.max_selections());
    for option in field.catalog() {
        println!("  {option}");
    }
}

pub fn toggle(ctx: &Context, field: ProfileField, item: &str) -> Result<()> {
    if !field.catalog().contains(&item) {
        tracing::warn!(field = %field, item, "option is not in the catalog");
    }

    let user = ctx
        .session
        .current_user()?
        .context("not signed in; run `aitolove login` first")?;
    let mut profile: EmotionalProfile = user.emotional_profile.unwrap_or_default();

    match profile.toggle(field, item) {
        Toggle::Added => println!("Added {item} to {field}"),
        Toggle::Removed => println!("Removed {item} from {field}"),
        Toggle::Replaced => println!("{field} is now {item}"),
        Toggle::AtCapacity => {
            println!(
                "{field} already has {} selections; remove one first",
                field.max_selections()
            );
            return Ok(());
        }
    }

    ctx.session.update_emotional_profile(profile)?;
    Ok(())
}
