use aitolove::api::{auth, payment, plan};
use aitolove::matching::PlanTier;
use anyhow::{bail, Result};

use super::{print_json, Context};

pub async fn list(ctx: &Context) -> Result<()> {
    let plans = plan::active_plans_or_default(&ctx.api).await;

    println!("Plans");
    println!("{}", "=".repeat(40));
    for p in &plans {
        let d = &p.details;
        let conversations = match d.max_conversation_limit {
            0 => "unlimited".to_string(),
            n => n.to_string(),
        };
        println!("  {:<12} R$ {:>6.2}/{}  [{}]", d.name, d.price, d.billing_cycle, p.id);
        println!("    {}", d.description);
        println!(
            "    conversations: {conversations}, voice: {}, video: {}, exclusive content: {}",
            d.has_voice_calls, d.has_video_calls, d.list_of_exclusive_content
        );
    }
    Ok(())
}

pub async fn current(ctx: &Context) -> Result<()> {
    let plan = plan::user_plan(&ctx.api).await?;
    print_json(&plan)
}

/// Pick a plan. With `user_id` this is the second registration step and the
/// plan is a tier name; otherwise it switches the signed-in user's plan id.
pub async fn select(ctx: &Context, plan_ref: &str, user_id: Option<&str>) -> Result<()> {
    match user_id {
        Some(user_id) => {
            let tier: PlanTier = plan_ref.parse().map_err(anyhow::Error::msg)?;
            let response = auth::select_plan(&ctx.api, user_id, tier.as_str()).await?;
            if !response.success {
                bail!(
                    "plan selection failed: {}",
                    response.message.as_deref().unwrap_or("no reason given")
                );
            }
            let (name, email) = ctx.session.take_registration()?;
            println!(
                "Plan {tier} selected for {}. Verify {} and then sign in.",
                name.as_deref().unwrap_or("new user"),
                email.as_deref().unwrap_or("your email")
            );
        }
        None => {
            let response = plan::select_plan(&ctx.api, plan_ref).await?;
            ctx.session.select_plan_id(plan_ref)?;
            if let Some(user) = ctx.session.current_user()? {
                let plans = plan::active_plans_or_default(&ctx.api).await;
                if let Some(chosen) = plans.iter().find(|p| p.id == plan_ref) {
                    ctx.session.set_plan(chosen.tier())?;
                    tracing::info!(user = %user.id, tier = %chosen.tier(), "cached plan updated");
                }
            }
            print_json(&response)?;
        }
    }
    Ok(())
}

pub async fn checkout(ctx: &Context, plan_id: &str) -> Result<()> {
    let session = payment::create_payment_session(&ctx.api, plan_id).await?;
    ctx.session.select_plan_id(plan_id)?;
    print_json(&session)
}

pub async fn create_payment(ctx: &Context, user_id: &str, plan_id: &str) -> Result<()> {
    let response = payment::create_payment(&ctx.api, user_id, plan_id).await?;
    if !response.success {
        bail!(
            "payment failed: {}",
            response.message.as_deref().unwrap_or("no reason given")
        );
    }
    println!(
        "Transaction {} is {}",
        response.transaction_id.as_deref().unwrap_or("(pending id)"),
        response.status.as_deref().unwrap_or("created")
    );
    Ok(())
}

pub async fn payment_status(ctx: &Context, transaction_id: &str) -> Result<()> {
    let response = payment::payment_status(&ctx.api, transaction_id).await?;
    println!(
        "Transaction {transaction_id}: {}",
        response.status.as_deref().unwrap_or("unknown")
    );
    if let Some(message) = response.message {
        println!("  {message}");
    }
    Ok(())
}

pub async fn session_status(ctx: &Context, session_id: &str) -> Result<()> {
    let status = payment::payment_session_status(&ctx.api, session_id).await?;
    print_json(&status)
}

pub async fn history(ctx: &Context) -> Result<()> {
    let history = payment::payment_history(&ctx.api).await?;
    print_json(&history)
}
