use aitolove::api::auth::{self, RegisterRequest};
use anyhow::{bail, Result};

use super::Context;

pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let response = auth::login(&ctx.api, email, password).await?;
    ctx.session.sign_in(&response.token, &response.user)?;

    println!("Signed in as {} <{}>", response.user.name, response.user.email);
    println!("  Plan:            {}", response.user.plan_tier());
    if !response.user.email_verified {
        println!("  Email not verified yet; check your inbox.");
    }
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.session.sign_out()?;
    println!("Signed out.");
    Ok(())
}

pub async fn register(ctx: &Context, request: RegisterRequest) -> Result<()> {
    if !request.accepted_terms_and_conditions {
        bail!("you must accept the terms and conditions (--accept-terms)");
    }

    let response = auth::register(&ctx.api, &request).await?;
    if !response.success {
        bail!(
            "registration failed: {}",
            response.message.as_deref().unwrap_or("no reason given")
        );
    }

    ctx.session.remember_registration(&request.name, &request.email)?;
    println!("Account created for {}.", request.email);
    if let Some(user_id) = response.user_id {
        println!("Choose a plan to finish: aitolove plan select <plan> --user {user_id}");
    }
    Ok(())
}

pub async fn verify_email(ctx: &Context, token: &str) -> Result<()> {
    let response = auth::verify_email(&ctx.api, token).await?;
    if !response.success {
        bail!(
            "verification failed: {}",
            response.message.as_deref().unwrap_or("invalid or expired token")
        );
    }

    if ctx.session.current_user()?.is_some() {
        ctx.session.mark_email_verified()?;
    }
    println!("Email verified.");
    Ok(())
}

pub async fn forgot_password(ctx: &Context, email: &str) -> Result<()> {
    let response = auth::request_password_reset(&ctx.api, email).await?;
    match response.message {
        Some(message) => println!("{message}"),
        None => println!("If {email} has an account, a reset link is on its way."),
    }
    Ok(())
}

pub async fn reset_password(ctx: &Context, token: &str, password: &str) -> Result<()> {
    let response = auth::reset_password(&ctx.api, token, password).await?;
    if !response.success {
        bail!(
            "password reset failed: {}",
            response.message.as_deref().unwrap_or("invalid or expired token")
        );
    }
    println!("Password updated. You can sign in now.");
    Ok(())
}
