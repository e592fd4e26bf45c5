mod cli;

use aitolove::config::AppConfig;
use aitolove::matching::{PlanTier, ProfileField};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aitolove", version, about = "Terminal client for the AI to Love companion service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Create an account (first step; choose a plan next)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        cpf: String,
        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birthdate: String,
        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },
    /// Confirm an email address with the token from the verification mail
    VerifyEmail { token: String },
    /// Request a password reset email
    ForgotPassword { email: String },
    /// Set a new password with the token from the reset email
    ResetPassword { token: String, password: String },
    /// List partners ranked by compatibility with your profile
    Partners {
        /// Only partners mentioning this text
        #[arg(long, default_value = "")]
        search: String,
        /// Only partners with any of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        online: bool,
        /// Score against this profile JSON instead of the cached one
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Show one partner
    Partner { id: String },
    /// Chat with a partner
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },
    /// List subscription plans
    Plans,
    /// Manage your plan
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// Payments and checkout sessions
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },
    /// Server-side preferences
    Preferences {
        #[command(subcommand)]
        action: PreferencesAction,
    },
    /// Edit your emotional profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Score partners from JSON files without contacting the server
    Score {
        /// Emotional profile JSON
        #[arg(long)]
        profile: Option<PathBuf>,
        /// JSON array of partners
        #[arg(long)]
        partners: PathBuf,
        #[arg(long, default_value = "unset")]
        plan: PlanTier,
    },
}

#[derive(Subcommand)]
enum ChatAction {
    /// Show a page of message history
    History {
        partner_id: String,
        #[arg(long, default_value_t = aitolove::api::partner::DEFAULT_HISTORY_PAGE)]
        page: u32,
        #[arg(long, default_value_t = aitolove::api::partner::DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },
    /// Send a message
    Send { partner_id: String, message: String },
}

#[derive(Subcommand)]
enum PlanAction {
    /// Show your current plan
    Show,
    /// Choose a plan. With --user, completes a pending registration
    Select {
        plan: String,
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
enum PaymentAction {
    /// Open a checkout session for a plan
    Checkout { plan_id: String },
    /// Create a payment transaction
    Create {
        #[arg(long)]
        user: String,
        plan_id: String,
    },
    /// Show a transaction
    Status { transaction_id: String },
    /// Show a checkout session
    Session { session_id: String },
    /// List past payments
    History,
}

#[derive(Subcommand)]
enum PreferencesAction {
    /// Show your preferences
    Show,
    /// List every preference the server knows
    All,
    /// Set one preference value
    Set {
        category: String,
        name: String,
        value: String,
    },
    /// Restore default preferences
    Reset,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the cached emotional profile
    Show,
    /// List the options for a field
    Options { field: ProfileField },
    /// Select or deselect an option
    Toggle { field: ProfileField, item: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = cli::Context::open(config)?;

    match cli.command {
        Command::Login { email, password } => cli::account::login(&ctx, &email, &password).await?,
        Command::Logout => cli::account::logout(&ctx)?,
        Command::Register {
            name,
            email,
            password,
            cpf,
            birthdate,
            accept_terms,
        } => {
            let request = aitolove::api::auth::RegisterRequest {
                name,
                email,
                password,
                cpf,
                accepted_terms_and_conditions: accept_terms,
                birthdate,
            };
            cli::account::register(&ctx, request).await?
        }
        Command::VerifyEmail { token } => cli::account::verify_email(&ctx, &token).await?,
        Command::ForgotPassword { email } => cli::account::forgot_password(&ctx, &email).await?,
        Command::ResetPassword { token, password } => {
            cli::account::reset_password(&ctx, &token, &password).await?
        }
        Command::Partners {
            search,
            tags,
            online,
            profile,
        } => {
            let filter = aitolove::matching::PartnerFilter {
                search,
                tags,
                online_only: online,
            };
            cli::partners::list(&ctx, &filter, profile.as_deref()).await?
        }
        Command::Partner { id } => cli::partners::show(&ctx, &id).await?,
        Command::Chat { action } => match action {
            ChatAction::History {
                partner_id,
                page,
                limit,
            } => cli::partners::history(&ctx, &partner_id, page, limit).await?,
            ChatAction::Send {
                partner_id,
                message,
            } => cli::partners::send(&ctx, &partner_id, &message).await?,
        },
        Command::Plans => cli::plans::list(&ctx).await?,
        Command::Plan { action } => match action {
            PlanAction::Show => cli::plans::current(&ctx).await?,
            PlanAction::Select { plan, user } => {
                cli::plans::select(&ctx, &plan, user.as_deref()).await?
            }
        },
        Command::Payment { action } => match action {
            PaymentAction::Checkout { plan_id } => cli::plans::checkout(&ctx, &plan_id).await?,
            PaymentAction::Create { user, plan_id } => {
                cli::plans::create_payment(&ctx, &user, &plan_id).await?
            }
            PaymentAction::Status { transaction_id } => {
                cli::plans::payment_status(&ctx, &transaction_id).await?
            }
            PaymentAction::Session { session_id } => {
                cli::plans::session_status(&ctx, &session_id).await?
            }
            PaymentAction::History => cli::plans::history(&ctx).await?,
        },
        Command::Preferences { action } => match action {
            PreferencesAction::Show => cli::preferences::show(&ctx).await?,
            PreferencesAction::All => cli::preferences::all(&ctx).await?,
            PreferencesAction::Set {
                category,
                name,
                value,
            } => cli::preferences::set(&ctx, &category, &name, &value).await?,
            PreferencesAction::Reset => cli::preferences::reset(&ctx).await?,
        },
        Command::Profile { action } => match action {
            ProfileAction::Show => cli::profile::show(&ctx)?,
            ProfileAction::Options { field } => cli::profile::options(field),
            ProfileAction::Toggle { field, item } => cli::profile::toggle(&ctx, field, &item)?,
        },
        Command::Score {
            profile,
            partners,
            plan,
        } => cli::score::score_files(profile.as_deref(), &partners, plan)?,
    }

    Ok(())
}
