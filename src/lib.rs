//! Client core for the AI to Love companion service.
//!
//! The crate wraps the remote HTTP API behind a single request function with
//! uniform auth-header injection and error normalization, and ships the
//! client-side compatibility heuristic used to rank companions against a
//! user's emotional profile.
//!
//! | Category | Weight | Rule |
//! |----------|--------|------|
//! | **Interests** | 30 | Fraction of the user's selected interests that appear in the partner's interests |
//! | **Ideal traits** | 25 | Fraction of the user's ideal traits that appear in the partner's tags |
//! | **Communication** | 20 | Partner personality mentions the user's style |
//! | **Goals** | 15 | Partner description mentions any companionship goal |
//! | **Deal-breakers** | 10 | Partner description mentions none of them |
//!
//! Only categories the user filled in count towards the total. The resulting
//! fraction is mapped into `[50, 100]`, and premium partners are capped at 70
//! for viewers without a premium or VIP plan.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`session`] — Persisted key-value store holding the bearer token and cached user
//! - [`api`] — HTTP client, error type, and the auth/partner/plan/payment/preferences services
//! - [`matching`] — Emotional profiles, partners, and the compatibility scorer

pub mod api;
pub mod config;
pub mod matching;
pub mod session;
