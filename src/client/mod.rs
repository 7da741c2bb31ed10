//! Async client for the admin REST backend.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::client::{BackendClient, StaticToken};
//! use payroll_engine::config::BackendConfig;
//!
//! # async fn run() -> payroll_engine::error::EngineResult<()> {
//! let client = BackendClient::new(&BackendConfig::default())?;
//! let token = StaticToken::new("secret");
//! let summary = client.working_days(&token, 1, 2026).await?;
//! println!("{} working days", summary.working_days);
//! # Ok(())
//! # }
//! ```

mod backend;
mod credentials;

pub use backend::BackendClient;
pub use credentials::{CredentialProvider, StaticToken};
