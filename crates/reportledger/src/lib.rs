//! # reportledger
//!
//! `OAuth2`-authenticated client for remote reporting APIs.
//!
//! ## Features
//!
//! - **Lazy token refresh**: Access tokens are fetched via refresh-token
//!   exchange and cached until their expiry claim runs out
//! - **Report requests**: Chainable query parameters with the service's
//!   `!`-joined multi-value prompt encoding
//! - **Output formats**: JSON, XML (server default), and CSV, returned
//!   as raw text with opt-in JSON parsing
//!
//! ## Quick Start
//!
//! ```ignore
//! use reportledger::{AuthClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("client_id", "client_secret", "refresh_token");
//!     let client = AuthClient::new(credentials, "https://auth.example.com/oauth/token")?;
//!
//!     let report = client
//!         .request("https://reports.example.com/v1/spend")?
//!         .param("region", "EMEA")
//!         .param("cost_center", ["Sales Ops", "Field Marketing"]);
//!
//!     let body = report.json().await?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```
//!
//! ## Output Formats
//!
//! ```ignore
//! // The same builder can fetch every format; parameters are kept
//! // across calls and `format` is only part of the sent URL.
//! let json = report.json().await?;
//! let csv = report.csv().await?;
//! let xml = report.xml().await?;
//! ```
//!
//! ## Token Expiry
//!
//! ```ignore
//! use reportledger::token;
//!
//! // Expiry comes from the JWT `exp` claim. A token without the claim
//! // counts as expired and gets refreshed on the next call.
//! if token::is_expired(&access_token)? {
//!     let fresh = client.refresh().await?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod credentials;
mod error;
pub mod report;
pub mod token;

pub use client::AuthClient;
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use report::{Format, ParamValue, ReportRequest, join_values};
pub use token::TokenResponse;
