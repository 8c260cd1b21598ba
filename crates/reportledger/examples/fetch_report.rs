//! Example: fetch a report in every output format
//!
//! This example demonstrates how to:
//! 1. Build an `AuthClient` from refresh-token credentials
//! 2. Chain query parameters onto a report request
//! 3. Fetch the same report as JSON, CSV, and XML
//!
//! ## Prerequisites
//!
//! Set environment variables for your reporting service:
//! ```bash
//! export REPORTS_CLIENT_ID="your-client-id"
//! export REPORTS_CLIENT_SECRET="your-client-secret"
//! export REPORTS_REFRESH_TOKEN="your-refresh-token"
//! export REPORTS_TOKEN_URL="https://auth.example.com/oauth/token"
//! export REPORTS_URL="https://reports.example.com/v1/spend"
//! ```
//!
//! ## Running
//!
//! ```bash
//! cargo run --example fetch_report
//! ```

use std::env;

use reportledger::{AuthClient, Credentials};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reportledger=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get configuration from environment
    let client_id =
        env::var("REPORTS_CLIENT_ID").expect("REPORTS_CLIENT_ID environment variable not set");
    let client_secret = env::var("REPORTS_CLIENT_SECRET")
        .expect("REPORTS_CLIENT_SECRET environment variable not set");
    let refresh_token = env::var("REPORTS_REFRESH_TOKEN")
        .expect("REPORTS_REFRESH_TOKEN environment variable not set");
    let token_url =
        env::var("REPORTS_TOKEN_URL").expect("REPORTS_TOKEN_URL environment variable not set");
    let report_url = env::var("REPORTS_URL").expect("REPORTS_URL environment variable not set");

    // Step 1: Create the client
    println!("Step 1: Creating client for {token_url}...");
    let credentials = Credentials::new(client_id, client_secret, refresh_token);
    let client = AuthClient::new(credentials, &token_url)?;

    // Step 2: Build the request
    println!("Step 2: Building report request for {report_url}...");
    let report = client
        .request(&report_url)?
        .param("region", "EMEA")
        .param("cost_center", ["Sales Ops", "Field Marketing"]);

    // Step 3: Fetch the report in each format. The first call triggers
    // the refresh-token exchange; the rest reuse the cached token.
    println!("Step 3: Fetching JSON...");
    let json = report.json().await?;
    println!("  {} bytes of JSON", json.len());

    println!("Step 4: Fetching CSV...");
    let csv = report.csv().await?;
    println!("  {} bytes of CSV", csv.len());

    println!("Step 5: Fetching XML (server default)...");
    let xml = report.xml().await?;
    println!("  {} bytes of XML", xml.len());

    println!("\nJSON preview:");
    println!("{}", &json[..json.len().min(400)]);

    Ok(())
}
