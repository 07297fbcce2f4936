//! Store navigation assistant - one simulated shopping session
//!
//! Splits a shopping list, plans a nearest-neighbor route through the store,
//! walks it with the simulated scanner and confirmation device, and appends
//! the session report to the egress file.
//!
//! Module structure:
//! - `domain/` - Core value types (Product, Route, Instruction, SessionReport)
//! - `services/` - Catalog, matching, sequencing, guidance, sensors, session
//! - `io/` - Catalog source and egress
//! - `infra/` - Config and metrics

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use store_nav::infra::{Config, Metrics};
use store_nav::io::{demo_catalog, load_catalog, Egress};
use store_nav::services::ShoppingSession;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Store navigation assistant
#[derive(Parser, Debug)]
#[command(name = "store-nav", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,

    /// Shopping list, comma separated ("leite, ovos e cafe")
    #[arg(short, long)]
    items: String,
}

fn main() -> anyhow::Result<()> {
    // Default: INFO, use RUST_LOG=debug for per-item detail
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        site = %config.site_id(),
        catalog_file = ?config.catalog_file(),
        step_length_m = %config.step_length_m(),
        scanner_range_m = %config.scanner_range_m(),
        scanner_noise_prob = %config.scanner_noise_prob(),
        egress_file = %config.egress_file(),
        "config_loaded"
    );

    let catalog = match config.catalog_file() {
        Some(path) => load_catalog(path)?,
        None => {
            info!("using_demo_catalog");
            demo_catalog()
        }
    };

    let metrics = Arc::new(Metrics::new());
    let egress = Egress::new(config.egress_file());

    let mut session = ShoppingSession::new(&catalog, &config, metrics.clone())
        .context("Failed to start shopping session")?;

    match session.plan_text(&args.items) {
        Ok(plan) => {
            let confirmed = session.walk(&plan);
            info!(
                stops = %plan.route.len(),
                confirmed = %confirmed,
                total_distance_m = %format!("{:.2}", plan.route.total_distance_m()),
                total_steps = %plan.route.total_steps(),
                "route_walked"
            );
        }
        Err(e) => warn!(error = %e, "nothing_to_do"),
    }

    let report = session.finish();
    metrics.report().log();
    egress.write_report(&report)?;

    Ok(())
}
