// src/bin/smoke_test.rs

//! Smoke test CLI for a deployed query endpoint.
//!
//! Run from the Terraform working directory after `terraform apply`.

use std::path::PathBuf;

use clap::Parser;
use kb_query::{
    error::Result,
    models::Config,
    smoke::{self, SAMPLE_QUERIES, SmokeTest},
};

/// Posts sample store questions to the deployed endpoint
#[derive(Parser, Debug)]
#[command(name = "smoke-test", version, about = "Smoke test for the knowledge base query API")]
struct Cli {
    /// Endpoint URL (default: read from Terraform output)
    #[arg(long)]
    url: Option<String>,

    /// Directory to run `terraform output` in
    #[arg(long, default_value = ".")]
    terraform_dir: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = cli.config.map(Config::load_or_default).unwrap_or_default();
    if let Some(secs) = cli.timeout_secs {
        config.smoke_test.timeout_secs = secs;
    }
    config.validate()?;

    let endpoint = match cli.url {
        Some(url) => smoke::parse_endpoint(&url)?,
        None => match smoke::discover_endpoint(&cli.terraform_dir, &config.smoke_test.terraform_output)
        {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Endpoint discovery failed: {}", e);
                println!("Error: Could not get API URL from Terraform output");
                println!("Make sure you've run 'terraform apply' first");
                std::process::exit(1);
            }
        },
    };

    let smoke_test = SmokeTest::new(endpoint, &config.smoke_test)?;
    println!("Testing API: {}", smoke_test.endpoint());

    smoke_test.run_all(&SAMPLE_QUERIES).await;

    Ok(())
}
