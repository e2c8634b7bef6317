use anyhow::Context;
use clap::Parser;
use fmc_api::FmcClient;
use fmc_blackhole::{pipeline, Cli};
use fmc_core::FmcConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = FmcConfig::from_env().context("Failed to load FMC settings from environment")?;
    let config = cli.apply(config)?;
    let plan = cli.plan()?;

    let client = FmcClient::from_config(&config).context("Failed to create FMC client")?;
    let report = pipeline::run(&client, &config.credentials, &plan)
        .await
        .context("Black-hole run failed")?;

    println!("{report}");
    Ok(())
}
