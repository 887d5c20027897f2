use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecr_ensure::settings::DEFAULT_REGION;
use ecr_ensure::{EcrRegistry, Provisioned, Provisioner, RepositoryName, Settings};

/// Ensure an ECR repository exists, creating it if absent
///
/// When the repository is created, the REPOSITORY_POLICY and LIFECYCLE_POLICY
/// environment variables are applied as its access and lifecycle policies.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// AWS region to use
    #[arg(long, default_value = DEFAULT_REGION)]
    region: String,

    /// Repository name or image reference
    /// (e.g., team/app or 123456789012.dkr.ecr.eu-west-1.amazonaws.com/team/app:latest)
    repository: String,
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env(cli.region);
    let name = RepositoryName::from_identifier(&cli.repository);

    let registry = EcrRegistry::connect(&settings.region).await?;
    let provisioner = Provisioner::new(registry, settings.policies);

    match provisioner.ensure_repository(&name).await? {
        Provisioned::AlreadyExisted | Provisioned::CreatedConcurrently => {}
        Provisioned::Created { policy_failures: 0 } => {}
        Provisioned::Created { policy_failures } => {
            warn!(
                "Repository {} created, {} policy document(s) could not be applied",
                name, policy_failures
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
