use clap::Parser;
use medops::cli::{Cli, Commands};
use medops::config::{self, Service};
use medops::error::Result;
use medops::logging::{ApplicationMode, LoggingConfig};
use medops::server::ServiceServer;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Explicit -v/-q/--json wins; otherwise each subcommand gets its mode's
    // defaults (services log with timestamps, smoke runs keep logs quiet).
    let log_config = if cli.verbose > 0 || cli.quiet || cli.json {
        LoggingConfig::from_args(cli.quiet, cli.verbose > 0, cli.json)
    } else {
        match &cli.command {
            Commands::Serve { .. } => LoggingConfig::for_mode(ApplicationMode::Service),
            Commands::Smoke { .. } => LoggingConfig::for_mode(ApplicationMode::SmokeTest),
            _ => LoggingConfig::for_mode(ApplicationMode::Cli),
        }
    };

    if let Err(e) = medops::logging::init_logging(log_config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli).await {
        let error_response = e.to_error_response();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response)
                .unwrap_or_else(|_| error_response.error.clone())
        );
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match cli.command.clone() {
        Commands::Serve {
            service,
            port,
            database_url,
        } => {
            let service = Service::parse(&service)?;
            let port = port.unwrap_or_else(|| service.default_port());
            let url = config::database_url(database_url.as_deref());

            let pool = medops::db::create_pool(&url).await?;
            ServiceServer::new(service, port, pool)
                .run()
                .await
                .map_err(|e| medops::error::MedOpsError::Config(e.to_string()))?;
            Ok(())
        },

        Commands::Migrate { database_url } => {
            let url = config::database_url(database_url.as_deref());
            let pool = medops::db::create_pool(&url).await?;
            medops::db::run_migrations(&pool).await?;
            println!("Schema is up to date");
            Ok(())
        },

        Commands::Seed { database_url } => {
            let url = config::database_url(database_url.as_deref());
            let pool = medops::db::create_pool(&url).await?;
            medops::db::run_migrations(&pool).await?;
            if medops::db::seed_demo_data(&pool).await? {
                println!("Demo data seeded");
            } else {
                println!("Database already seeded, nothing to do");
            }
            Ok(())
        },

        Commands::Smoke { suite, base_url } => {
            medops::smoke::run(&suite, base_url.as_deref()).await
        },
    }
}
