use clap::{Parser, Subcommand};

const LONG_ABOUT: &str = r#"
MedOps - demo hospital-management platform

One binary, six services, one shared Postgres schema:
  hms         Patients, appointments, invoices, beds (port 5600)
  crm         Hospital-owner leads pipeline (port 5601)
  onboarding  Hospital signups and go-live steps (port 5602)
  partners    Integration-partner projects (port 5603)
  analytics   Read-only aggregates (port 5604)
  occ         Operations Command Centre dashboard + WebSocket feed (port 5605)

Typical demo session:
  medops migrate            ← create the schema
  medops seed               ← load the demo dataset
  medops serve occ          ← run a service (one process per service)
  medops smoke occ          ← verify it end to end

Database resolution: --database-url flag, then DATABASE_URL, then the
local demo default.
"#;

#[derive(Parser, Clone)]
#[command(name = "medops")]
#[command(about = "Demo hospital-management platform services and smoke suites")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output (-q)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output logs in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Run one platform service
    ///
    /// Examples:
    ///   medops serve hms
    ///   medops serve occ --port 9000
    Serve {
        /// Service name: hms, crm, onboarding, partners, analytics, occ
        service: String,

        /// Port to bind (default: the service's conventional port)
        #[arg(long)]
        port: Option<u16>,

        /// Postgres connection string (default: DATABASE_URL or demo URL)
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Create the shared schema (idempotent)
    Migrate {
        /// Postgres connection string (default: DATABASE_URL or demo URL)
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Insert the demo dataset the smoke suites expect (idempotent)
    Seed {
        /// Postgres connection string (default: DATABASE_URL or demo URL)
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Run a verification suite against a live service
    ///
    /// Prints one ✓/✗ line per check plus a summary, and exits nonzero if
    /// any check failed.
    ///
    /// Examples:
    ///   medops smoke hms
    ///   medops smoke occ --base-url http://127.0.0.1:9000
    ///   medops smoke all
    Smoke {
        /// Suite name: a service name or 'all'
        suite: String,

        /// Base URL of the service under test (default: its conventional port)
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_serve() {
        let cli = Cli::try_parse_from(["medops", "serve", "occ", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve { service, port, .. } => {
                assert_eq!(service, "occ");
                assert_eq!(port, Some(9000));
            },
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_cli_parses_smoke_all() {
        let cli = Cli::try_parse_from(["medops", "smoke", "all"]).unwrap();
        match cli.command {
            Commands::Smoke { suite, base_url } => {
                assert_eq!(suite, "all");
                assert!(base_url.is_none());
            },
            _ => panic!("expected smoke command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["medops"]).is_err());
    }

    #[test]
    fn test_cli_verbose_flag_counts() {
        let cli = Cli::try_parse_from(["medops", "-vv", "migrate"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
