use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use crate::listing::SortField;
use crate::report::OutputFormat;
use crate::snapshot::ComponentStatus;

#[derive(Parser)]
#[command(name = "cfsa")]
#[command(about = "Summarize Cloudflare status: data centers, services, incidents and maintenance", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that reads a snapshot
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, env = "CFSA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read a saved summary.json instead of calling the API
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the derived health summary once
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Poll continuously; press Enter to refresh immediately
    Watch {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List data centers
    Datacenters {
        #[command(flatten)]
        source: SourceArgs,

        /// Match against location name or airport code
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this status (e.g. major_outage, partial, maintenance)
        #[arg(long)]
        status: Option<ComponentStatus>,

        /// Sort field
        #[arg(long, value_enum, default_value_t = SortField::Status)]
        sort: SortField,

        /// Reverse the sort order
        #[arg(long)]
        desc: bool,
    },

    /// List core services, most severe first
    Services {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List active incidents
    Incidents {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List active scheduled maintenance
    Maintenance {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Test connectivity to the status API
    TestApi {
        /// Path to configuration file (defaults are used when omitted)
        #[arg(short, long, env = "CFSA_CONFIG")]
        config: Option<PathBuf>,
    },
}

impl Commands {
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Commands::Summary { source }
            | Commands::Watch { source }
            | Commands::Datacenters { source, .. }
            | Commands::Services { source }
            | Commands::Incidents { source }
            | Commands::Maintenance { source } => source.config.as_ref(),
            Commands::TestApi { config } => config.as_ref(),
        }
    }
}
