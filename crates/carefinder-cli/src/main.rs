use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use carefinder_cli::output::OutputFormat;

mod commands;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find the nearest care facility and rank facilities across an area network"
)]
struct Cli {
    /// Network file (.json, .db, .sqlite) or a directory containing one.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// CSV facility registry replacing the one stored with the network.
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log search details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the areas a search can start from.
    Areas,
    /// Find the closest facility by road distance.
    Nearest {
        /// Starting area name.
        #[arg(long = "from")]
        from: String,
    },
    /// Show the road distance from an area to every node.
    Distances {
        /// Starting area name.
        #[arg(long = "from")]
        from: String,
    },
    /// Rank registry facilities by distance and rating.
    Rank {
        /// Starting area name.
        #[arg(long = "from")]
        from: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let network = commands::network::load(cli.data.as_deref(), cli.registry.as_deref())?;

    match &cli.command {
        Command::Areas => commands::areas::handle_areas(&network, cli.format),
        Command::Nearest { from } => commands::nearest::handle_nearest(&network, from, cli.format),
        Command::Distances { from } => {
            commands::distances::handle_distances(&network, from, cli.format)
        }
        Command::Rank { from } => commands::rank::handle_rank(&network, from, cli.format),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
