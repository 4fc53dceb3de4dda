use chrono::Utc;
use clap::{Parser, Subcommand};
use grip::lens::geoip::GeoIpLookupArgs;
use grip::lens::time::TimeParseArgs;
use grip::lens::utils::OutputFormat;
use grip::GripConfig;
use tracing::Level;

mod commands;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.grip/grip.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Output format
    #[clap(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// RDAP registration lookups: network summary and ranked registration entities
    Rdap {
        #[clap(subcommand)]
        command: commands::rdap::RdapCommands,
    },

    /// GeoIP location lookup for one IP address
    Geoip(GeoIpLookupArgs),

    /// Look up every IPv4 address found in a text file
    File(commands::file::FileArgs),

    /// Time conversion utilities; relative values use the session start time
    Time(TimeParseArgs),

    /// Show the resolved configuration
    Config,
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // every relative date in this session is measured against this instant
    let reference = Utc::now();

    if cli.debug {
        tracing_subscriber::fmt()
            // filter spans/events with level TRACE or higher.
            .with_max_level(Level::INFO)
            .init();
    }

    let config = match GripConfig::new(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Rdap { command } => {
            commands::rdap::run(&config, command, reference, cli.format)
        }
        Commands::Geoip(args) => commands::geoip::run(&config, args, cli.format),
        Commands::File(args) => commands::file::run(&config, args, reference, cli.format),
        Commands::Time(args) => commands::time::run(args, reference, cli.format),
        Commands::Config => commands::config::run(&config, cli.format),
    }
}
