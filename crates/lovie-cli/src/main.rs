use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use commands::{browse, clear, config, details, search, watched};
use movie_log_config::{Config, PathManager};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "lovie")]
#[command(about = "Lovie - search movies, rate what you've watched, keep the tally")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search OMDb by title
    #[command(long_about = "Search OMDb by title. Queries shorter than the configured minimum (3 characters by default) are not sent.")]
    Search {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show full details for a title
    Details {
        /// IMDb ID, e.g. tt0133093
        imdb_id: String,
    },
    /// Rate a title and add it to the watched list
    #[command(long_about = "Fetch the title's details, ask for a rating from 1 to 10 (unless --rating is given) and add it to the watched list. Rating a title already on the list updates its rating in place.")]
    Rate {
        /// IMDb ID, e.g. tt0133093
        imdb_id: String,

        /// Rating from 1 to 10 (if not provided, will prompt)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: Option<u8>,
    },
    /// Remove a title from the watched list
    Remove {
        /// IMDb ID, e.g. tt0133093
        imdb_id: String,
    },
    /// Show the watched list and its summary
    List,
    /// Show watched-list averages only
    Summary,
    /// Interactive search, pick, and rate loop
    Browse,
    /// Manage configuration and the OMDb API key
    #[command(long_about = "Manage configuration and credentials for Lovie. The OMDb API key is kept in credentials.toml; LOVIE_OMDB_API_KEY overrides it.")]
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Clear stored data
    #[command(long_about = "Clear stored data. Use --watched to empty the watched list, --logs to delete log files, or --all for both.")]
    Clear {
        /// Clear everything
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Empty the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watched: bool,

        /// Delete log files
        #[arg(long, action = ArgAction::SetTrue)]
        logs: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the OMDb API key
    SetKey {
        /// OMDb API key (if not provided, will prompt)
        key: Option<String>,
    },

    /// Write a default config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    config.validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(&query.join(" "), &config, &paths, &output).await,
        Commands::Details { imdb_id } => details::run_details(&imdb_id, &config, &paths, &output).await,
        Commands::Rate { imdb_id, rating } => watched::run_rate(&imdb_id, rating, &config, &paths, &output).await,
        Commands::Remove { imdb_id } => watched::run_remove(&imdb_id, &config, &paths, &output),
        Commands::List => watched::run_list(&config, &paths, &output),
        Commands::Summary => watched::run_summary(&config, &paths, &output),
        Commands::Browse => browse::run_browse(&config, &paths, &output)
            .await
            .wrap_err("Browse session failed"),
        Commands::Config { cmd } => config::run_config(cmd, &config, &paths, &output),
        Commands::Clear { all, watched, logs } => clear::run_clear(all, watched, logs, &config, &paths, &output),
    }
}
