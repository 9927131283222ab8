use anyhow::Result;
use clap::Parser;
use quote_core::QuoteError;

mod app;
mod cli;
mod config_cmds;
mod console;
mod quote_cmds;
mod sync_cmds;

use app::{App, load_config};
use cli::{Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<QuoteError>() {
            // Bad input gets a plain message instead of an error chain.
            Some(quote_err) if quote_err.is_user_facing() => {
                eprintln!("error: {quote_err}");
                std::process::exit(1);
            }
            _ => Err(e),
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config {
        cmd: ConfigCommands::Init { force },
    } = cli.command
    {
        return config_cmds::handle_config_init(cli.config, force);
    }

    let config = load_config(cli.config.as_deref(), cli.data_dir, cli.session_dir)?;
    match cli.command {
        Commands::Config { .. } => config_cmds::handle_config_show(&config, &cli.format),
        command => run_store_command(&App::open(config, cli.format)?, command).await,
    }
}

async fn run_store_command(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::List { category } => quote_cmds::handle_list(app, category).await,
        Commands::Random => quote_cmds::handle_random(app).await,
        Commands::Last => quote_cmds::handle_last(app).await,
        Commands::Add { text, category } => quote_cmds::handle_add(app, &text, &category).await,
        Commands::Categories => quote_cmds::handle_categories(app).await,
        Commands::Filter { category } => quote_cmds::handle_filter(app, &category).await,
        Commands::Export { output } => quote_cmds::handle_export(app, &output).await,
        Commands::Import { path } => quote_cmds::handle_import(app, &path).await,
        Commands::Sync => sync_cmds::handle_sync(app).await,
        Commands::Watch { interval } => sync_cmds::handle_watch(app, interval).await,
        Commands::Config { .. } => unreachable!("config commands never open the store"),
    }
}
