//! Quick Notes CLI
//!
//! Command-line front end over the `quicknotes-core` notes store.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod commands;
mod config;
mod helpers;
mod output;
mod ui;

use app::AppContext;
use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("QUICKNOTES_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    match &cli.command {
        Some(Commands::Init(args)) => commands::maintenance::handle_init(&ctx, args).await,
        Some(Commands::Add(args)) => commands::notes::handle_add(&ctx, args).await,
        Some(Commands::List(args)) => commands::notes::handle_list(&ctx, args).await,
        Some(Commands::Search(args)) => commands::notes::handle_search(&ctx, args).await,
        Some(Commands::Show(args)) => commands::notes::handle_show(&ctx, args).await,
        Some(Commands::Edit(args)) => commands::notes::handle_edit(&ctx, args).await,
        Some(Commands::Delete(args)) => commands::notes::handle_delete(&ctx, args).await,
        Some(Commands::Clear(args)) => commands::notes::handle_clear(&ctx, args).await,
        Some(Commands::Stats(args)) => commands::maintenance::handle_stats(&ctx, args).await,
        Some(Commands::Errors(args)) => commands::maintenance::handle_errors(&ctx, args).await,
        Some(Commands::Cleanup) => commands::maintenance::handle_cleanup(&ctx).await,
        Some(Commands::Completions { shell }) => commands::misc::handle_completions(*shell),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
