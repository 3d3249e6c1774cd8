//! PawMatch - browse adoptable dogs and get matched from the terminal

use std::sync::Arc;

use clap::Parser;
use pawmatch_client::PawApiClient;
use pawmatch_core::App;
use tracing::info;

mod config;
mod logging;
mod repl;

use config::{Cli, Configuration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let configuration = Configuration::new(&cli)?;

    // Must stay alive until exit so buffered file logs are flushed
    let _logging_guard = logging::init_logging(&configuration.logging_config())?;

    let api = PawApiClient::from_config(configuration.http_client_config())?;
    info!("Using dog service at {}", configuration.base_url());

    let mut app = App::new(Arc::new(api));

    if let (Some(name), Some(email)) = (&cli.name, &cli.email) {
        app.login(name, email).await;
        repl::print_notifications(&mut app);
    }

    repl::run(&mut app).await?;

    info!("Bye");
    Ok(())
}
