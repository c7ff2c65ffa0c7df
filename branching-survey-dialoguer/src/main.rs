use std::sync::Arc;

use anyhow::{Context, Result};
use branching_survey::{JsonlStore, Kiosk, MemoryStore, NoVoiceCapture, Questionnaire, ResponseStore};
use branching_survey_dialoguer::{DialoguerFrontend, KioskConfig, run_kiosk};
use clap::Parser;
use tokio::runtime::Handle;
use tracing::info;

mod cli;
mod logging;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => KioskConfig::load(path)?,
        None => KioskConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.catalogue {
        config.catalogue = Some(path);
    }
    if cli.plain {
        config.colorful = false;
    }
    logging::init_logging(cli.verbose, &config.log_path())?;

    let catalogue = config.load_catalogue()?;
    let questionnaire = Questionnaire::new(&catalogue).context("Invalid question catalogue")?;

    let store: Arc<dyn ResponseStore> = if cli.dry_run {
        info!("Dry run, responses are kept in memory");
        Arc::new(MemoryStore::new())
    } else {
        info!("Writing responses to {}", config.data_dir.display());
        Arc::new(JsonlStore::new(&config.data_dir))
    };

    let mut kiosk = Kiosk::new(questionnaire, store).with_collections(config.collections.clone());
    let frontend = if config.colorful {
        DialoguerFrontend::new()
    } else {
        DialoguerFrontend::plain()
    };

    let runtime = Handle::current();
    let completed = tokio::task::spawn_blocking(move || {
        run_kiosk(&mut kiosk, &frontend, &NoVoiceCapture, &runtime)
    })
    .await
    .context("Kiosk loop panicked")??;

    info!("Session ended after {} respondents", completed);
    println!("Respondents this session: {completed}");
    Ok(())
}
