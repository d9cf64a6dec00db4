pub mod cli;
pub mod core;
pub mod exchange;
pub mod providers;
pub mod selection;
pub mod store;

pub use cli::select::SelectCommand;

use crate::core::config::AppConfig;
use crate::exchange::RateStore;
use crate::providers::OpenErApiProvider;
use crate::selection::SelectionStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates {
        base: Option<String>,
    },
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    Select(SelectCommand),
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

fn new_rate_store(config: &AppConfig) -> Result<RateStore> {
    let provider = OpenErApiProvider::new(config.open_er_api_url())?;
    Ok(RateStore::new(Arc::new(provider)))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxwatch starting...");
    let config = load_config(config_path)?;

    match command {
        AppCommand::Rates { base } => {
            let selection = SelectionStore::new(store::open_local_storage(&config)?);
            let rate_store = new_rate_store(&config)?;
            let base = base.as_deref().unwrap_or(&config.base_currency);
            cli::rates::run(&rate_store, &selection, base).await
        }
        AppCommand::Convert { amount, from, to } => {
            let rate_store = new_rate_store(&config)?;
            cli::convert::run(&rate_store, amount, &from, &to).await
        }
        AppCommand::Select(select) => {
            let mut selection = SelectionStore::new(store::open_local_storage(&config)?);
            cli::select::run(&mut selection, select);
            Ok(())
        }
    }
}
