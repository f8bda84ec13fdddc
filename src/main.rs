use std::env;
use anyhow::Context;
use log::{error, info};
use crate::config::load_config;
use crate::logging::setup_logger;
use crate::presenter::{Presenter, TextPresenter};
use crate::view::{ForecastView, ViewState};

mod best_slot;
mod config;
mod errors;
mod logging;
mod manager_api;
mod manager_static;
mod models;
mod normalize;
mod presenter;
#[cfg(test)]
mod test_support;
mod transport;
mod view;

fn main() {
    let config_path = env::var("CONFIG_PATH").unwrap_or("config.toml".to_string());
    let start_date = env::args().nth(1);

    if let Err(e) = run(&config_path, start_date) {
        eprintln!("blueglow: {:#}", e);
        std::process::exit(1);
    }
}

/// Loads the best week, or the week starting at the given date, and prints it
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
/// * 'start_date' - start date for an API query, none for the best week
fn run(config_path: &str, start_date: Option<String>) -> anyhow::Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;
    setup_logger(&config.general).context("setting up logging")?;

    info!("blueglow version: {}", env!("CARGO_PKG_VERSION"));

    let view = ForecastView::from_config(&config);
    let presenter = TextPresenter { timezone: config.general.timezone };

    let result = match start_date {
        Some(start) => view.load(&ViewState::Week { start }),
        None => view.resolve_local_default(),
    };

    match result {
        Ok(page) => presenter.render(&page),
        Err(e) => {
            error!("{}", e);
            presenter.show_error(&e);
        }
    }

    Ok(())
}
