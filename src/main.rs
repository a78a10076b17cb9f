mod config;
mod dashboard;
mod data;
mod error;
mod filter;
mod loader;
mod map_builder;
mod ui;

use gtk::prelude::*;
use gtk::{glib, Application};
use tracing_subscriber::EnvFilter;

use config::Config;
use data::APP_ID;

fn main() -> glib::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // reqwest needs a Tokio reactor for popup image fetches
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            return glib::ExitCode::FAILURE;
        }
    };
    let _guard = rt.enter();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("{e:#}; using default settings");
        Config::default()
    });
    tracing::info!(data_path = %config.data_path.display(), "starting");

    let app = Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_activate(move |app| ui::build_ui(app, &config));

    let exit_code = app.run();

    // Keep runtime alive until app exits
    drop(_guard);
    drop(rt);

    exit_code
}
