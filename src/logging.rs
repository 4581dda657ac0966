//! Logger setup
//!
//! Native builds append to a log file (`simulation.log` by default) so the
//! terminal stays free for the command prompt. The filter defaults to
//! `info` and can be overridden with `RUST_LOG`. The browser build logs to
//! the console.

use crate::settings::Settings;

/// Default log file for native runs
pub const DEFAULT_LOG_FILE: &str = "simulation.log";

/// Append log records to `path`
#[cfg(not(target_arch = "wasm32"))]
pub fn init_file(path: &std::path::Path) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::fs::OpenOptions;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file: {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("install logger")?;
    Ok(())
}

/// Console logging and readable panics in the browser
#[cfg(target_arch = "wasm32")]
pub fn init_web() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

/// Session banner, so runs appended to the same file stay apart
pub fn log_session_start(settings: &Settings) {
    log::info!("==================================================");
    log::info!(
        "Simulation started: {}x{} @ {} fps, G = {}, wall = {}",
        settings.width,
        settings.height,
        settings.frame_rate,
        settings.grav_const,
        settings.wall_thickness
    );
    log::info!("==================================================");
}
