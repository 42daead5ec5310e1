//! Viewer binary: read the configured database once and show it as a table.
//! Storage problems are drawn inside the window, so only configuration and
//! terminal failures end the process with an error.
use anyhow::Context;
use customer_records::{logging, run_app, AppConfig, AppContext, ViewerApp};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err:#}");
    }

    let ctx = AppContext::new(config);
    info!(
        database = %ctx.config.database_path.display(),
        log_file = %ctx.config.log_file.display(),
        "customer viewer starting"
    );
    let mut app = ViewerApp::load(&ctx);
    run_app(&mut app)
}
