//! Entry form binary: make sure the schema exists, then hand the terminal to
//! the form until the user quits.
use anyhow::Context;
use customer_records::{logging, run_app, AppConfig, AppContext, EntryApp};
use tracing::info;

/// Returning a `Result` bubbles fatal setup problems (an unwritable data
/// directory, a corrupt database file) to the terminal before the UI starts.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err:#}");
    }

    let ctx = AppContext::new(config);
    info!(
        database = %ctx.config.database_path.display(),
        log_file = %ctx.config.log_file.display(),
        "customer entry starting"
    );
    ctx.store
        .ensure_schema()
        .context("failed to initialize customer database")?;

    let mut app = EntryApp::new(&ctx);
    run_app(&mut app)
}
