//! Core library surface for the customer records tools.
//!
//! Two binaries sit on top of this crate: `customer-entry` appends records
//! through a form and `customer-viewer` lists them. Both resolve the same
//! configured SQLite file and share the schema described in `db`.
pub mod config;
pub mod context;
pub mod db;
pub mod logging;
pub mod models;
pub mod ui;

pub use config::AppConfig;
pub use context::AppContext;

/// Persistence entry points used by the binaries and integration tests.
pub use db::{ensure_schema, fetch_customers, insert_customer, CustomerStore, StoreError};

pub use models::{ContactMethod, Customer, NewCustomer};

pub use ui::{run_app, EntryApp, ViewerApp};
