//! Ratatui front-ends: the entry form and the read-only viewer share the
//! terminal loop and modal helpers.

mod entry;
mod forms;
mod helpers;
mod terminal;
mod viewer;

pub use entry::{EntryApp, Notice, NoticeKind};
pub use terminal::{run_app, Screen};
pub use viewer::{CustomerTable, ViewerApp};
