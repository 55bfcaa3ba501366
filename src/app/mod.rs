//! Main application modules.
//!
//! Console rendering and shutdown handling used by the CLI binary.

pub mod report;
pub mod shutdown;

// Re-export public API
pub use report::{
    render_code, render_draw, render_history, render_import_report, render_latest, render_list,
    render_statistics, render_sync_report, render_year,
};
pub use shutdown::{cancel_on_ctrl_c, shutdown_gracefully};
