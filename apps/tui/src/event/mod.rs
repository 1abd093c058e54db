pub mod loop_handler;
pub mod router;

pub use loop_handler::{run, run_headless, PendingLoad};
pub use router::{route, DashboardEvent};
