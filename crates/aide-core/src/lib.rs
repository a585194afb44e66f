pub mod activity_log;
pub mod agent;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod inbox;
pub mod io;
pub mod orchestrator;
pub mod paths;
pub mod shutdown;
pub mod watcher;

pub use error::{AideError, Result};
