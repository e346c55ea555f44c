pub mod config;
pub mod findings;
pub mod http_client;
pub mod probe;
pub mod scanner;
pub mod target;
pub mod utils;

// re-export the types tests and the binary wire together
pub use crate::config::RunConfig;
pub use crate::findings::FindingLog;
pub use crate::probe::http_probe::ProbeOutcome;
