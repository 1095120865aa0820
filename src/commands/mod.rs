// ABOUTME: Command module aggregator for the rollguard CLI.
// ABOUTME: Re-exports deploy, rollback, and status command handlers.

mod deploy;
mod rollback;
mod status;

pub use deploy::deploy;
pub use rollback::rollback;
pub use status::status;
