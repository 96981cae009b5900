//! Integration tests for the dazops CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! They are slower and should be run separately from unit tests.

mod config_command;
mod deploy_dry_run;
mod env_command;
mod nginx_dry_run;
