//! Unit tests for the dazops CLI
//!
//! Service-level tests against mock ports. No processes are spawned and no
//! network is touched.

mod cron_service;
mod deploy_service;
mod diagnose_service;
mod env_service;
mod mocks;
