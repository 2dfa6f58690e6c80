//! Auggie invocation bridge
//!
//! Turns one [`QueryRequest`] into exactly one supervised run of the Auggie CLI and one
//! classified [`InvocationOutcome`]:
//!
//! - `Ok(QueryResult)` when the CLI exits 0 before the deadline
//! - `Err(InvocationError::ProcessFailure)` on a non-zero exit
//! - `Err(InvocationError::Timeout)` when the deadline fires first (the child is terminated)
//! - `Err(InvocationError::Spawn)` when the CLI could not be started at all
//!
//! Startup checks that must pass before any call is served live in [`preflight`].

mod args;
mod bridge;
mod config;
mod error;
mod outcome;
pub mod preflight;
mod request;
mod supervisor;

pub use args::build_args;
pub use bridge::Bridge;
pub use config::{
    BridgeConfig, AUTH_ENV, DEFAULT_KILL_GRACE, DEFAULT_PREFLIGHT_TIMEOUT, DEFAULT_PROGRAM,
    DEFAULT_QUERY_TIMEOUT_SECS,
};
pub use error::{PreflightError, RequestError};
pub use outcome::{InvocationError, InvocationOutcome, QueryResult};
pub use request::{OutputFormat, QueryRequest};
