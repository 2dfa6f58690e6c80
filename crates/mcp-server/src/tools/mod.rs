//! Auggie MCP tool surface.
//!
//! Schemas, dispatch and the tool catalog live in separate submodules; the only tool is
//! `query_codebase`.

pub(crate) mod catalog;
mod dispatch;
mod schemas;

pub use dispatch::AuggieService;
pub use schemas::query_codebase::QueryCodebaseRequest;
