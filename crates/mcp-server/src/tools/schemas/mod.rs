pub mod query_codebase;
