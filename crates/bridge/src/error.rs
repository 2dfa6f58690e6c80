use thiserror::Error;

/// Rejections raised while building a [`crate::QueryRequest`], before anything is spawned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("'query' argument is required and must be a string")]
    EmptyQuery,
}

/// Startup precondition failures. Any of these is fatal to the whole server.
#[derive(Error, Debug)]
pub enum PreflightError {
    #[error(
        "Auggie CLI not found. Please install it first: https://docs.augmentcode.com/cli/overview\nError: {cause}"
    )]
    CliUnavailable { cause: String },

    #[error(
        "Auggie CLI not found. Please install it first: https://docs.augmentcode.com/cli/overview\nError: Auggie CLI returned empty version"
    )]
    EmptyVersion,

    #[error("{var} environment variable is required.\nGet your token by running: auggie token print")]
    MissingAuth { var: &'static str },
}
