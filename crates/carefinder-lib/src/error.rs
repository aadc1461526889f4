use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the CareFinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a road is added with a negative or non-finite distance.
    #[error("invalid distance {weight} for road {from} <-> {to}; distances must be finite and non-negative")]
    InvalidEdgeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// Raised when an operation requires a node that was never added to the graph.
    #[error("unknown node: {name}")]
    UnknownNode { name: String },

    /// Raised by strict lookups when an area name could not be found in the network.
    #[error("unknown area name: {name}{}", format_suggestions(.suggestions))]
    UnknownArea {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a facility rating falls outside the supported range.
    #[error("invalid rating {rating} for facility '{name}'; expected a value between 1.0 and 5.0")]
    InvalidRating { name: String, rating: f64 },

    /// Raised when two registry records share the same facility name.
    #[error("duplicate facility name encountered: {name}")]
    DuplicateFacility { name: String },

    /// Raised when registry input fails validation.
    #[error("invalid facility registry: {message}")]
    RegistryValidation { message: String },

    /// Network file could not be located at the resolved path.
    #[error("network not found at {path}")]
    NetworkNotFound { path: PathBuf },

    /// Raised when a network file uses an extension we cannot load.
    #[error("unsupported network format at {path}; expected .json, .db or .sqlite")]
    UnsupportedNetworkFormat { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the network data")]
    ProjectDirsUnavailable,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
