use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the transitway library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Transit database could not be located at the resolved path.
    #[error("transit database not found at {path}")]
    DatabaseNotFound { path: PathBuf },

    /// Raised when a row cannot be turned into a usable record. Construction
    /// never recovers from malformed input.
    #[error("invalid record: {message}")]
    InvalidRecord { message: String },

    /// Raised when a stop id or name could not be resolved.
    #[error("unknown stop: {query}{}", format_suggestions(.suggestions))]
    UnknownStop {
        query: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route exists between two stops.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
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
