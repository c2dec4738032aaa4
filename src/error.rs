//! Error types for the parsing and configuration surfaces.
//!
//! The game rules themselves never fail: rejected clicks are ordinary
//! [`Outcome`](crate::session::Outcome) values. Errors only arise when text
//! coming from outside (squares, FEN strings, config files) cannot be read.

/// Errors raised while reading external input.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    /// A square name such as `e4` could not be parsed.
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    /// A FEN placement string was malformed.
    #[error("Invalid FEN string: {message}")]
    InvalidFen { message: String },

    /// The configuration file could not be interpreted.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChessError {
    pub(crate) fn fen(message: impl Into<String>) -> Self {
        ChessError::InvalidFen { message: message.into() }
    }
}

/// Result type alias for fallible operations on external input.
pub type ChessResult<T> = Result<T, ChessError>;
