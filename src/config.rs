use crate::chess_board::ChessBoard;
use crate::error::{ChessError, ChessResult};
use crate::session::Session;
use log::warn;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// FEN placement (and optional side to move) to start from instead of
    /// the standard layout.
    pub start_position: Option<String>,
    pub unicode_pieces: bool,
    pub show_legal_moves: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_position: None,
            unicode_pieces: false,
            show_legal_moves: true,
            log_level: "warn".into(),
        }
    }
}

impl Config {
    /// Reads the YAML file at `path`. A missing path or file yields the defaults.
    pub fn load(path: Option<&Path>) -> ChessResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            warn!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| ChessError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> ChessResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ChessError::Config { message: e.to_string() })
    }

    pub fn initial_session(&self) -> ChessResult<Session> {
        match &self.start_position {
            Some(fen) => {
                let (board, turn) = ChessBoard::from_fen(fen)?;
                Ok(Session::from_position(board, turn))
            }
            None => Ok(Session::new()),
        }
    }
}
