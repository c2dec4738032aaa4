use super::ChessBoard;
use super::{ChessField, Color, Piece, Square};
use crate::error::{ChessError, ChessResult};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Parses the placement field of a FEN string and, if present, the active
/// color. Castling, en passant and clock fields are accepted and ignored.
pub fn from_fen(fen: &str) -> ChessResult<(ChessBoard, Color)> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 6 {
        return Err(ChessError::fen("must have between 1 and 6 parts"));
    }

    // Parse board squares; the first FEN row is rank 8, which is our row 0.
    let rows: Vec<&str> = parts[0].split('/').collect();
    if rows.len() != 8 {
        return Err(ChessError::fen("expected 8 rows"));
    }

    let mut board = ChessBoard::empty();
    for (row_index, row) in rows.iter().enumerate() {
        let mut col_index = 0usize;

        for c in row.chars() {
            if col_index > 7 {
                return Err(ChessError::fen(format!("too many squares in row {}", row_index)));
            }
            if let Some(skip) = c.to_digit(10) {
                if skip == 0 || skip > 8 {
                    return Err(ChessError::fen(format!("invalid empty square count: {}", c)));
                }
                col_index += skip as usize;
            } else if let Some(piece) = Piece::from_char(c) {
                let field = ChessField::new(row_index as u8, col_index as u8);
                board = board.with_square(field, Square::Occupied(piece));
                col_index += 1;
            } else {
                return Err(ChessError::fen(format!("invalid piece character: {}", c)));
            }
        }
        if col_index != 8 {
            return Err(ChessError::fen(format!(
                "row {} covers {} squares instead of 8",
                row_index, col_index
            )));
        }
    }

    // Parse active color
    let active_color = match parts.get(1) {
        None | Some(&"w") => Color::White,
        Some(&"b") => Color::Black,
        Some(other) => return Err(ChessError::fen(format!("invalid active color: {}", other))),
    };

    Ok((board, active_color))
}

pub fn to_fen(board: &ChessBoard, active_color: Color) -> String {
    let mut board_representation = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0;

        for col in 0..8u8 {
            match board.piece_at(ChessField::new(row, col)) {
                Square::Occupied(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                Square::Empty => {
                    empty_count += 1;
                }
            }
        }

        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }

        if row < 7 {
            board_representation.push('/');
        }
    }

    let active_color = if active_color == Color::White { "w" } else { "b" };
    format!("{} {}", board_representation, active_color)
}
