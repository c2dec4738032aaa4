use super::{fen, ChessField, Color, Move, Piece, PieceType, Square};
use crate::error::ChessResult;
use std::collections::BTreeSet;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An immutable 8x8 position. Slots are stored in a fixed 64 entry array
/// indexed by `row * 8 + col`; every edit returns a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessBoard {
    squares: [Square; 64],
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::initial()
    }
}

impl ChessBoard {
    /// Creates an empty chess board
    pub fn empty() -> Self {
        Self {
            squares: [Square::Empty; 64],
        }
    }

    /// Standard starting layout: black on rows 0 and 1, white on rows 6 and 7.
    pub fn initial() -> Self {
        let mut squares = [Square::Empty; 64];
        for (col, kind) in BACK_RANK.iter().enumerate() {
            squares[col] = Square::Occupied(Piece::new(*kind, Color::Black));
            squares[8 + col] = Square::Occupied(Piece::new(PieceType::Pawn, Color::Black));
            squares[48 + col] = Square::Occupied(Piece::new(PieceType::Pawn, Color::White));
            squares[56 + col] = Square::Occupied(Piece::new(*kind, Color::White));
        }
        Self { squares }
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> ChessResult<(Self, Color)> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self, active_color: Color) -> String {
        fen::to_fen(self, active_color)
    }

    pub fn piece_at(&self, field: ChessField) -> Square {
        self.squares[field.index()]
    }

    /// Returns a copy with `piece` standing on `mv.to` and `mv.from` cleared.
    /// Whatever stood on `mv.to` before is overwritten.
    pub fn with_move(&self, mv: Move, piece: Piece) -> Self {
        let mut squares = self.squares;
        squares[mv.from.index()] = Square::Empty;
        squares[mv.to.index()] = Square::Occupied(piece);
        Self { squares }
    }

    /// Returns a copy with `square` written at `field`.
    pub fn with_square(&self, field: ChessField, square: Square) -> Self {
        let mut squares = self.squares;
        squares[field.index()] = square;
        Self { squares }
    }

    /// Returns an iterator over all pieces on the chessboard along with their coordinates.
    pub fn pieces_with_coordinates(&self) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, square)| square.piece().map(|piece| (ChessField::from_index(index), piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        self.pieces_with_coordinates().filter(move |(_, piece)| piece.color == color)
    }

    /// Renders the board as a text grid, rank 8 on top. Targets of
    /// `highlights` are marked with `*` (quiet) or `x` (capture) next to the
    /// piece glyph.
    pub fn render_to_string(&self, unicode: bool, highlights: &BTreeSet<Move>) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in 0..8u8 {
            let rank = 8 - row;
            board_representation.push_str(&format!("{} │", rank));
            for col in 0..8u8 {
                let field = ChessField::new(row, col);
                let glyph = match self.piece_at(field) {
                    Square::Empty => ' ',
                    Square::Occupied(piece) if unicode => piece.to_unicode(),
                    Square::Occupied(piece) => piece.to_char(),
                };
                let marker = match highlights.iter().find(|mv| mv.to == field) {
                    Some(mv) if mv.is_capture() => 'x',
                    Some(_) => '*',
                    None => ' ',
                };
                board_representation.push_str(&format!(" {}{}│", glyph, marker));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if row < 7 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}
