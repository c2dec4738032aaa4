use crate::error::{ChessError, ChessResult};
use std::fmt;

pub const BOARD_SIZE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

/// Content of one board slot. Every slot holds exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

impl Square {
    pub fn is_empty(&self) -> bool {
        matches!(self, Square::Empty)
    }

    pub fn piece(&self) -> Option<Piece> {
        match self {
            Square::Occupied(piece) => Some(*piece),
            Square::Empty => None,
        }
    }
}

/// Board coordinate. Row 0 is the black home rank (rank 8), row 7 the white
/// home rank (rank 1). Columns run from file a (0) to file h (7).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct ChessField {
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum MoveKind {
    Quiet,
    Capture,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Move {
    pub from: ChessField,
    pub to: ChessField,
    pub kind: MoveKind,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self {
        Self { color, kind }
    }

    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self { color, kind })
    }

    pub fn to_unicode(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceType::Pawn) => '♙',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::King) => '♔',
            (Color::Black, PieceType::Pawn) => '♟',
            (Color::Black, PieceType::Knight) => '♞',
            (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Rook) => '♜',
            (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::King) => '♚',
        }
    }
}

impl ChessField {
    /// Panics when either coordinate is outside the board. Callers mapping
    /// pointer positions to squares must stay within 0..8.
    pub fn new(row: u8, col: u8) -> Self {
        assert!(
            row < BOARD_SIZE && col < BOARD_SIZE,
            "square ({}, {}) is off the board",
            row,
            col
        );
        Self { row, col }
    }

    pub fn from_index(index: usize) -> Self {
        assert!(index < 64, "square index {} is off the board", index);
        Self {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        }
    }

    /// Panics when the field was built off the board, e.g. through the public
    /// fields instead of [`ChessField::new`].
    pub fn index(&self) -> usize {
        assert!(
            self.row < BOARD_SIZE && self.col < BOARD_SIZE,
            "square ({}, {}) is off the board",
            self.row,
            self.col
        );
        self.row as usize * 8 + self.col as usize
    }

    /// Steps by `(d_row, d_col)`, returning `None` when the target leaves the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = ChessField> {
        (0..64).map(ChessField::from_index)
    }

    pub fn from_algebraic(algebraic: &str) -> ChessResult<Self> {
        let mut chars = algebraic.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => {
                let col = file as u8 - b'a';
                let row = BOARD_SIZE - (rank as u8 - b'0');
                Ok(Self { row, col })
            }
            _ => Err(ChessError::InvalidSquare(algebraic.to_string())),
        }
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.row, self.col)
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

impl Move {
    pub fn quiet(from: ChessField, to: ChessField) -> Self {
        debug_assert_ne!(from, to);
        Self {
            from,
            to,
            kind: MoveKind::Quiet,
        }
    }

    pub fn capture(from: ChessField, to: ChessField) -> Self {
        debug_assert_ne!(from, to);
        Self {
            from,
            to,
            kind: MoveKind::Capture,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.kind == MoveKind::Capture
    }

    pub fn as_algebraic(&self) -> String {
        format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match self.kind {
            MoveKind::Quiet => '-',
            MoveKind::Capture => 'x',
        };
        write!(f, "{}{}{}", self.from, separator, self.to)
    }
}

pub fn to_algebraic_square(row: u8, col: u8) -> String {
    let file = (b'a' + col) as char; // 0-7 column index to 'a'-'h'
    let rank = BOARD_SIZE - row; // row 0 is rank 8
    format!("{}{}", file, rank)
}
