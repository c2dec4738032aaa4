use super::{ChessBoard, ChessField, Color, Move, Piece, PieceType, Square};
use rand::Rng;

pub fn assert_moves<I: Iterator<Item = Move>>(generated: I, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.map(|m| m.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}

pub fn board_from_fen(fen: &str) -> ChessBoard {
    ChessBoard::from_fen(fen).expect("test FEN must parse").0
}

pub fn field(square: &str) -> ChessField {
    ChessField::from_algebraic(square).expect("test square must parse")
}

/// Scatters up to `pieces` random pieces over an empty board.
pub fn random_board<R: Rng>(rng: &mut R, pieces: usize) -> ChessBoard {
    let mut board = ChessBoard::empty();
    for _ in 0..pieces {
        let field = ChessField::from_index(rng.gen_range(0..64));
        let kind = PieceType::ALL[rng.gen_range(0..PieceType::ALL.len())];
        let color = if rng.gen_bool(0.5) { Color::White } else { Color::Black };
        board = board.with_square(field, Square::Occupied(Piece::new(kind, color)));
    }
    board
}
