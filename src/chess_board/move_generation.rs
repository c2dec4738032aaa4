use super::jump_tables::{JumpTable, KING_JUMPS, KNIGHT_JUMPS};
use super::{ChessBoard, ChessField, Color, Move, Piece, PieceType, Square};
use log::trace;
use std::collections::BTreeSet;

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1), (-1, 0), (1, 0)];

/// Quiet and capture targets reachable by one piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSets {
    pub quiet: BTreeSet<Move>,
    pub capture: BTreeSet<Move>,
}

impl MoveSets {
    pub fn is_empty(&self) -> bool {
        self.quiet.is_empty() && self.capture.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quiet.len() + self.capture.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.quiet.iter().chain(self.capture.iter())
    }

    /// Union of the quiet and capture sets.
    pub fn all(&self) -> BTreeSet<Move> {
        self.iter().copied().collect()
    }

    /// The move landing on `target`, if any.
    pub fn move_to(&self, target: ChessField) -> Option<Move> {
        self.iter().find(|mv| mv.to == target).copied()
    }

    pub fn extend(&mut self, other: MoveSets) {
        self.quiet.extend(other.quiet);
        self.capture.extend(other.capture);
    }

    /// Records the step onto `to`. Returns `true` when `to` was empty, i.e.
    /// a sliding piece may continue past it.
    fn classify(&mut self, board: &ChessBoard, from: ChessField, to: ChessField, color: Color) -> bool {
        match board.piece_at(to) {
            Square::Empty => {
                self.quiet.insert(Move::quiet(from, to));
                true
            }
            Square::Occupied(p) => {
                if p.color != color {
                    self.capture.insert(Move::capture(from, to));
                }
                false
            }
        }
    }
}

/// A move generation rule for one piece kind.
pub type MoveStrategy = fn(&ChessBoard, ChessField, Color) -> MoveSets;

pub fn strategy_for(kind: PieceType) -> MoveStrategy {
    match kind {
        PieceType::Pawn => generate_pawn_moves,
        PieceType::Knight => generate_knight_moves,
        PieceType::Bishop => generate_bishop_moves,
        PieceType::Rook => generate_rook_moves,
        PieceType::Queen => generate_queen_moves,
        PieceType::King => generate_king_moves,
    }
}

impl ChessBoard {
    /// Moves available to `piece` standing on `field`. King safety is not
    /// considered.
    pub fn generate_moves(&self, field: ChessField, piece: Piece) -> MoveSets {
        let moves = strategy_for(piece.kind)(self, field, piece.color);
        trace!(
            "{} {} on {}: {} quiet, {} capture",
            piece.color,
            piece.kind.name(),
            field,
            moves.quiet.len(),
            moves.capture.len()
        );
        moves
    }

    /// Moves of whatever stands on `field`; an empty square has none.
    pub fn generate_moves_at(&self, field: ChessField) -> MoveSets {
        match self.piece_at(field) {
            Square::Occupied(piece) => self.generate_moves(field, piece),
            Square::Empty => MoveSets::default(),
        }
    }

    /// Union of the moves of every piece of `color`.
    pub fn all_moves(&self, color: Color) -> MoveSets {
        let mut all_moves = MoveSets::default();
        for (field, piece) in self.pieces_of(color) {
            all_moves.extend(self.generate_moves(field, piece));
        }
        all_moves
    }
}

pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

pub fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

fn generate_pawn_moves(board: &ChessBoard, field: ChessField, color: Color) -> MoveSets {
    let mut moves = MoveSets::default();
    let forward = pawn_direction(color);

    // A pawn on the far rank stays a pawn and has nowhere to go.
    let Some(one_forward) = field.offset(forward, 0) else {
        return moves;
    };

    if board.piece_at(one_forward).is_empty() {
        moves.quiet.insert(Move::quiet(field, one_forward));

        // Double move from start position
        if field.row == pawn_start_row(color) {
            if let Some(two_forward) = one_forward.offset(forward, 0) {
                if board.piece_at(two_forward).is_empty() {
                    moves.quiet.insert(Move::quiet(field, two_forward));
                }
            }
        }
    }

    // Capture diagonally
    for d_col in [-1, 1] {
        if let Some(target) = field.offset(forward, d_col) {
            if let Square::Occupied(opponent_piece) = board.piece_at(target) {
                if opponent_piece.color != color {
                    moves.capture.insert(Move::capture(field, target));
                }
            }
        }
    }

    moves
}

fn generate_knight_moves(board: &ChessBoard, field: ChessField, color: Color) -> MoveSets {
    generate_jump_moves(board, field, color, &KNIGHT_JUMPS)
}

/// King steps, without filtering squares attacked by the opponent.
fn generate_king_moves(board: &ChessBoard, field: ChessField, color: Color) -> MoveSets {
    generate_jump_moves(board, field, color, &KING_JUMPS)
}

fn generate_jump_moves(board: &ChessBoard, field: ChessField, color: Color, table: &JumpTable) -> MoveSets {
    let mut moves = MoveSets::default();
    for &target in table.targets(field) {
        moves.classify(board, field, target, color);
    }
    moves
}

/// Generate sliding piece moves (bishop, rook, queen).
fn generate_sliding_moves(board: &ChessBoard, field: ChessField, color: Color, directions: &[(i8, i8)]) -> MoveSets {
    let mut moves = MoveSets::default();

    for &(d_row, d_col) in directions {
        let mut current = field;
        while let Some(next) = current.offset(d_row, d_col) {
            if !moves.classify(board, field, next, color) {
                break; // Block sliding
            }
            current = next;
        }
    }

    moves
}

fn generate_bishop_moves(board: &ChessBoard, field: ChessField, color: Color) -> MoveSets {
    generate_sliding_moves(board, field, color, &BISHOP_DIRECTIONS)
}

fn generate_rook_moves(board: &ChessBoard, field: ChessField, color: Color) -> MoveSets {
    generate_sliding_moves(board, field, color, &ROOK_DIRECTIONS)
}

fn generate_queen_moves(board: &ChessBoard, field: ChessField, color: Color) -> MoveSets {
    generate_sliding_moves(board, field, color, &QUEEN_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::test_utils::{assert_moves, board_from_fen, field, random_board};
    use crate::chess_board::MoveKind;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    impl ChessBoard {
        pub fn generate_moves_from_algebraic(&self, square: &str) -> MoveSets {
            self.generate_moves_at(field(square))
        }
    }

    #[test]
    fn test_generate_pawn_moves() {
        // Initial position: single and double step, nothing to capture
        let board = ChessBoard::initial();
        let moves = board.generate_moves_from_algebraic("e2");
        assert_moves(moves.quiet.iter().copied(), vec!["e2e3", "e2e4"]);
        assert_moves(moves.capture.iter().copied(), vec![]);

        // Black pawn on its start row
        let moves = board.generate_moves_from_algebraic("e7");
        assert_moves(moves.quiet.iter().copied(), vec!["e7e6", "e7e5"]);

        // Double step blocked on the second square
        let board = board_from_fen("8/8/8/8/4p3/8/4P3/8 w");
        let moves = board.generate_moves_from_algebraic("e2");
        assert_moves(moves.quiet.iter().copied(), vec!["e2e3"]);

        // Blocked directly: no single and no double step
        let board = board_from_fen("8/8/8/8/8/4n3/4P3/8 w");
        assert!(board.generate_moves_from_algebraic("e2").is_empty());

        // Captures on both diagonals, own piece on a diagonal is skipped
        let board = board_from_fen("8/8/8/3p1p2/4P3/8/8/8 w");
        let moves = board.generate_moves_from_algebraic("e4");
        assert_moves(moves.quiet.iter().copied(), vec!["e4e5"]);
        assert_moves(moves.capture.iter().copied(), vec!["e4d5", "e4f5"]);

        let board = board_from_fen("8/8/8/3P1p2/4P3/8/8/8 w");
        let moves = board.generate_moves_from_algebraic("e4");
        assert_moves(moves.capture.iter().copied(), vec!["e4f5"]);

        // Edge file pawn only looks at one diagonal
        let board = board_from_fen("8/8/8/8/8/1p6/P7/8 w");
        let moves = board.generate_moves_from_algebraic("a2");
        assert_moves(moves.quiet.iter().copied(), vec!["a2a3", "a2a4"]);
        assert_moves(moves.capture.iter().copied(), vec!["a2b3"]);

        // Black captures downwards
        let board = board_from_fen("8/8/8/3p4/2P1P3/8/8/8 b");
        let moves = board.generate_moves_from_algebraic("d5");
        assert_moves(moves.quiet.iter().copied(), vec!["d5d4"]);
        assert_moves(moves.capture.iter().copied(), vec!["d5c4", "d5e4"]);
    }

    #[test]
    fn test_pawn_on_far_rank_has_no_moves() {
        let board = board_from_fen("4P3/8/8/8/8/8/8/4p3 w");
        assert!(board.generate_moves_from_algebraic("e8").is_empty());
        assert!(board.generate_moves_from_algebraic("e1").is_empty());
    }

    #[test]
    fn test_pawn_double_step_only_from_start_row() {
        let board = board_from_fen("8/8/8/8/8/4P3/8/8 w");
        assert_moves(board.generate_moves_from_algebraic("e3").quiet.iter().copied(), vec!["e3e4"]);

        let board = board_from_fen("8/8/4p3/8/8/8/8/8 b");
        assert_moves(board.generate_moves_from_algebraic("e6").quiet.iter().copied(), vec!["e6e5"]);
    }

    #[test]
    fn test_generate_knight_moves() {
        let board = board_from_fen("8/8/8/8/3N4/8/8/8 w");
        let moves = board.generate_moves_from_algebraic("d4");
        assert_moves(
            moves.quiet.iter().copied(),
            vec!["d4b3", "d4b5", "d4c2", "d4c6", "d4e2", "d4e6", "d4f3", "d4f5"],
        );

        // Corner knight with one own piece and one opponent
        let board = board_from_fen("8/8/8/8/8/1p6/2P5/N7 w");
        let moves = board.generate_moves_from_algebraic("a1");
        assert_moves(moves.quiet.iter().copied(), vec![]);
        assert_moves(moves.capture.iter().copied(), vec!["a1b3"]);

        // Knights jump over blockers
        let board = ChessBoard::initial();
        let moves = board.generate_moves_from_algebraic("b1");
        assert_moves(moves.quiet.iter().copied(), vec!["b1a3", "b1c3"]);
        assert!(moves.capture.is_empty());
    }

    #[test]
    fn test_generate_bishop_moves() {
        let board = board_from_fen("8/8/8/8/3B4/8/8/8 w");
        let moves = board.generate_moves_from_algebraic("d4");
        assert_moves(
            moves.quiet.iter().copied(),
            vec![
                "d4a7", "d4b6", "d4c5", "d4e3", "d4f2", "d4g1", "d4a1", "d4b2", "d4c3", "d4e5", "d4f6", "d4g7",
                "d4h8",
            ],
        );

        // Capture stops the ray, own piece stops it without a move
        let board = board_from_fen("8/8/1p6/8/3B4/4P3/8/8 w");
        let moves = board.generate_moves_from_algebraic("d4");
        assert_moves(
            moves.quiet.iter().copied(),
            vec!["d4c5", "d4c3", "d4b2", "d4a1", "d4e5", "d4f6", "d4g7", "d4h8"],
        );
        assert_moves(moves.capture.iter().copied(), vec!["d4b6"]);
    }

    #[test]
    fn test_generate_rook_moves() {
        let board = board_from_fen("8/8/8/8/3R4/8/8/8 w");
        let moves = board.generate_moves_from_algebraic("d4");
        assert_moves(
            moves.quiet.iter().copied(),
            vec![
                "d4d1", "d4d2", "d4d3", "d4d5", "d4d6", "d4d7", "d4d8", "d4a4", "d4b4", "d4c4", "d4e4", "d4f4", "d4g4",
                "d4h4",
            ],
        );

        // White rook with a capture and blocked squares
        let board = board_from_fen("8/8/8/8/3bR3/8/4N3/8 w");
        let moves = board.generate_moves_from_algebraic("e4");
        assert_moves(
            moves.quiet.iter().copied(),
            vec!["e4e3", "e4e5", "e4e6", "e4e7", "e4e8", "e4f4", "e4g4", "e4h4"],
        );
        assert_moves(moves.capture.iter().copied(), vec!["e4d4"]);

        // Black rook with a capture and blocked squares
        let board = board_from_fen("8/8/8/8/3Br3/8/4n3/8 b");
        let moves = board.generate_moves_from_algebraic("e4");
        assert_moves(moves.capture.iter().copied(), vec!["e4d4"]);
        assert_eq!(moves.quiet.len(), 8);
    }

    #[test]
    fn test_generate_queen_moves() {
        let board = board_from_fen("8/8/8/8/3Q4/8/8/8 w");
        let moves = board.generate_moves_from_algebraic("d4");
        assert_moves(
            moves.quiet.iter().copied(),
            vec![
                "d4d1", "d4d2", "d4d3", "d4d5", "d4d6", "d4d7", "d4d8", "d4a4", "d4b4", "d4c4", "d4e4", "d4f4", "d4g4",
                "d4h4", "d4a7", "d4b6", "d4c5", "d4e3", "d4f2", "d4g1", "d4a1", "d4b2", "d4c3", "d4e5", "d4f6", "d4g7",
                "d4h8",
            ],
        );

        // Queen move from g6 with 3 captures and a blocked square
        let board = board_from_fen("4b1b1/6b1/4r1Q1/5P2/6B1/8/8/8 w");
        let moves = board.generate_moves_from_algebraic("g6");
        assert_moves(
            moves.quiet.iter().copied(),
            vec!["g6f7", "g6f6", "g6g5", "g6h5", "g6h6", "g6h7"],
        );
        assert_moves(moves.capture.iter().copied(), vec!["g6e8", "g6e6", "g6g7"]);

        // Queen from a5 with one capture and blocked squares
        let board = board_from_fen("8/b7/1b6/qb6/1P6/P7/8/8 b");
        let moves = board.generate_moves_from_algebraic("a5");
        assert_moves(moves.quiet.iter().copied(), vec!["a5a6", "a5a4"]);
        assert_moves(moves.capture.iter().copied(), vec!["a5a3", "a5b4"]);
    }

    #[test]
    fn test_generate_king_moves() {
        let board = board_from_fen("8/8/8/8/8/3K4/8/8 w");
        let moves = board.generate_moves_from_algebraic("d3");
        assert_moves(
            moves.quiet.iter().copied(),
            vec!["d3c2", "d3c3", "d3c4", "d3d2", "d3d4", "d3e2", "d3e3", "d3e4"],
        );

        // Blocked by own pieces, three captures
        let board = board_from_fen("8/8/8/3ppp2/3PKP2/3PPP2/8/8 w");
        let moves = board.generate_moves_from_algebraic("e4");
        assert_moves(moves.quiet.iter().copied(), vec![]);
        assert_moves(moves.capture.iter().copied(), vec!["e4d5", "e4e5", "e4f5"]);

        // Black king in the corner
        let board = board_from_fen("8/8/8/8/8/8/8/7k b");
        assert_moves(
            board.generate_moves_from_algebraic("h1").quiet.iter().copied(),
            vec!["h1h2", "h1g1", "h1g2"],
        );

        // Walking next to the opposing king is offered: no king safety
        let board = board_from_fen("8/8/8/8/8/2k5/8/3K4 w");
        let moves = board.generate_moves_from_algebraic("d1");
        assert!(moves.quiet.contains(&Move::quiet(field("d1"), field("d2"))));
        assert!(moves.quiet.contains(&Move::quiet(field("d1"), field("c2"))));
    }

    #[test]
    fn test_no_castling_offered() {
        let board = board_from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert_moves(board.generate_moves_from_algebraic("e1").quiet.iter().copied(), vec!["e1d1", "e1f1"]);
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        let board = ChessBoard::initial();
        assert_eq!(board.generate_moves_from_algebraic("e4"), MoveSets::default());
    }

    #[test]
    fn test_initial_position_scenarios() {
        let board = ChessBoard::initial();
        assert!(board.generate_moves_from_algebraic("a1").is_empty());
        assert!(board.generate_moves_from_algebraic("e1").is_empty());

        let mut expected: Vec<String> = vec!["b1a3", "b1c3", "g1f3", "g1h3"].into_iter().map(String::from).collect();
        for file in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'] {
            expected.push(format!("{0}2{0}3", file));
            expected.push(format!("{0}2{0}4", file));
        }
        assert_moves(
            board.all_moves(Color::White).iter().copied(),
            expected.iter().map(String::as_str).collect(),
        );
    }

    #[test]
    fn test_dispatch_table_matches_kind() {
        let board = board_from_fen("8/8/2p5/8/8/8/3P4/8 w");
        let origin = field("d4");
        for kind in PieceType::ALL {
            let piece = Piece::new(kind, Color::White);
            let direct = strategy_for(kind)(&board, origin, Color::White);
            assert_eq!(board.generate_moves(origin, piece), direct);
        }
    }

    #[test]
    fn test_quiet_targets_empty_and_captures_hit_opponents() {
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..200 {
            let board = random_board(&mut rng, 20);
            for (origin, piece) in board.pieces_with_coordinates() {
                let moves = board.generate_moves(origin, piece);
                for mv in &moves.quiet {
                    assert_eq!(mv.kind, MoveKind::Quiet);
                    assert_ne!(mv.from, mv.to);
                    assert_eq!(board.piece_at(mv.to), Square::Empty);
                }
                for mv in &moves.capture {
                    assert_eq!(mv.kind, MoveKind::Capture);
                    match board.piece_at(mv.to) {
                        Square::Occupied(target) => assert_eq!(target.color, piece.color.opposite()),
                        Square::Empty => panic!("capture onto empty square {}", mv),
                    }
                }
                assert!(moves.iter().all(|mv| mv.from == origin));
            }
        }
    }

    #[test]
    fn test_leaper_targets_are_single_jumps() {
        let mut rng = Pcg64::seed_from_u64(11);
        for _ in 0..200 {
            let board = random_board(&mut rng, 24);
            for (origin, piece) in board.pieces_with_coordinates() {
                if !matches!(piece.kind, PieceType::Knight | PieceType::King) {
                    continue;
                }
                for mv in board.generate_moves(origin, piece).iter() {
                    assert!(mv.to.row < 8 && mv.to.col < 8);
                    let d_row = mv.to.row as i32 - origin.row as i32;
                    let d_col = mv.to.col as i32 - origin.col as i32;
                    let distance = d_row * d_row + d_col * d_col;
                    if piece.kind == PieceType::Knight {
                        assert_eq!(distance, 5);
                    } else {
                        assert!(distance == 1 || distance == 2);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sliding_runs_are_contiguous() {
        let mut rng = Pcg64::seed_from_u64(23);
        for _ in 0..200 {
            let origin = ChessField::new(rng.gen_range(0..8), rng.gen_range(0..8));
            let piece = Piece::new(PieceType::Queen, Color::White);
            let board = random_board(&mut rng, 16).with_square(origin, Square::Occupied(piece));
            let moves = board.generate_moves(origin, piece);

            // Walk every ray by hand: empties until the first piece, which is
            // a capture only for an opponent, then nothing beyond it.
            let mut expected = 0;
            for (d_row, d_col) in QUEEN_DIRECTIONS {
                let mut current = origin;
                let mut blocked = false;
                while let Some(next) = current.offset(d_row, d_col) {
                    if blocked {
                        assert_eq!(moves.move_to(next), None);
                    } else {
                        match board.piece_at(next) {
                            Square::Empty => {
                                assert!(moves.quiet.contains(&Move::quiet(origin, next)));
                                expected += 1;
                            }
                            Square::Occupied(p) => {
                                let captured = moves.capture.contains(&Move::capture(origin, next));
                                assert_eq!(captured, p.color == Color::Black);
                                expected += captured as usize;
                                blocked = true;
                            }
                        }
                    }
                    current = next;
                }
            }
            assert_eq!(moves.len(), expected);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut rng = Pcg64::seed_from_u64(3);
        let board = random_board(&mut rng, 24);
        for (origin, piece) in board.pieces_with_coordinates() {
            assert_eq!(board.generate_moves(origin, piece), board.generate_moves(origin, piece));
        }
    }
}
