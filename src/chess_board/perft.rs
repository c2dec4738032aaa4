use super::{ChessBoard, Color};

/// Counts the leaves of the move tree `depth` plies deep, alternating sides
/// after every move. Useful to cross-check the generator against known counts.
pub fn perft(board: &ChessBoard, active_color: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1u64;
    }

    let mut node_count = 0u64;
    for (field, piece) in board.pieces_of(active_color) {
        for mv in board.generate_moves(field, piece).iter() {
            let new_board = board.apply(*mv, piece);
            node_count += perft(&new_board, active_color.opposite(), depth - 1);
        }
    }
    node_count
}
