use super::ChessField;
use lazy_static::lazy_static;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];
pub const KING_OFFSETS: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

/// On-board targets of a non-sliding piece, precomputed for every square.
pub struct JumpTable {
    targets: [Vec<ChessField>; 64],
}

impl JumpTable {
    fn new(offsets: &[(i8, i8)]) -> Self {
        let targets = std::array::from_fn(|index| {
            let origin = ChessField::from_index(index);
            offsets
                .iter()
                .filter_map(|&(d_row, d_col)| origin.offset(d_row, d_col))
                .collect()
        });
        JumpTable { targets }
    }

    pub fn targets(&self, origin: ChessField) -> &[ChessField] {
        &self.targets[origin.index()]
    }
}

lazy_static! {
    pub static ref KNIGHT_JUMPS: JumpTable = JumpTable::new(&KNIGHT_OFFSETS);
    pub static ref KING_JUMPS: JumpTable = JumpTable::new(&KING_OFFSETS);
}
