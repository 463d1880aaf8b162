use super::blosum::{BLOSUM62, NUM_LETTERS, ORDER};
use wide::i32x8;

/// Added to a residue byte before it addresses a row or column.
pub const OFFSET: usize = 0;

/// Row length of the lookup array; covers the 7-bit ASCII space.
pub const ROW_LEN: usize = 128;

/// Number of cells in the lookup array.
pub const TABLE_SIZE: usize = ROW_LEN * ROW_LEN;

const LANES: usize = 8;

/// A dense amino-acid substitution matrix.
///
/// Cell `(a + OFFSET) * ROW_LEN + (b + OFFSET)` holds the score of aligning residue byte `a`
/// against `b`. Pairs outside the 20 standard amino acids score 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTable {
    matrix: Vec<i32>,
}

impl Default for SubTable {
    fn default() -> Self {
        Self::build()
    }
}

impl SubTable {
    /// Scatter BLOSUM62 into the lookup array, eight columns per step.
    ///
    /// The 16 columns that fill whole vectors have their addresses computed in `i32x8` lanes;
    /// the last 4 columns are written one at a time.
    pub fn build() -> Self {
        let mut matrix = vec![0; TABLE_SIZE];

        let offset = i32x8::splat(OFFSET as i32);
        let row_len = i32x8::splat(ROW_LEN as i32);
        let body = NUM_LETTERS / LANES * LANES;

        for (i, &acid_i) in ORDER.iter().enumerate() {
            let pos_row = (i32x8::splat(acid_i as i32) + offset) * row_len;

            for j in (0..body).step_by(LANES) {
                let mut acids = [0i32; LANES];
                for (lane, acid) in acids.iter_mut().enumerate() {
                    *acid = ORDER[j + lane] as i32;
                }
                let indices = (pos_row + i32x8::from(acids) + offset).to_array();

                for (lane, &idx) in indices.iter().enumerate() {
                    matrix[idx as usize] = BLOSUM62[i][j + lane];
                }
            }

            for j in body..NUM_LETTERS {
                matrix[Self::index(acid_i, ORDER[j])] = BLOSUM62[i][j];
            }
        }

        SubTable { matrix }
    }

    /// Same table as [`SubTable::build`], with `W` columns per step and a scalar tail of
    /// `NUM_LETTERS % W` columns.
    pub fn build_with_width<const W: usize>() -> Self {
        assert!(W > 0, "vector width must be positive");
        let mut matrix = vec![0; TABLE_SIZE];
        let body = NUM_LETTERS / W * W;

        for (i, &acid_i) in ORDER.iter().enumerate() {
            let pos_row = (acid_i as usize + OFFSET) * ROW_LEN;

            for j in (0..body).step_by(W) {
                let mut indices = [0usize; W];
                for (lane, idx) in indices.iter_mut().enumerate() {
                    *idx = pos_row + ORDER[j + lane] as usize + OFFSET;
                }
                for (lane, &idx) in indices.iter().enumerate() {
                    matrix[idx] = BLOSUM62[i][j + lane];
                }
            }

            for j in body..NUM_LETTERS {
                matrix[Self::index(acid_i, ORDER[j])] = BLOSUM62[i][j];
            }
        }

        SubTable { matrix }
    }

    /// Address of the `(a, b)` cell.
    pub fn index(a: u8, b: u8) -> usize {
        (a as usize + OFFSET) * ROW_LEN + (b as usize + OFFSET)
    }

    /// Substitution score of two residue bytes, case-insensitive.
    pub fn get_score(&self, a: u8, b: u8) -> i32 {
        let (a, b) = (a.to_ascii_uppercase(), b.to_ascii_uppercase());
        if (a as usize) < ROW_LEN && (b as usize) < ROW_LEN {
            self.matrix[Self::index(a, b)]
        } else {
            0
        }
    }

    /// The raw lookup array, for aligners that index it directly.
    pub fn as_slice(&self) -> &[i32] {
        &self.matrix
    }
}
