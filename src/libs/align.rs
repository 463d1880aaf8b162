use crate::libs::score::SubTable;

/// Result of aligning two sequences; gaps are `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairAlignment {
    pub score: i32,
    pub aligned_a: String,
    pub aligned_b: String,
}

impl PairAlignment {
    /// Fraction of alignment columns holding the same residue in both rows.
    pub fn identity(&self) -> f64 {
        let len = self.aligned_a.len();
        if len == 0 {
            return 0.0;
        }
        let same = self
            .aligned_a
            .bytes()
            .zip(self.aligned_b.bytes())
            .filter(|&(x, y)| x == y && x != b'-')
            .count();
        same as f64 / len as f64
    }
}

pub trait PairAligner: Sync {
    fn align(&self, a: &[u8], b: &[u8], table: &SubTable) -> PairAlignment;
}

/// Needleman-Wunsch with a linear gap penalty.
#[derive(Debug, Clone, Copy)]
pub struct GlobalAligner {
    /// Score added per gap column, normally negative
    pub gap: i32,
}

impl Default for GlobalAligner {
    fn default() -> Self {
        Self { gap: -4 }
    }
}

impl GlobalAligner {
    pub fn new(gap: i32) -> Self {
        Self { gap }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Step {
    Diag,
    Up,
    Left,
}

impl PairAligner for GlobalAligner {
    fn align(&self, a: &[u8], b: &[u8], table: &SubTable) -> PairAlignment {
        let (n, m) = (a.len(), b.len());
        let width = m + 1;

        // score[i][j]: best score of a[..i] against b[..j]
        let mut score = vec![0i32; (n + 1) * width];
        let mut trace = vec![Step::Diag; (n + 1) * width];

        for i in 1..=n {
            score[i * width] = self.gap * i as i32;
            trace[i * width] = Step::Up;
        }
        for j in 1..=m {
            score[j] = self.gap * j as i32;
            trace[j] = Step::Left;
        }

        for i in 1..=n {
            for j in 1..=m {
                let diag = score[(i - 1) * width + j - 1] + table.get_score(a[i - 1], b[j - 1]);
                let up = score[(i - 1) * width + j] + self.gap;
                let left = score[i * width + j - 1] + self.gap;

                let (best, step) = if diag >= up && diag >= left {
                    (diag, Step::Diag)
                } else if up >= left {
                    (up, Step::Up)
                } else {
                    (left, Step::Left)
                };
                score[i * width + j] = best;
                trace[i * width + j] = step;
            }
        }

        let mut aligned_a = Vec::with_capacity(n + m);
        let mut aligned_b = Vec::with_capacity(n + m);
        let (mut i, mut j) = (n, m);
        while i > 0 || j > 0 {
            match trace[i * width + j] {
                Step::Diag => {
                    aligned_a.push(a[i - 1]);
                    aligned_b.push(b[j - 1]);
                    i -= 1;
                    j -= 1;
                }
                Step::Up => {
                    aligned_a.push(a[i - 1]);
                    aligned_b.push(b'-');
                    i -= 1;
                }
                Step::Left => {
                    aligned_a.push(b'-');
                    aligned_b.push(b[j - 1]);
                    j -= 1;
                }
            }
        }
        aligned_a.reverse();
        aligned_b.reverse();

        PairAlignment {
            score: score[n * width + m],
            aligned_a: String::from_utf8_lossy(&aligned_a).into_owned(),
            aligned_b: String::from_utf8_lossy(&aligned_b).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_identical() {
        let table = SubTable::build();
        let aln = GlobalAligner::default().align(b"MKV", b"MKV", &table);
        // M 5, K 5, V 4
        assert_eq!(aln.score, 14);
        assert_eq!(aln.aligned_a, "MKV");
        assert_eq!(aln.aligned_b, "MKV");
        assert_eq!(aln.identity(), 1.0);
    }

    #[test]
    fn test_align_with_gap() {
        let table = SubTable::build();
        let aln = GlobalAligner::new(-4).align(b"MKWV", b"MKV", &table);
        assert_eq!(aln.aligned_a, "MKWV");
        assert_eq!(aln.aligned_b, "MK-V");
        assert_eq!(aln.score, 5 + 5 - 4 + 4);
        assert_eq!(aln.identity(), 0.75);
    }

    #[test]
    fn test_align_empty() {
        let table = SubTable::build();
        let aln = GlobalAligner::default().align(b"", b"AC", &table);
        assert_eq!(aln.aligned_a, "--");
        assert_eq!(aln.aligned_b, "AC");
        assert_eq!(aln.score, -8);
        assert_eq!(aln.identity(), 0.0);

        let aln = GlobalAligner::default().align(b"", b"", &table);
        assert_eq!(aln, PairAlignment::default());
    }

    #[test]
    fn test_align_symmetric_score() {
        let table = SubTable::build();
        let aligner = GlobalAligner::default();
        let ab = aligner.align(b"HEAGAWGHEE", b"PAWHEAE", &table);
        let ba = aligner.align(b"PAWHEAE", b"HEAGAWGHEE", &table);
        assert_eq!(ab.score, ba.score);
        assert_eq!(ab.aligned_a.len(), ab.aligned_b.len());
        assert_eq!(ab.aligned_a.replace('-', ""), "HEAGAWGHEE");
        assert_eq!(ab.aligned_b.replace('-', ""), "PAWHEAE");
    }
}
