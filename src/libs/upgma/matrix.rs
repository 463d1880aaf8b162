use super::error::ClusterError;
use wide::f32x8;

const LANES: usize = 8;

/// A square, read-only matrix of sequence-to-sequence distances stored row by row.
///
/// Cell `(i, j)` lives at `values[i * size + j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistMatrix {
    size: usize,
    values: Vec<f32>,
}

impl DistMatrix {
    /// Wrap `values` as a `size` x `size` matrix.
    ///
    /// Fails when the matrix is empty, when the number of cells is not `size * size`,
    /// or when any cell is negative or not finite.
    ///
    /// ```
    /// use pmsa::libs::upgma::DistMatrix;
    /// let m = DistMatrix::new(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
    /// assert_eq!(m.get(0, 1), 1.0);
    /// assert!(DistMatrix::new(2, vec![0.0; 3]).is_err());
    /// ```
    pub fn new(size: usize, values: Vec<f32>) -> Result<Self, ClusterError> {
        if size == 0 {
            return Err(ClusterError::EmptyInput);
        }
        if values.len() != size * size {
            return Err(ClusterError::DimensionMismatch {
                expected: size * size,
                found: values.len(),
            });
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(ClusterError::InvalidDistance {
                row: pos / size,
                col: pos % size,
                value: values[pos],
            });
        }

        Ok(Self { size, values })
    }

    /// Number of sequences, i.e. rows.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.size + j]
    }

    /// Row `i`, the embedding vector of sequence `i`.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Sum of squared differences between the rows of sequences `i` and `j`.
    ///
    /// No square root is taken.
    pub fn squared_embedding_distance(&self, i: usize, j: usize) -> f32 {
        squared_distance(self.row(i), self.row(j))
    }
}

/// Squared Euclidean distance of two equally long vectors.
///
/// Full chunks of 8 are accumulated in `f32x8` lanes and reduced horizontally, the
/// `len % 8` leftover terms are added one by one.
pub fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let body = a.len() / LANES * LANES;

    let mut acc = f32x8::splat(0.0);
    for (ca, cb) in a[..body]
        .chunks_exact(LANES)
        .zip(b[..body].chunks_exact(LANES))
    {
        let va = f32x8::from(std::array::from_fn::<f32, LANES, _>(|l| ca[l]));
        let vb = f32x8::from(std::array::from_fn::<f32, LANES, _>(|l| cb[l]));
        let diff = va - vb;
        acc += diff * diff;
    }

    let mut sum = acc.reduce_add();
    for (x, y) in a[body..].iter().zip(&b[body..]) {
        let diff = x - y;
        sum += diff * diff;
    }

    sum
}

/// [`squared_distance`] with `W` plain lanes instead of `f32x8`.
///
/// `W == 1` is the fully scalar loop.
pub fn squared_distance_chunked<const W: usize>(a: &[f32], b: &[f32]) -> f32 {
    assert!(W > 0, "vector width must be positive");
    debug_assert_eq!(a.len(), b.len());
    let body = a.len() / W * W;

    let mut acc = [0f32; W];
    for (ca, cb) in a[..body].chunks_exact(W).zip(b[..body].chunks_exact(W)) {
        for lane in 0..W {
            let diff = ca[lane] - cb[lane];
            acc[lane] += diff * diff;
        }
    }

    let mut sum: f32 = acc.iter().sum();
    for (x, y) in a[body..].iter().zip(&b[body..]) {
        let diff = x - y;
        sum += diff * diff;
    }

    sum
}
