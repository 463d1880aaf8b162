use super::cluster::Cluster;
use super::error::ClusterError;
use super::linkage::linkage_distance;
use super::matrix::DistMatrix;
use rayon::prelude::*;

/// The two clusters of the working set with the smallest linkage distance, `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

impl ClosestPair {
    /// The better of two candidates. Ties go to the smaller `(a, b)`, so the result does not
    /// depend on which worker finished first.
    fn pick(self, other: Self) -> Self {
        if other.distance < self.distance
            || (other.distance == self.distance && (other.a, other.b) < (self.a, self.b))
        {
            other
        } else {
            self
        }
    }
}

fn pick(x: Option<ClosestPair>, y: Option<ClosestPair>) -> Option<ClosestPair> {
    match (x, y) {
        (Some(x), Some(y)) => Some(x.pick(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Scan all pairs `a < b` of the working set for the minimum linkage distance.
///
/// Rows `a` are spread over the current rayon pool; each row keeps its own best with a strict
/// `<`, and the row bests are then reduced pairwise. Returns `None` for fewer than two clusters.
pub fn find_closest_clusters(
    clusters: &[Cluster],
    matrix: &DistMatrix,
) -> Result<Option<ClosestPair>, ClusterError> {
    let m = clusters.len();

    (0..m)
        .into_par_iter()
        .map(|a| -> Result<Option<ClosestPair>, ClusterError> {
            let mut best: Option<ClosestPair> = None;
            for b in (a + 1)..m {
                let distance = linkage_distance(&clusters[a], &clusters[b], matrix)?;
                if best.map_or(true, |cur| distance < cur.distance) {
                    best = Some(ClosestPair { a, b, distance });
                }
            }
            Ok(best)
        })
        .try_reduce(|| None, |x, y| Ok(pick(x, y)))
}
