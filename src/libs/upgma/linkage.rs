use super::cluster::Cluster;
use super::error::ClusterError;
use super::matrix::DistMatrix;

/// Average-linkage (UPGMA) distance between two clusters.
///
/// The mean, over every cross pair of members, of the Euclidean distance between their rows
/// of `matrix`. Runs on the calling thread; the pair search is what gets spread over the pool.
pub fn linkage_distance(
    left: &Cluster,
    right: &Cluster,
    matrix: &DistMatrix,
) -> Result<f64, ClusterError> {
    let mut total = 0f64;
    for s1 in &left.seqs {
        for s2 in &right.seqs {
            let sq = matrix.squared_embedding_distance(s1.index, s2.index);
            if sq < 0.0 {
                return Err(ClusterError::NegativeDistance {
                    i: s1.index,
                    j: s2.index,
                    value: sq,
                });
            }
            total += (sq as f64).sqrt();
        }
    }

    Ok(total / (left.len() * right.len()) as f64)
}
