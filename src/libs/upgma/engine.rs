use super::cluster::{merge_clusters, take_pair, Cluster};
use super::error::ClusterError;
use super::matrix::DistMatrix;
use super::search::find_closest_clusters;
use super::tree::GuideTree;
use crate::libs::align::PairAligner;
use crate::libs::score::SubTable;
use crate::libs::seq::Sequence;
use log::{debug, info};

/// One merge of the clustering loop.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    /// Guide tree node of the cluster that came first in the working set
    pub left: usize,
    pub right: usize,
    /// Node created by this merge
    pub node: usize,
    /// Linkage distance between `left` and `right`
    pub distance: f64,
    /// Matrix indices of the two sequences that were aligned
    pub representatives: (usize, usize),
    pub score: i32,
}

#[derive(Debug, Clone)]
pub struct Clustering {
    /// The surviving cluster, holding every input sequence
    pub cluster: Cluster,
    pub steps: Vec<MergeStep>,
    pub tree: GuideTree,
}

/// The cross pair with the smallest direct matrix distance; first found wins.
fn representatives(left: &Cluster, right: &Cluster, matrix: &DistMatrix) -> (usize, usize) {
    let mut best = (left.seqs[0].index, right.seqs[0].index);
    let mut best_dist = matrix.get(best.0, best.1);
    for s1 in &left.seqs {
        for s2 in &right.seqs {
            let d = matrix.get(s1.index, s2.index);
            if d < best_dist {
                best_dist = d;
                best = (s1.index, s2.index);
            }
        }
    }
    best
}

/// Agglomerative clustering of `seqs` until one cluster is left.
///
/// Each round finds the closest pair of clusters with [`find_closest_clusters`], aligns their
/// representative sequences with `aligner`, and replaces the pair by its concatenation at the
/// end of the working set. `N` sequences take exactly `N - 1` rounds.
///
/// Parallelism comes from the rayon pool the call runs in.
pub fn upgma<A: PairAligner + ?Sized>(
    seqs: &[Sequence],
    matrix: &DistMatrix,
    table: &SubTable,
    aligner: &A,
) -> Result<Clustering, ClusterError> {
    let n = seqs.len();
    if n == 0 {
        return Err(ClusterError::EmptyInput);
    }
    if matrix.size() != n {
        return Err(ClusterError::DimensionMismatch {
            expected: n * n,
            found: matrix.size() * matrix.size(),
        });
    }
    if let Some((position, seq)) = seqs.iter().enumerate().find(|(i, s)| s.index != *i) {
        return Err(ClusterError::IndexOutOfPlace {
            id: seq.id.clone(),
            index: seq.index,
            position,
        });
    }

    let mut tree = GuideTree::new();
    let mut working: Vec<Cluster> = Vec::with_capacity(n);
    for seq in seqs {
        tree.add_leaf(seq.id.clone());
        working.push(Cluster::singleton(seq.clone()));
    }

    let mut steps = Vec::with_capacity(n - 1);
    while working.len() > 1 {
        let closest = match find_closest_clusters(&working, matrix)? {
            Some(closest) => closest,
            None => break,
        };

        let (left, right) = take_pair(&mut working, closest.a, closest.b);

        let (r1, r2) = representatives(&left, &right, matrix);
        let alignment = aligner.align(
            seqs[r1].residues.as_bytes(),
            seqs[r2].residues.as_bytes(),
            table,
        );

        let node = tree.join(left.id, right.id, closest.distance / 2.0);
        debug!(
            "merge {} + {} -> {} at {:.6}, {} clusters left",
            left.id,
            right.id,
            node,
            closest.distance,
            working.len() + 1
        );
        steps.push(MergeStep {
            left: left.id,
            right: right.id,
            node,
            distance: closest.distance,
            representatives: (r1, r2),
            score: alignment.score,
        });

        working.push(merge_clusters(left, right, node));
    }

    info!("{} sequences clustered in {} merges", n, steps.len());

    // the loop only exits with one cluster
    let cluster = working.pop().ok_or(ClusterError::EmptyInput)?;
    Ok(Clustering {
        cluster,
        steps,
        tree,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::align::{GlobalAligner, PairAlignment};
    use std::sync::Mutex;

    // Records every call instead of aligning
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl PairAligner for Recorder {
        fn align(&self, a: &[u8], b: &[u8], _table: &SubTable) -> PairAlignment {
            self.calls.lock().unwrap().push((
                String::from_utf8_lossy(a).into_owned(),
                String::from_utf8_lossy(b).into_owned(),
            ));
            PairAlignment::default()
        }
    }

    fn seqs(n: usize) -> Vec<Sequence> {
        (0..n)
            .map(|i| Sequence::new(format!("s{}", i), format!("MK{}", "AV".repeat(i)), i))
            .collect()
    }

    fn spread_matrix(n: usize) -> DistMatrix {
        let mut values = vec![0f32; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let v = ((i * 5 + j * 11) % 13) as f32 / 3.0 + 1.0;
                values[i * n + j] = v;
                values[j * n + i] = v;
            }
        }
        DistMatrix::new(n, values).unwrap()
    }

    #[test]
    fn test_single_sequence() {
        let table = SubTable::build();
        let recorder = Recorder::default();
        let m = DistMatrix::new(1, vec![0.0]).unwrap();

        let result = upgma(&seqs(1), &m, &table, &recorder).unwrap();
        assert!(result.steps.is_empty());
        assert_eq!(result.cluster.indices(), vec![0]);
        assert!(recorder.calls.lock().unwrap().is_empty());
        assert_eq!(result.tree.to_newick(false), "s0;");
    }

    #[test]
    fn test_two_sequences() {
        let table = SubTable::build();
        let recorder = Recorder::default();
        let m = DistMatrix::new(2, vec![0.0, 0.7, 0.7, 0.0]).unwrap();

        let result = upgma(&seqs(2), &m, &table, &recorder).unwrap();
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.cluster.indices(), vec![0, 1]);
        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec![("MK".to_string(), "MKAV".to_string())]
        );
        assert_eq!(result.tree.to_newick(false), "(s0,s1);");
    }

    #[test]
    fn test_identical_rows_merge_first() {
        #[rustfmt::skip]
        let values = vec![
            0.0, 0.0, 4.0, 8.0,
            0.0, 0.0, 4.0, 8.0,
            4.0, 4.0, 0.0, 3.0,
            8.0, 8.0, 3.0, 0.0,
        ];
        let m = DistMatrix::new(4, values).unwrap();
        let table = SubTable::build();

        let result = upgma(&seqs(4), &m, &table, &GlobalAligner::default()).unwrap();
        let first = &result.steps[0];
        assert_eq!((first.left, first.right), (0, 1));
        assert_eq!(first.distance, 0.0);
        assert_eq!(first.node, 4);
    }

    #[test]
    fn test_merge_count_and_membership() {
        let n = 12;
        let table = SubTable::build();
        let recorder = Recorder::default();

        let result = upgma(&seqs(n), &spread_matrix(n), &table, &recorder).unwrap();
        assert_eq!(result.steps.len(), n - 1);
        assert_eq!(recorder.calls.lock().unwrap().len(), n - 1);

        let mut indices = result.cluster.indices();
        indices.sort();
        assert_eq!(indices, (0..n).collect::<Vec<_>>());

        // nodes are numbered after the leaves, one per merge
        for (k, step) in result.steps.iter().enumerate() {
            assert_eq!(step.node, n + k);
        }
        assert_eq!(result.tree.len(), 2 * n - 1);
        assert_eq!(result.tree.get_root(), Some(2 * n - 2));

        // final cluster order follows the tree's leaf order
        let root = result.tree.get_root().unwrap();
        let names: Vec<String> = result.cluster.seqs.iter().map(|s| s.id.clone()).collect();
        assert_eq!(result.tree.leaves(root), names);
    }

    #[test]
    fn test_deterministic_across_pools() {
        let n = 15;
        let table = SubTable::build();
        let m = spread_matrix(n);
        let aligner = GlobalAligner::default();

        let runs: Vec<Vec<MergeStep>> = [1, 2, 4]
            .iter()
            .map(|&threads| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .unwrap();
                pool.install(|| upgma(&seqs(n), &m, &table, &aligner).unwrap().steps)
            })
            .collect();
        assert_eq!(runs[0], runs[1]);
        assert_eq!(runs[0], runs[2]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let table = SubTable::build();
        let aligner = GlobalAligner::default();
        let m = DistMatrix::new(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();

        assert_eq!(
            upgma(&[], &m, &table, &aligner).err(),
            Some(ClusterError::EmptyInput)
        );
        assert_eq!(
            upgma(&seqs(3), &m, &table, &aligner).err(),
            Some(ClusterError::DimensionMismatch {
                expected: 9,
                found: 4
            })
        );

        let mut shuffled = seqs(2);
        shuffled.swap(0, 1);
        let err = upgma(&shuffled, &m, &table, &aligner).unwrap_err();
        assert_eq!(
            err,
            ClusterError::IndexOutOfPlace {
                id: "s1".to_string(),
                index: 1,
                position: 0,
            }
        );
        assert_eq!(
            err.to_string(),
            "Sequence [s1] at position 0 carries matrix index 1"
        );
    }
}
