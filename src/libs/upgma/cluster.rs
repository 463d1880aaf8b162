use crate::libs::seq::Sequence;

/// An ordered group of sequences, one node of the guide tree.
///
/// `id` is the node id in the guide tree; positions in the working set shift as clusters are
/// merged, ids don't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub id: usize,
    pub seqs: Vec<Sequence>,
}

impl Cluster {
    /// A cluster holding one sequence, identified by the sequence's matrix index.
    pub fn singleton(seq: Sequence) -> Self {
        Self {
            id: seq.index,
            seqs: vec![seq],
        }
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    /// Matrix indices of the members, in order.
    pub fn indices(&self) -> Vec<usize> {
        self.seqs.iter().map(|s| s.index).collect()
    }
}

/// Concatenate `left` and `right`, keeping both member orders.
///
/// ```
/// use pmsa::libs::seq::Sequence;
/// use pmsa::libs::upgma::{merge_clusters, Cluster};
/// let a = Cluster::singleton(Sequence::new("a", "MK", 0));
/// let b = Cluster::singleton(Sequence::new("b", "MV", 1));
/// let merged = merge_clusters(a, b, 2);
/// assert_eq!(merged.indices(), vec![0, 1]);
/// assert_eq!(merged.id, 2);
/// ```
pub fn merge_clusters(left: Cluster, right: Cluster, id: usize) -> Cluster {
    let mut seqs = left.seqs;
    seqs.extend(right.seqs);
    Cluster { id, seqs }
}

/// Remove the clusters at positions `a` and `b` from the working set and return them in
/// `(a, b)` order.
///
/// The higher position is removed first so the lower one still points at the right cluster.
pub fn take_pair(working: &mut Vec<Cluster>, a: usize, b: usize) -> (Cluster, Cluster) {
    assert_ne!(a, b, "cannot take a cluster twice");
    if a > b {
        let first = working.remove(a);
        let second = working.remove(b);
        (first, second)
    } else {
        let second = working.remove(b);
        let first = working.remove(a);
        (first, second)
    }
}
