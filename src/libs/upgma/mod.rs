//! Average-linkage clustering of sequences into a guide tree.
//!
//! # Core Components
//!
//! * [`matrix`] - The sequence distance matrix and the squared-distance kernel over its rows.
//! * [`linkage`] - Average linkage between two clusters.
//! * [`search`] - Parallel search for the closest pair in the working set.
//! * [`cluster`] - Clusters and the merge/removal protocol.
//! * [`engine`] - The search-merge loop.
//! * [`tree`] - The guide tree recorded by the loop, with a Newick writer.
//!
//! # Algorithm Overview
//!
//! 1. **Input**: N sequences and an N x N distance matrix.
//! 2. **Embedding**: Row `i` of the matrix is the embedding of sequence `i`; two sequences are
//!    as far apart as the Euclidean distance between their rows.
//! 3. **Linkage**: The distance between clusters is the mean embedding distance over all
//!    cross pairs of members.
//! 4. **Loop**: The closest pair is removed from the working set and its concatenation is
//!    appended, until one cluster is left.

pub mod cluster;
pub mod engine;
pub mod error;
pub mod linkage;
pub mod matrix;
pub mod search;
pub mod tree;

pub use cluster::{merge_clusters, take_pair, Cluster};
pub use engine::{upgma, Clustering, MergeStep};
pub use error::ClusterError;
pub use linkage::linkage_distance;
pub use matrix::{squared_distance, squared_distance_chunked, DistMatrix};
pub use search::{find_closest_clusters, ClosestPair};
pub use tree::{GuideTree, Node, NodeId};
