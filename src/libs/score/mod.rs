//! Amino-acid substitution scores.
//!
//! * [`blosum`] - The BLOSUM62 table in its published residue order.
//! * [`table`] - A dense lookup array addressed by residue byte pairs.

pub mod blosum;
pub mod table;

pub use blosum::{BLOSUM62, NUM_LETTERS, ORDER};
pub use table::{SubTable, OFFSET, ROW_LEN, TABLE_SIZE};
