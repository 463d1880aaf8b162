use crate::libs::align::PairAligner;
use crate::libs::score::SubTable;
use crate::libs::seq::Sequence;
use crate::libs::upgma::{ClusterError, DistMatrix};
use anyhow::Context;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// All-against-all distances, `1 - identity` of each global alignment.
///
/// Rows of the upper triangle are aligned in parallel on the current rayon pool and then
/// mirrored, so the returned matrix is complete and symmetric with a zero diagonal.
pub fn pairwise_distances<A: PairAligner + ?Sized>(
    seqs: &[Sequence],
    table: &SubTable,
    aligner: &A,
) -> anyhow::Result<DistMatrix> {
    let n = seqs.len();
    if n == 0 {
        return Err(ClusterError::EmptyInput.into());
    }

    let upper: Vec<Vec<f32>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| {
                    let aln = aligner.align(
                        seqs[i].residues.as_bytes(),
                        seqs[j].residues.as_bytes(),
                        table,
                    );
                    (1.0 - aln.identity()) as f32
                })
                .collect()
        })
        .collect();

    let mut values = vec![0f32; n * n];
    for (i, row) in upper.iter().enumerate() {
        for (k, &d) in row.iter().enumerate() {
            let j = i + 1 + k;
            values[i * n + j] = d;
            values[j * n + i] = d;
        }
    }

    Ok(DistMatrix::new(n, values)?)
}

/// Read a relaxed PHYLIP distance matrix: a count line, then one line per sequence with its
/// name and distances, separated by whitespace.
///
/// A row holds either all `n` distances, or only the lower triangle (`i` values, or `i + 1`
/// with the diagonal); lower-triangle rows are mirrored. Names must be unique and the result
/// symmetric.
pub fn read_phylip(infile: &str) -> anyhow::Result<(Vec<String>, DistMatrix)> {
    let reader = crate::reader(infile)?;

    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)))
        .filter(|res| res.as_ref().map_or(true, |(_, l)| !l.trim().is_empty()));

    let (line_no, header) = match lines.next() {
        Some(res) => res?,
        None => return Err(ClusterError::EmptyInput.into()),
    };
    let n: usize = header.trim().parse().with_context(|| {
        format!(
            "{} line {}: expected the number of sequences, found [{}]",
            infile,
            line_no,
            header.trim()
        )
    })?;
    if n == 0 {
        return Err(ClusterError::EmptyInput.into());
    }

    let mut names: Vec<String> = Vec::with_capacity(n);
    let mut values = vec![0f32; n * n];
    for i in 0..n {
        let (line_no, line) = match lines.next() {
            Some(res) => res?,
            None => anyhow::bail!("{}: expected {} rows, found {}", infile, n, i),
        };
        let mut fields = line.split_whitespace();
        let name = fields.next().unwrap_or_default().to_string();
        if names.contains(&name) {
            return Err(ClusterError::UnknownName(name).into());
        }

        let row: Vec<f32> = fields
            .map(|f| {
                f.parse::<f32>().with_context(|| {
                    format!("{} line {}: [{}] is not a distance", infile, line_no, f)
                })
            })
            .collect::<anyhow::Result<_>>()?;

        if row.len() == n {
            values[i * n..(i + 1) * n].copy_from_slice(&row);
        } else if row.len() == i || row.len() == i + 1 {
            for (j, &d) in row.iter().enumerate() {
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        } else {
            anyhow::bail!(
                "{} line {}: row [{}] has {} distances, expected {}",
                infile,
                line_no,
                name,
                row.len(),
                n
            );
        }
        names.push(name);
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let (x, y) = (values[i * n + j], values[j * n + i]);
            if (x - y).abs() > 1e-6 {
                anyhow::bail!(
                    "{}: distance between [{}] and [{}] is not symmetric ({} vs {})",
                    infile,
                    names[i],
                    names[j],
                    x,
                    y
                );
            }
        }
    }

    Ok((names, DistMatrix::new(n, values)?))
}

/// Load a relaxed PHYLIP matrix and reorder it to follow `seqs`.
///
/// Every sequence id must appear in the matrix; extra names in the matrix are ignored.
pub fn load_phylip(infile: &str, seqs: &[Sequence]) -> anyhow::Result<DistMatrix> {
    let (names, matrix) = read_phylip(infile)?;

    let pos_of: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let positions: Vec<usize> = seqs
        .iter()
        .map(|s| {
            pos_of
                .get(s.id.as_str())
                .copied()
                .ok_or_else(|| ClusterError::UnknownName(s.id.clone()))
        })
        .collect::<Result<_, _>>()?;

    let n = seqs.len();
    let mut values = Vec::with_capacity(n * n);
    for &pi in &positions {
        for &pj in &positions {
            values.push(matrix.get(pi, pj));
        }
    }

    Ok(DistMatrix::new(n, values)?)
}

/// Write `matrix` as relaxed PHYLIP, rows labelled with the sequence ids.
pub fn write_phylip(
    writer: &mut dyn Write,
    matrix: &DistMatrix,
    seqs: &[Sequence],
) -> anyhow::Result<()> {
    writer.write_fmt(format_args!("{}\n", matrix.size()))?;
    for (i, seq) in seqs.iter().enumerate() {
        let row = matrix.row(i).iter().map(|v| format!("{:.6}", v)).join("\t");
        writer.write_fmt(format_args!("{}\t{}\n", seq.id, row))?;
    }
    Ok(())
}
