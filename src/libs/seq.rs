use crate::libs::upgma::ClusterError;

/// A protein sequence as loaded from FASTA.
///
/// `index` is the row/column of this sequence in the distance matrix. It is assigned once,
/// in input order, and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub id: String,
    pub residues: String,
    pub index: usize,
}

impl Sequence {
    pub fn new(id: impl Into<String>, residues: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            residues: residues.into(),
            index,
        }
    }
}

/// Number `(id, residues)` records in arrival order.
///
/// ```
/// use pmsa::libs::seq::from_records;
/// let seqs = from_records(vec![("a", "MKV"), ("b", "MKL")]).unwrap();
/// assert_eq!(seqs[1].index, 1);
/// assert!(from_records(Vec::<(&str, &str)>::new()).is_err());
/// ```
pub fn from_records<I, S, T>(records: I) -> anyhow::Result<Vec<Sequence>>
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: Into<String>,
{
    let seqs: Vec<Sequence> = records
        .into_iter()
        .enumerate()
        .map(|(i, (id, residues))| Sequence::new(id, residues, i))
        .collect();

    if seqs.is_empty() {
        return Err(ClusterError::EmptyInput.into());
    }
    Ok(seqs)
}

/// Load all records of a (possibly gzipped) FASTA file.
///
/// Residues are uppercased so they address the substitution table directly.
pub fn read_sequences(infile: &str) -> anyhow::Result<Vec<Sequence>> {
    let reader = crate::reader(infile)?;
    let mut fa_in = noodles_fasta::io::Reader::new(reader);

    let mut records = vec![];
    for result in fa_in.records() {
        let record = result?;
        let name = String::from_utf8(record.name().into())?;
        let seq: &[u8] = record.sequence().as_ref();
        let residues = String::from_utf8(seq.to_ascii_uppercase())?;
        records.push((name, residues));
    }

    from_records(records)
}
