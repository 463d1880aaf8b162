use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};

/// Open `stdin` or a file for buffered reading. Files ending in `.gz` are decompressed.
///
/// ```
/// use std::io::BufRead;
/// let reader = pmsa::reader("tests/pmsa/small.fa").unwrap();
/// let headers = reader
///     .lines()
///     .map(|l| l.unwrap())
///     .filter(|l| l.starts_with('>'))
///     .count();
/// assert_eq!(headers, 4);
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Open `stdout` or a file for buffered writing.
pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use tempfile::tempdir;

    #[test]
    fn test_reader_gzip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.fa.gz");
        {
            let file = std::fs::File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, flate2::Compression::default());
            writeln!(encoder, ">seq1\nMKV").unwrap();
        }

        let lines: Vec<String> = reader(path.to_str().unwrap())
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec![">seq1".to_string(), "MKV".to_string()]);
    }

    #[test]
    fn test_reader_missing() {
        let err = reader("tests/pmsa/does_not_exist.fa").err().unwrap();
        assert!(err.to_string().contains("could not open"));
    }
}
