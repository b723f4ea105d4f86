use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tally_logging::{tally_debug, tally_info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read labels: {0}")]
    Io(#[from] io::Error),
    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },
}

/// Read one label per line.
///
/// Line terminators (`\n` or `\r\n`) are removed. The final terminator does
/// not produce an empty label, but empty lines in the middle are kept.
pub fn read_labels(mut reader: impl BufRead) -> Result<Vec<String>, IngestError> {
    let mut labels = Vec::new();
    let mut buf = Vec::new();
    let mut line = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let label = String::from_utf8(std::mem::take(&mut buf))
            .map_err(|_| IngestError::InvalidUtf8 { line })?;
        labels.push(label);
    }
    tally_debug!("Read {} labels", labels.len());
    Ok(labels)
}

/// Read labels from the file at `path`.
pub fn read_labels_from_path(path: &Path) -> Result<Vec<String>, IngestError> {
    let file = File::open(path)?;
    let labels = read_labels(BufReader::new(file))?;
    tally_info!("Loaded {} labels from {:?}", labels.len(), path);
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_newline_adds_no_label() {
        let labels = read_labels("a\nb\n".as_bytes()).unwrap();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn missing_trailing_newline_keeps_last_label() {
        let labels = read_labels("a\nb".as_bytes()).unwrap();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn crlf_is_stripped_and_blank_lines_kept() {
        let labels = read_labels("a\r\n\r\nb\r\n".as_bytes()).unwrap();
        assert_eq!(labels, vec!["a", "", "b"]);
    }

    #[test]
    fn invalid_utf8_reports_line() {
        let bytes: &[u8] = b"ok\n\xff\xfe\n";
        let err = read_labels(bytes).unwrap_err();
        assert!(matches!(err, IngestError::InvalidUtf8 { line: 2 }));
    }

    #[test]
    fn empty_input_gives_no_labels() {
        assert!(read_labels(&b""[..]).unwrap().is_empty());
    }
}
