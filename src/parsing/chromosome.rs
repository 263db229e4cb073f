//! Parser for GMAP `<db>.chromosome` files.
//!
//! Format: `name\tstart..end\tlength[\tcircular]`, one chromosome per line.
//! Lines with fewer than three fields or a non-numeric length are collected as
//! [`MalformedLine`]s rather than aborting the scan. Entries past
//! [`MAX_CHROMOSOMES`] are dropped and the list is marked truncated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::validation::{check_chromosome_limit, MAX_CHROMOSOMES};

/// Marker in the fourth field for circular chromosomes
pub const CIRCULAR_MARKER: &str = "circular";

#[derive(Error, Debug)]
pub enum ChromosomeFileError {
    #[error("Cannot read chromosome file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One well-formed chromosome line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeEntry {
    pub name: String,
    pub length: u64,
    pub circular: bool,
}

/// Why a line was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    TooFewFields(usize),
    InvalidLength(String),
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewFields(n) => write!(f, "{n} fields, expected at least 3"),
            Self::InvalidLength(s) => write!(f, "invalid length '{s}'"),
        }
    }
}

/// A skipped line, 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line_number: usize,
    pub reason: MalformedReason,
}

/// Parsed contents of a chromosome file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromosomeList {
    /// Entries in file order
    pub entries: Vec<ChromosomeEntry>,
    pub malformed: Vec<MalformedLine>,
    /// Limit message, set when the scan stopped at the chromosome limit
    pub truncated: Option<String>,
}

/// Read and parse a chromosome file
///
/// # Errors
///
/// Returns `ChromosomeFileError::Unreadable` if the file cannot be opened or read.
pub fn parse_chromosome_file(path: &Path) -> Result<ChromosomeList, ChromosomeFileError> {
    let unreadable = |source| ChromosomeFileError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let reader = File::open(path).map(BufReader::new).map_err(unreadable)?;
    parse_chromosome_reader(reader, MAX_CHROMOSOMES).map_err(unreadable)
}

/// Parse chromosome file contents from text
#[must_use]
pub fn parse_chromosome_text(text: &str) -> ChromosomeList {
    // Reading from a byte slice of valid UTF-8 cannot fail
    parse_chromosome_reader(text.as_bytes(), MAX_CHROMOSOMES).unwrap_or_default()
}

fn parse_chromosome_reader<R: BufRead>(
    reader: R,
    max_entries: usize,
) -> std::io::Result<ChromosomeList> {
    let mut list = ChromosomeList::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = i + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < 3 {
            list.malformed.push(MalformedLine {
                line_number,
                reason: MalformedReason::TooFewFields(fields.len()),
            });
            continue;
        }

        let Ok(length) = fields[2].trim().parse::<u64>() else {
            list.malformed.push(MalformedLine {
                line_number,
                reason: MalformedReason::InvalidLength(fields[2].to_string()),
            });
            continue;
        };

        // Check chromosome limit for DOS protection
        if let Some(message) = check_chromosome_limit(list.entries.len(), max_entries) {
            list.truncated = Some(format!("{message}, ignoring lines from {line_number}"));
            break;
        }

        list.entries.push(ChromosomeEntry {
            name: fields[0].to_string(),
            length,
            circular: fields.get(3) == Some(&CIRCULAR_MARKER),
        });
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chromosome_text() {
        let text = "chr1\t0\t1000\tcircular\nchr2\t0\t2000\n";
        let list = parse_chromosome_text(text);

        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[0].name, "chr1");
        assert_eq!(list.entries[0].length, 1000);
        assert!(list.entries[0].circular);
        assert_eq!(list.entries[1].name, "chr2");
        assert_eq!(list.entries[1].length, 2000);
        assert!(!list.entries[1].circular);
        assert!(list.malformed.is_empty());
    }

    #[test]
    fn test_gmap_build_layout() {
        let text = "1\t1..249250621\t249250621\n\
                    2\t249250622..492449994\t243199373\n\
                    MT\t3095677413..3095693983\t16571\tcircular\n";
        let list = parse_chromosome_text(text);

        let names: Vec<&str> = list.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["1", "2", "MT"]);
        assert_eq!(list.entries[2].length, 16_571);
        assert!(list.entries[2].circular);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "chr1\t0\t1000\nbogus\nchr2\t0\tlong\nchr3\t0\t3000\n";
        let list = parse_chromosome_text(text);

        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[1].name, "chr3");
        assert_eq!(
            list.malformed,
            vec![
                MalformedLine {
                    line_number: 2,
                    reason: MalformedReason::TooFewFields(1),
                },
                MalformedLine {
                    line_number: 3,
                    reason: MalformedReason::InvalidLength("long".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_other_fourth_field_is_linear() {
        let list = parse_chromosome_text("chrX\t0\t500\tlinear\n");
        assert!(!list.entries[0].circular);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_chromosome_file(&dir.path().join("hg19.chromosome"));
        assert!(matches!(result, Err(ChromosomeFileError::Unreadable { .. })));
    }

    #[test]
    fn test_limit_keeps_entries_read_so_far() {
        let text = "s1\t1..10\t10\ns2\t11..20\t10\nbad\ns3\t21..30\t10\n";
        let list = parse_chromosome_reader(text.as_bytes(), 2).unwrap();

        let names: Vec<&str> = list.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["s1", "s2"]);
        assert_eq!(list.malformed.len(), 1);
        let message = list.truncated.unwrap();
        assert!(message.contains("maximum of 2"));
        assert!(message.contains("from 4"));
    }

    #[test]
    fn test_large_scaffold_assembly_is_complete() {
        let text: String = (0..100_001)
            .map(|i| format!("scaf{i}\t1..10\t10\n"))
            .collect();
        let list = parse_chromosome_text(&text);

        assert_eq!(list.entries.len(), 100_001);
        assert!(list.truncated.is_none());
    }
}
