//! Line grammars, sniffing and statistics for GMAP annotation files.
//!
//! ```text
//! interval     >label chr:start[..end][ tag]        (headers only)
//! splice-site  >label.intronN chr:start..end donor|acceptor[ distance]
//! intron       >label.intronN chr:start..end[ extra]
//! SNP          >label chr:position XY
//! tally        >total chr:start..end   or   [GATCN]<digit>...
//! ```
//!
//! Inputs may be gzip compressed; compression is detected from the magic bytes.

use flate2::read::MultiGzDecoder;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::core::config::{DatatypeConfig, SniffPolicy};
use crate::core::metadata::AnnotationStats;
use crate::core::types::{AnnotationKind, Datatype, LineScope};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Failed to read annotation file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AnnotationError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

fn grammar(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid built-in line grammar")
}

static INTERVAL_HEADER: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^>(\S+)\s((\S+):(\d+)(\.\.(\d+))?)(\s.(.+))?$"));

static SPLICE_SITE: LazyLock<Regex> = LazyLock::new(|| {
    grammar(r"^>(\S+\.intron\d+)\s((\S+):(\d+)\.\.(\d+))\s(donor|acceptor)(\s(\d+))?$")
});

static INTRON: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^>(\S+\.intron\d+)\s((\S+):(\d+)\.\.(\d+))(\s(.)+)?$"));

static SNP: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^>(\S+)\s((\S+):(\d+))\s([TACGW][TACGN])$"));

static TALLY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^>(\d+)\s((\S+):(\d+)\.\.(\d+))$"));

static TALLY_BASE_COUNTS: LazyLock<Regex> = LazyLock::new(|| grammar(r"^[GATCN]\d.*$"));

impl AnnotationKind {
    /// Whether a trimmed, non-blank line satisfies this kind's grammar
    #[must_use]
    pub fn matches_line(self, line: &str) -> bool {
        match self {
            AnnotationKind::Interval => INTERVAL_HEADER.is_match(line),
            AnnotationKind::SpliceSite => SPLICE_SITE.is_match(line),
            AnnotationKind::Intron => INTRON.is_match(line),
            AnnotationKind::Snp => SNP.is_match(line),
            AnnotationKind::Tally => {
                TALLY_HEADER.is_match(line) || TALLY_BASE_COUNTS.is_match(line)
            }
        }
    }
}

/// Outcome of scanning the head of a file against one grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every examined line matched; `examined` may be zero
    Clean { examined: usize },
    /// The 1-based physical line that broke the grammar
    Mismatch { line_number: usize },
}

/// Open a file for line reading, transparently decompressing gzip
///
/// # Errors
///
/// Returns `AnnotationError::Io` if the file cannot be opened or probed.
pub fn open_lines(path: &Path) -> Result<Box<dyn BufRead>, AnnotationError> {
    let mut file = File::open(path).map_err(|e| AnnotationError::io(path, e))?;

    let mut magic = [0u8; 2];
    let read = read_up_to(&mut file, &mut magic).map_err(|e| AnnotationError::io(path, e))?;
    file.seek(SeekFrom::Start(0))
        .map_err(|e| AnnotationError::io(path, e))?;

    if read == GZIP_MAGIC.len() && magic == GZIP_MAGIC {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn read_up_to(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Check up to `limit` counted lines of `reader` against `kind`'s grammar.
///
/// Blank lines never count. For [`LineScope::HeadersOnly`] grammars only
/// lines starting with `>` are checked and counted. Lines are decoded lossily,
/// so non-UTF-8 bytes fail the grammar check rather than the read.
///
/// # Errors
///
/// Returns the underlying I/O error if a line cannot be read.
pub fn scan_lines<R: BufRead>(
    reader: R,
    kind: AnnotationKind,
    limit: usize,
) -> std::io::Result<ScanOutcome> {
    let scope = kind.line_scope();
    let mut examined = 0;

    for (i, line) in reader.split(b'\n').enumerate() {
        if examined >= limit {
            break;
        }
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if scope == LineScope::HeadersOnly && !line.starts_with('>') {
            continue;
        }

        examined += 1;
        if !kind.matches_line(line) {
            return Ok(ScanOutcome::Mismatch { line_number: i + 1 });
        }
    }

    Ok(ScanOutcome::Clean { examined })
}

/// Decide whether `path` is an annotation file of the given kind.
///
/// Never fails: unreadable files simply do not match. Under
/// [`SniffPolicy::Legacy`] a clean scan still reports `false`.
#[must_use]
pub fn sniff(path: &Path, kind: AnnotationKind, config: &DatatypeConfig) -> bool {
    let outcome = open_lines(path)
        .map_err(|e| e.to_string())
        .and_then(|reader| {
            scan_lines(reader, kind, config.sniff_line_limit).map_err(|e| e.to_string())
        });

    match outcome {
        Ok(ScanOutcome::Clean { examined }) => {
            debug!(path = %path.display(), %kind, examined, "clean annotation scan");
            config.sniff_policy == SniffPolicy::AcceptCleanScan && examined > 0
        }
        Ok(ScanOutcome::Mismatch { line_number }) => {
            debug!(path = %path.display(), %kind, line_number, "annotation grammar mismatch");
            false
        }
        Err(error) => {
            debug!(path = %path.display(), %kind, %error, "annotation sniff could not read file");
            false
        }
    }
}

impl Datatype {
    /// Decide whether `path` holds a dataset of this datatype.
    ///
    /// Only annotation datatypes are ever recognized from content. Composite
    /// indexes, interval index trees and GSNAP output never sniff.
    #[must_use]
    pub fn sniff(self, path: &Path, config: &DatatypeConfig) -> bool {
        match self {
            Datatype::Annotation(kind) => sniff(path, kind, config),
            _ => false,
        }
    }
}

/// Count every line and every `>` header line in one streaming pass
///
/// # Errors
///
/// Returns `AnnotationError::Io` if the file cannot be opened or read.
pub fn compute_annotation_stats(path: &Path) -> Result<AnnotationStats, AnnotationError> {
    let reader = open_lines(path)?;
    count_lines(reader).map_err(|e| AnnotationError::io(path, e))
}

fn count_lines<R: BufRead>(mut reader: R) -> std::io::Result<AnnotationStats> {
    let mut stats = AnnotationStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        stats.data_lines += 1;
        if line.trim_ascii_start().first() == Some(&b'>') {
            stats.annotations += 1;
        }
    }

    Ok(stats)
}

/// First `line_count` lines of a file, each cut to `line_width` characters
///
/// # Errors
///
/// Returns `AnnotationError::Io` if the file cannot be opened or read.
pub fn file_peek(
    path: &Path,
    line_count: usize,
    line_width: usize,
) -> Result<String, AnnotationError> {
    let reader = open_lines(path)?;
    let mut lines = Vec::with_capacity(line_count);

    for line in reader.split(b'\n').take(line_count) {
        let line = line.map_err(|e| AnnotationError::io(path, e))?;
        let text = String::from_utf8_lossy(&line);
        let text = text.trim_end_matches('\r');
        lines.push(text.chars().take(line_width).collect::<String>());
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SPLICE_SITES: &str = "\
>NM_004448.ERBB2.intron1 17:35110090..35110091 donor 6678
>NM_004448.ERBB2.intron1 17:35116768..35116769 acceptor 6678
>NM_004449.ERG.intron1 21:38955452..38955451 donor 783
";

    fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    fn accepting() -> DatatypeConfig {
        DatatypeConfig {
            sniff_policy: SniffPolicy::AcceptCleanScan,
            ..DatatypeConfig::default()
        }
    }

    #[test]
    fn test_interval_grammar() {
        let kind = AnnotationKind::Interval;
        assert!(kind.matches_line(">EST123 chr1:100..200"));
        assert!(kind.matches_line(">EST123 chr1:100"));
        assert!(kind.matches_line(">EST123 chr1:200..100 minus"));
        assert!(!kind.matches_line(">EST123"));
        assert!(!kind.matches_line(">EST123 chr1"));
    }

    #[test]
    fn test_splice_site_grammar() {
        let kind = AnnotationKind::SpliceSite;
        assert!(kind.matches_line(">NM_004448.ERBB2.intron1 17:35110090..35110091 donor 6678"));
        assert!(kind.matches_line(">NM_004448.ERBB2.intron2 17:35116768..35116769 acceptor"));
        assert!(!kind.matches_line(">NM_004448.ERBB2.exon1 17:35110090..35110091 donor 6678"));
        assert!(!kind.matches_line(">a chr1:1..2 donor 5"));
        assert!(!kind.matches_line(">x.intron1 17:1..2 branch"));
    }

    #[test]
    fn test_intron_grammar() {
        let kind = AnnotationKind::Intron;
        assert!(kind.matches_line(">NM_004448.ERBB2.intron1 17:35110090..35116769"));
        assert!(kind.matches_line(">NM_004449.ERG.intron2 21:38878638..38869541 extra"));
        assert!(!kind.matches_line(">NM_004449.ERG.intron2 21:38878638"));
    }

    #[test]
    fn test_snp_grammar() {
        let kind = AnnotationKind::Snp;
        assert!(kind.matches_line(">rs62211261 21:14379270 CG"));
        assert!(kind.matches_line(">rs62211263 21:14379298 WN"));
        assert!(!kind.matches_line(">rs62211263 21:14379298 NW"));
        assert!(!kind.matches_line(">rs62211263 21:14379298 CGT"));
    }

    #[test]
    fn test_tally_grammar() {
        let kind = AnnotationKind::Tally;
        assert!(kind.matches_line(">144 chr20:57268791..57268935"));
        assert!(kind.matches_line("G0"));
        assert!(kind.matches_line("A2(1@36,1@1|1Q2,1Q-8)"));
        assert!(!kind.matches_line(">total chr20:57268791..57268935"));
        assert!(!kind.matches_line("X1"));
    }

    #[test]
    fn test_scan_short_circuits_on_mismatch() {
        let text = format!("{SPLICE_SITES}\nnot a splice site\n{SPLICE_SITES}");
        let outcome = scan_lines(text.as_bytes(), AnnotationKind::SpliceSite, 10).unwrap();
        assert_eq!(outcome, ScanOutcome::Mismatch { line_number: 5 });
    }

    #[test]
    fn test_scan_skips_blank_lines_and_respects_limit() {
        let text =
            format!("\n\n{SPLICE_SITES}\n{SPLICE_SITES}{SPLICE_SITES}{SPLICE_SITES}garbage\n");
        let outcome = scan_lines(text.as_bytes(), AnnotationKind::SpliceSite, 10).unwrap();
        assert_eq!(outcome, ScanOutcome::Clean { examined: 10 });
    }

    #[test]
    fn test_interval_scan_only_checks_headers() {
        let text = ">EST1 chr1:1..100\nfree text annotation\n\n>EST2 chr2:5\n";
        let outcome = scan_lines(text.as_bytes(), AnnotationKind::Interval, 10).unwrap();
        assert_eq!(outcome, ScanOutcome::Clean { examined: 2 });
    }

    #[test]
    fn test_sniff_legacy_never_matches() {
        let file = write_temp(SPLICE_SITES.as_bytes());
        let config = DatatypeConfig::default();
        assert!(!sniff(file.path(), AnnotationKind::SpliceSite, &config));
    }

    #[test]
    fn test_sniff_legacy_rejects_repeated_non_intron_labels() {
        let file =
            write_temp(b">a chr1:1..2 donor 5\n>a chr1:1..2 donor 5\n>a chr1:1..2 donor 5\n");
        assert!(!sniff(file.path(), AnnotationKind::SpliceSite, &DatatypeConfig::default()));
        assert!(!sniff(file.path(), AnnotationKind::SpliceSite, &accepting()));
    }

    #[test]
    fn test_sniff_accept_clean_scan() {
        let file = write_temp(SPLICE_SITES.as_bytes());
        assert!(sniff(file.path(), AnnotationKind::SpliceSite, &accepting()));
        assert!(sniff(file.path(), AnnotationKind::Intron, &accepting()));
        assert!(!sniff(file.path(), AnnotationKind::Snp, &accepting()));
    }

    #[test]
    fn test_interval_sniff_tolerates_latin1_body() {
        let file = write_temp(b">EST1 chr1:1..100\nbr\xfblure caf\xe9\n>EST2 chr2:5\n");
        assert!(sniff(file.path(), AnnotationKind::Interval, &accepting()));
    }

    #[test]
    fn test_non_utf8_header_is_a_mismatch() {
        let text: &[u8] = b">EST1 chr1:1..100\n>caf\xe9\n";
        let outcome = scan_lines(text, AnnotationKind::Interval, 10).unwrap();
        assert_eq!(outcome, ScanOutcome::Mismatch { line_number: 2 });
    }

    #[test]
    fn test_datatype_sniff() {
        let file = write_temp(SPLICE_SITES.as_bytes());
        let config = accepting();

        assert!(Datatype::Annotation(AnnotationKind::SpliceSite).sniff(file.path(), &config));
        assert!(!Datatype::GmapDb.sniff(file.path(), &config));
        assert!(!Datatype::GmapSnpIndex.sniff(file.path(), &config));
        assert!(!Datatype::SpliceSitesIntervalIndexTree.sniff(file.path(), &config));
        assert!(!Datatype::GsnapResult.sniff(file.path(), &config));
    }

    #[test]
    fn test_composite_datatypes_never_sniff_their_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hg19.chromosome"), "chr1\t1..10\t10\n").unwrap();

        for datatype in [Datatype::GmapDb, Datatype::GmapSnpIndex] {
            assert!(!datatype.sniff(dir.path(), &accepting()));
            assert!(!datatype.sniff(dir.path(), &DatatypeConfig::default()));
        }
    }

    #[test]
    fn test_sniff_empty_file_never_matches() {
        let file = write_temp(b"\n\n");
        assert!(!sniff(file.path(), AnnotationKind::Tally, &accepting()));
    }

    #[test]
    fn test_sniff_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!sniff(&dir.path().join("absent"), AnnotationKind::Snp, &accepting()));
    }

    #[test]
    fn test_stats() {
        let file = write_temp(b">a chr1:1..2\nbody\n  >b chr1:3..4\n>c chr2:1\nbody\n");
        let stats = compute_annotation_stats(file.path()).unwrap();
        assert_eq!(stats, AnnotationStats { data_lines: 5, annotations: 3 });
    }

    #[test]
    fn test_stats_empty_file() {
        let file = write_temp(b"");
        let stats = compute_annotation_stats(file.path()).unwrap();
        assert_eq!(stats, AnnotationStats::default());
    }

    #[test]
    fn test_stats_counts_blank_lines_and_unterminated_last_line() {
        let file = write_temp(b">a chr1:1\n\n>b chr1:2");
        let stats = compute_annotation_stats(file.path()).unwrap();
        assert_eq!(stats, AnnotationStats { data_lines: 3, annotations: 2 });
    }

    #[test]
    fn test_stats_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">rs1 21:100 CG\n>rs2 21:200 AT\n").unwrap();
        let file = write_temp(&encoder.finish().unwrap());

        let stats = compute_annotation_stats(file.path()).unwrap();
        assert_eq!(stats, AnnotationStats { data_lines: 2, annotations: 2 });
        assert!(sniff(file.path(), AnnotationKind::Snp, &accepting()));
    }

    #[test]
    fn test_stats_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = compute_annotation_stats(&dir.path().join("absent"));
        assert!(matches!(result, Err(AnnotationError::Io { .. })));
    }

    #[test]
    fn test_file_peek() {
        let file = write_temp(b"line1\nline2\nline3\r\nline4\n");
        assert_eq!(file_peek(file.path(), 3, 256).unwrap(), "line1\nline2\nline3");
        assert_eq!(file_peek(file.path(), 1, 3).unwrap(), "lin");
    }
}
