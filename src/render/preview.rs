use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::config::DatatypeConfig;
use crate::core::metadata::{AnnotationStats, IndexMetadata, SnpIndexMetadata};
use crate::core::types::Datatype;
use crate::gmapdb::genome::extract_genome_metadata;
use crate::gmapdb::snp_index::extract_snp_metadata;
use crate::gmapdb::ExtractError;
use crate::parsing::annotation::{compute_annotation_stats, file_peek, AnnotationError};
use crate::render::join_list;
use crate::utils::validation::{commaify, nice_size};

/// Peek shown for a dataset whose files were purged
pub const PURGED_PEEK: &str = "file does not exist";

/// Blurb shown for a dataset whose files were purged
pub const PURGED_BLURB: &str = "file purged from disk";

/// Peek shown for opaque binary datasets
pub const BINARY_PEEK: &str = "binary data";

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}

/// Short preview text the host stores on a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Multi-line summary
    pub peek: String,
    /// One-line caption
    pub blurb: String,
}

impl Preview {
    #[must_use]
    pub fn purged() -> Self {
        Self {
            peek: PURGED_PEEK.to_string(),
            blurb: PURGED_BLURB.to_string(),
        }
    }
}

/// Metadata records that can summarize themselves as a [`Preview`]
pub trait RenderPreview {
    /// Preview for a live dataset
    fn preview(&self) -> Preview;

    /// Preview honoring the purged state; never blank
    fn render_preview(&self, purged: bool) -> Preview {
        if purged {
            Preview::purged()
        } else {
            self.preview()
        }
    }
}

impl RenderPreview for IndexMetadata {
    fn preview(&self) -> Preview {
        Preview {
            peek: format!(
                "GMAPDB index {}\n chroms {}\n kmers {} cmet {} atoi {}\n maps {}",
                self.db_name,
                join_list(&self.chromosomes),
                join_list(&self.kmers),
                self.cmet,
                self.atoi,
                join_list(&self.maps),
            ),
            blurb: format!("GMAPDB {}", self.db_name),
        }
    }
}

impl RenderPreview for SnpIndexMetadata {
    fn preview(&self) -> Preview {
        let text = format!("GMAP SNPindex {} on {}", self.snps_name, self.db_name);
        Preview {
            peek: text.clone(),
            blurb: text,
        }
    }
}

/// Preview for an annotation file: its first lines plus an annotation count
///
/// # Errors
///
/// Returns `AnnotationError::Io` if a live file cannot be read.
pub fn annotation_preview(
    path: &Path,
    stats: &AnnotationStats,
    purged: bool,
    config: &DatatypeConfig,
) -> Result<Preview, AnnotationError> {
    if purged {
        return Ok(Preview::purged());
    }

    let peek = file_peek(path, config.peek_line_count, config.peek_line_width)?;
    let blurb = if stats.annotations > 0 {
        format!("{} annotations", commaify(stats.annotations))
    } else {
        nice_size(file_size(path)?)
    };

    Ok(Preview { peek, blurb })
}

/// Preview any registered datatype from its files on disk.
///
/// Composite datatypes take their extra-files directory; every other datatype
/// takes its data file. Purged datasets are never read.
///
/// # Errors
///
/// Returns `PreviewError` if extraction faults or a live file cannot be read.
pub fn preview_dataset(
    datatype: Datatype,
    path: &Path,
    purged: bool,
    config: &DatatypeConfig,
) -> Result<Preview, PreviewError> {
    if purged {
        return Ok(Preview::purged());
    }

    let preview = match datatype {
        Datatype::GmapDb => extract_genome_metadata(path, config)?.preview(),
        Datatype::GmapSnpIndex => extract_snp_metadata(path)?.preview(),
        Datatype::Annotation(_) => {
            let stats = compute_annotation_stats(path)?;
            annotation_preview(path, &stats, false, config)?
        }
        binary if binary.is_binary() => Preview {
            peek: BINARY_PEEK.to_string(),
            blurb: nice_size(file_size(path)?),
        },
        _ => annotation_preview(path, &AnnotationStats::default(), false, config)?,
    };

    Ok(preview)
}

fn file_size(path: &Path) -> Result<u64, AnnotationError> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| AnnotationError::Io {
            path: path.display().to_string(),
            source,
        })
}

/// The peek to display: the stored one, or the datatype's fallback text
#[must_use]
pub fn display_peek(datatype: Datatype, stored: Option<&Preview>) -> String {
    stored.map_or_else(
        || datatype.fallback_peek().to_string(),
        |preview| preview.peek.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_genome() -> IndexMetadata {
        IndexMetadata {
            db_name: "hg19".to_string(),
            chromosomes: vec!["chr1".to_string(), "chrM".to_string()],
            chrom_lengths: vec![249_250_621, 16_571],
            circular: vec!["chrM".to_string()],
            kmers: [12, 15].into_iter().collect(),
            maps: vec!["dbsnp".to_string()],
            cmet: true,
            ..IndexMetadata::default()
        }
    }

    #[test]
    fn test_genome_preview() {
        let preview = sample_genome().render_preview(false);
        assert_eq!(
            preview.peek,
            "GMAPDB index hg19\n chroms chr1, chrM\n kmers 12, 15 cmet true atoi false\n maps dbsnp"
        );
        assert_eq!(preview.blurb, "GMAPDB hg19");
    }

    #[test]
    fn test_purged_preview() {
        let preview = sample_genome().render_preview(true);
        assert_eq!(preview.peek, "file does not exist");
        assert_eq!(preview.blurb, "file purged from disk");

        let preview = SnpIndexMetadata::default().render_preview(true);
        assert_eq!(preview, Preview::purged());
    }

    #[test]
    fn test_default_genome_preview_is_not_blank() {
        let preview = IndexMetadata::default().render_preview(false);
        assert!(preview.peek.starts_with("GMAPDB index unknown"));
    }

    #[test]
    fn test_snp_index_preview() {
        let meta = SnpIndexMetadata {
            db_name: "hg19".to_string(),
            snps_name: "dbsnp135".to_string(),
        };
        let preview = meta.render_preview(false);
        assert_eq!(preview.peek, "GMAP SNPindex dbsnp135 on hg19");
        assert_eq!(preview.blurb, preview.peek);
    }

    #[test]
    fn test_annotation_preview() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b">a chr1:1..2\nx\n>b chr1:3..4\n").unwrap();
        file.flush().unwrap();

        let stats = AnnotationStats {
            data_lines: 3,
            annotations: 1_234,
        };
        let preview =
            annotation_preview(file.path(), &stats, false, &DatatypeConfig::default()).unwrap();
        assert_eq!(preview.peek, ">a chr1:1..2\nx\n>b chr1:3..4");
        assert_eq!(preview.blurb, "1,234 annotations");

        let preview = annotation_preview(
            file.path(),
            &AnnotationStats::default(),
            false,
            &DatatypeConfig::default(),
        )
        .unwrap();
        assert_eq!(preview.blurb, "28 bytes");
    }

    #[test]
    fn test_purged_annotation_preview_skips_file() {
        let dir = tempfile::tempdir().unwrap();
        let preview = annotation_preview(
            &dir.path().join("gone"),
            &AnnotationStats::default(),
            true,
            &DatatypeConfig::default(),
        )
        .unwrap();
        assert_eq!(preview, Preview::purged());
    }

    #[test]
    fn test_preview_dataset_dispatch() {
        let config = DatatypeConfig::default();
        let dir = tempfile::tempdir().unwrap();

        let iit = dir.path().join("refGene.iit");
        std::fs::write(&iit, [0u8; 2048]).unwrap();
        let preview = preview_dataset(Datatype::IntervalIndexTree, &iit, false, &config).unwrap();
        assert_eq!(preview.peek, "binary data");
        assert_eq!(preview.blurb, "2.0 KB");

        let snps = dir.path().join("snps.txt");
        std::fs::write(&snps, ">rs1 21:100 CG\n>rs2 21:200 AT\n").unwrap();
        let kind = Datatype::from_extension("gmap_snps").unwrap();
        let preview = preview_dataset(kind, &snps, false, &config).unwrap();
        assert_eq!(preview.blurb, "2 annotations");

        let preview = preview_dataset(Datatype::GmapDb, dir.path(), false, &config).unwrap();
        assert_eq!(preview.blurb, "GMAPDB unknown");

        let preview =
            preview_dataset(Datatype::GmapSnpIndex, &dir.path().join("gone"), true, &config)
                .unwrap();
        assert_eq!(preview, Preview::purged());
    }

    #[test]
    fn test_preview_dataset_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = preview_dataset(
            Datatype::TallyIntervalIndexTree,
            &dir.path().join("gone.iit"),
            false,
            &DatatypeConfig::default(),
        );
        assert!(matches!(result, Err(PreviewError::Annotation(_))));
    }

    #[test]
    fn test_display_peek_fallback() {
        assert_eq!(display_peek(Datatype::GmapDb, None), "GMAP index file");
        assert_eq!(display_peek(Datatype::GmapSnpIndex, None), "GMAP SNP index");

        let stored = Preview {
            peek: "stored".to_string(),
            blurb: String::new(),
        };
        assert_eq!(display_peek(Datatype::GmapDb, Some(&stored)), "stored");
    }
}
