use std::path::Path;
use tracing::{debug, info, info_span, warn};

use crate::core::config::{BasesizePolicy, DatatypeConfig};
use crate::core::metadata::IndexMetadata;
use crate::gmapdb::{list_dir, Entry, ExtractError};
use crate::parsing::chromosome::parse_chromosome_file;
use crate::parsing::index_names::{
    match_chromosome_file, match_offsets_file, OffsetsFamily, OffsetsFile,
};

/// Suffix of interval index tree map files
pub const MAP_SUFFIX: &str = ".iit";

/// Maps whose name contains this are SNP maps
pub const SNP_MAP_MARKER: &str = "snp";

/// Build [`IndexMetadata`] from a genome database tree rooted at `root`.
///
/// Expected layout:
///
/// ```text
/// <root>/<db>/<db>.chromosome
/// <root>/<db>/<db>.ref<BB><KK>3offsetscomp
/// <root>/<db>/<db>.met[ac][tg]<BB><KK>3offsetscomp
/// <root>/<db>/<db>.a2i[ac][tg]<BB><KK>3offsetscomp
/// <root>/<db>/<db>.maps/<name>.iit
/// ```
///
/// Files directly under `root`, unrecognized names, and unreadable files are skipped.
///
/// # Errors
///
/// Returns `ExtractError::GrammarContract` if a filename grammar is broken, or
/// `ExtractError::BasesizeConflict` when [`BasesizePolicy::RequireAgreement`] is
/// configured and two reference index files name different base sizes.
pub fn extract_genome_metadata(
    root: &Path,
    config: &DatatypeConfig,
) -> Result<IndexMetadata, ExtractError> {
    let _span = info_span!("gmapdb", root = %root.display()).entered();

    let mut builder = Builder {
        meta: IndexMetadata::new(),
        basesize_seen: None,
        tag_snps: Vec::new(),
        policy: config.basesize_policy,
    };

    for entry in list_dir(root) {
        if !entry.is_dir {
            debug!(file = %entry.name, "Ignoring file at database root");
            continue;
        }
        for child in list_dir(&entry.path) {
            if child.is_dir {
                builder.add_maps_dir(&child);
            } else {
                builder.add_file(&child)?;
            }
        }
    }

    let meta = builder.finish();
    info!(
        db_name = %meta.db_name,
        chromosomes = meta.chromosomes.len(),
        kmers = ?meta.kmers,
        maps = meta.maps.len(),
        cmet = meta.cmet,
        atoi = meta.atoi,
        "Extracted genome database metadata"
    );
    Ok(meta)
}

struct Builder {
    meta: IndexMetadata,
    basesize_seen: Option<u32>,
    tag_snps: Vec<String>,
    policy: BasesizePolicy,
}

impl Builder {
    fn add_file(&mut self, entry: &Entry) -> Result<(), ExtractError> {
        if let Some(db_name) = match_chromosome_file(&entry.name)? {
            self.add_chromosome_file(db_name, entry);
            return Ok(());
        }

        if let Some(file) = match_offsets_file(&entry.name)? {
            debug!(file = %entry.name, family = ?file.family, "Offsets index file");
            self.add_offsets_file(file)?;
        }

        Ok(())
    }

    fn add_chromosome_file(&mut self, db_name: String, entry: &Entry) {
        self.meta.db_name = db_name;

        let list = match parse_chromosome_file(&entry.path) {
            Ok(list) => list,
            Err(e) => {
                warn!(file = %entry.name, error = %e, "Skipping chromosome file");
                return;
            }
        };

        for bad in &list.malformed {
            warn!(
                file = %entry.name,
                line = bad.line_number,
                reason = %bad.reason,
                "Skipping malformed chromosome line"
            );
        }
        if let Some(message) = &list.truncated {
            warn!(file = %entry.name, "{message}");
        }

        self.meta.chromosomes.clear();
        self.meta.chrom_lengths.clear();
        self.meta.circular.clear();
        for chrom in list.entries {
            if chrom.circular {
                self.meta.add_circular(&chrom.name);
            }
            self.meta.chrom_lengths.push(chrom.length);
            self.meta.chromosomes.push(chrom.name);
        }
    }

    fn add_offsets_file(&mut self, file: OffsetsFile) -> Result<(), ExtractError> {
        match file.family {
            OffsetsFamily::Reference {
                snp_tag: Some(tag), ..
            } => {
                self.tag_snps.push(tag);
            }
            OffsetsFamily::Reference {
                basesize, kmer, ..
            } => {
                if let Some(kmer) = kmer {
                    self.meta.kmers.insert(kmer);
                }
                if let Some(basesize) = basesize {
                    self.set_basesize(basesize)?;
                }
            }
            OffsetsFamily::Methylation => self.meta.cmet = true,
            OffsetsFamily::AToI => self.meta.atoi = true,
        }
        Ok(())
    }

    fn set_basesize(&mut self, basesize: u32) -> Result<(), ExtractError> {
        if let Some(first) = self.basesize_seen {
            if first != basesize {
                match self.policy {
                    BasesizePolicy::LastWins => {
                        warn!(first, second = basesize, "Reference index base sizes disagree");
                    }
                    BasesizePolicy::RequireAgreement => {
                        return Err(ExtractError::BasesizeConflict {
                            first,
                            second: basesize,
                        });
                    }
                }
            }
        }
        self.basesize_seen = Some(basesize);
        self.meta.basesize = basesize;
        Ok(())
    }

    fn add_maps_dir(&mut self, dir: &Entry) {
        self.meta.map_dir.clone_from(&dir.name);

        for map in list_dir(&dir.path) {
            if map.is_dir {
                continue;
            }
            let Some(name) = map.name.strip_suffix(MAP_SUFFIX) else {
                debug!(file = %map.name, "Ignoring non-map file in maps directory");
                continue;
            };
            if name.trim().is_empty() {
                continue;
            }
            if name.contains(SNP_MAP_MARKER) {
                self.meta.add_snp(name);
            }
            self.meta.maps.push(name.to_string());
        }
    }

    fn finish(mut self) -> IndexMetadata {
        for tag in std::mem::take(&mut self.tag_snps) {
            self.meta.add_snp(&tag);
        }
        self.meta
    }
}
