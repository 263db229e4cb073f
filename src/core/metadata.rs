use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Value used for string fields that no file ever provided
pub const UNKNOWN: &str = "unknown";

/// Offsets-compression base size assumed when no reference index file names one
pub const DEFAULT_BASESIZE: u32 = 12;

/// SNP index name assumed when no positions file carries a tag
pub const DEFAULT_SNPS_NAME: &str = "snps";

/// Metadata describing one GMAP genome database directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Database name, taken from the `<db_name>.chromosome` file
    pub db_name: String,

    /// Chromosome names in chromosome-file order
    pub chromosomes: Vec<String>,

    /// Lengths, index-aligned with `chromosomes`
    pub chrom_lengths: Vec<u64>,

    /// Names of chromosomes marked `circular`, in file order, without duplicates
    pub circular: Vec<String>,

    /// Distinct k-mer sizes of the reference offsets files
    pub kmers: BTreeSet<u32>,

    pub basesize: u32,

    /// Name of the subdirectory holding `.iit` maps
    pub map_dir: String,

    pub maps: Vec<String>,

    /// Maps whose name contains `snp`, followed by SNP tags on reference index files
    pub snps: Vec<String>,

    /// Has a methylation (`met*`) index
    pub cmet: bool,

    /// Has an A-to-I (`a2i*`) index
    pub atoi: bool,
}

impl Default for IndexMetadata {
    fn default() -> Self {
        Self {
            db_name: UNKNOWN.to_string(),
            chromosomes: Vec::new(),
            chrom_lengths: Vec::new(),
            circular: Vec::new(),
            kmers: BTreeSet::new(),
            basesize: DEFAULT_BASESIZE,
            map_dir: UNKNOWN.to_string(),
            maps: Vec::new(),
            snps: Vec::new(),
            cmet: false,
            atoi: false,
        }
    }
}

impl IndexMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a length is known for every chromosome
    #[must_use]
    pub fn has_chrom_lengths(&self) -> bool {
        !self.chrom_lengths.is_empty() && self.chrom_lengths.len() == self.chromosomes.len()
    }

    /// Iterate `(name, length)` pairs; empty unless [`Self::has_chrom_lengths`]
    pub fn chromosome_lengths(&self) -> impl Iterator<Item = (&str, u64)> {
        let paired = if self.has_chrom_lengths() {
            self.chromosomes.len()
        } else {
            0
        };
        self.chromosomes
            .iter()
            .map(String::as_str)
            .zip(self.chrom_lengths.iter().copied())
            .take(paired)
    }

    pub(crate) fn add_circular(&mut self, name: &str) {
        if !self.circular.iter().any(|c| c == name) {
            self.circular.push(name.to_string());
        }
    }

    pub(crate) fn add_snp(&mut self, name: &str) {
        if !self.snps.iter().any(|s| s == name) {
            self.snps.push(name.to_string());
        }
    }
}

/// Metadata describing one GMAP SNP index directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnpIndexMetadata {
    pub db_name: String,
    pub snps_name: String,
}

impl Default for SnpIndexMetadata {
    fn default() -> Self {
        Self {
            db_name: UNKNOWN.to_string(),
            snps_name: DEFAULT_SNPS_NAME.to_string(),
        }
    }
}

/// Whole-file line statistics for an annotation file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationStats {
    /// Every line, blank or not
    pub data_lines: u64,

    /// Lines whose trimmed form starts with `>`
    pub annotations: u64,
}
