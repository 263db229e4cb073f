//! Metadata extraction for the composite GMAP datatypes.
//!
//! - [`genome`]: a `gmap_build` database tree (`<root>/<db>/<db>.*`, `<db>.maps/*.iit`)
//! - [`snp_index`]: a flat `snpindex` output directory
//!
//! Extraction never aborts on unreadable or unrecognized entries; those are logged
//! and skipped. Only [`ExtractError`] conditions stop it.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::parsing::index_names::GrammarContractError;

pub mod genome;
pub mod snp_index;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    GrammarContract(#[from] GrammarContractError),

    #[error("Reference index files disagree on base size: {first} vs {second}")]
    BasesizeConflict { first: u32, second: u32 },
}

/// One directory entry with a UTF-8 name
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// List a directory sorted by name; unreadable directories yield nothing
pub(crate) fn list_dir(dir: &Path) -> Vec<Entry> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Cannot list directory, skipping");
            return Vec::new();
        }
    };

    let mut entries: Vec<Entry> = read
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Cannot read directory entry, skipping");
                None
            }
        })
        .filter_map(|entry| {
            let path = entry.path();
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(
                        dir = %dir.display(),
                        name = %raw.to_string_lossy(),
                        "Directory entry name is not UTF-8, skipping"
                    );
                    return None;
                }
            };
            Some(Entry {
                is_dir: path.is_dir(),
                name,
                path,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
