use std::path::Path;
use tracing::{debug, info};

use crate::core::metadata::SnpIndexMetadata;
use crate::gmapdb::{list_dir, ExtractError};
use crate::parsing::index_names::match_snp_positions_file;

/// Build [`SnpIndexMetadata`] from a flat `snpindex` output directory.
///
/// The database and SNP index names come from a
/// `<db>.ref<BB><KK>3positions.<snp_tag>` file; subdirectories are not walked.
///
/// # Errors
///
/// Returns `ExtractError::GrammarContract` if the positions filename grammar is broken.
pub fn extract_snp_metadata(dir: &Path) -> Result<SnpIndexMetadata, ExtractError> {
    let mut meta = SnpIndexMetadata::default();

    for entry in list_dir(dir) {
        if entry.is_dir {
            continue;
        }
        let Some((db_name, snp_tag)) = match_snp_positions_file(&entry.name)? else {
            continue;
        };
        debug!(file = %entry.name, "SNP positions file");
        meta.db_name = db_name;
        if let Some(tag) = snp_tag {
            meta.snps_name = tag;
        }
    }

    info!(
        dir = %dir.display(),
        db_name = %meta.db_name,
        snps_name = %meta.snps_name,
        "Extracted SNP index metadata"
    );
    Ok(meta)
}
