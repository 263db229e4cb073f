use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use crate::core::metadata::{IndexMetadata, SnpIndexMetadata};
use crate::render::join_list;

/// Primary file written at upload, before any metadata exists
pub const PLACEHOLDER_PRIMARY_FILE: &str =
    "<html><head></head><body>AutoGenerated Primary File for Composite Dataset</body></html>";

/// Plain-text summary of a genome database, one fact per line
#[must_use]
pub fn render_summary_document(meta: &IndexMetadata) -> String {
    let mut lines = vec![format!("GMAPDB: {}", meta.db_name)];

    if !meta.chromosomes.is_empty() {
        lines.push(format!("chromosomes: {}", join_list(&meta.chromosomes)));
    }
    if meta.has_chrom_lengths() {
        lines.push("chrom\tlength".to_string());
        lines.extend(
            meta.chromosome_lengths()
                .map(|(name, length)| format!("{name}\t{length}")),
        );
    }
    if !meta.circular.is_empty() {
        lines.push(format!("circular: {}", join_list(&meta.circular)));
    }
    if !meta.kmers.is_empty() {
        lines.push(format!("kmers: {}", join_list(&meta.kmers)));
    }
    lines.push(format!("cmetindex: {} atoiindex: {}", meta.cmet, meta.atoi));

    let maps: Vec<&String> = meta.maps.iter().filter(|m| !m.trim().is_empty()).collect();
    if !maps.is_empty() {
        lines.push("Maps:".to_string());
        lines.extend(maps.iter().map(|name| format!(" {name}")));
    }

    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

/// Replace a genome database's primary file with its summary
///
/// # Errors
///
/// Returns the I/O error if the file cannot be written.
pub fn write_summary_document(meta: &IndexMetadata, path: &Path) -> io::Result<()> {
    info!(db_name = %meta.db_name, path = %path.display(), "Writing genome database summary");
    fs::write(path, render_summary_document(meta))
}

/// HTML summary of a SNP index
#[must_use]
pub fn render_snp_index_document(meta: &SnpIndexMetadata) -> String {
    format!(
        "<html><head><title>GMAP SNPindex {snps} on {db}</title></head>\n\
         <p/><H3>GMAP SNPindex {snps}</H3>\n\
         <p/>GMAPDB {db}\n\
         </html>\n",
        snps = meta.snps_name,
        db = meta.db_name,
    )
}

/// Replace a SNP index's primary file with its summary
///
/// # Errors
///
/// Returns the I/O error if the file cannot be written.
pub fn write_snp_index_document(meta: &SnpIndexMetadata, path: &Path) -> io::Result<()> {
    info!(snps_name = %meta.snps_name, path = %path.display(), "Writing SNP index summary");
    fs::write(path, render_snp_index_document(meta))
}
