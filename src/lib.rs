//! # gmap-datatypes
//!
//! Datatype support for GMAP/GSNAP files inside a data-management host.
//!
//! A host calls into this crate at fixed lifecycle points (upload, set-metadata,
//! peek, sniff). Each call is stateless: it reads files, returns derived facts,
//! and leaves persistence to the host.
//!
//! ## Features
//!
//! - **Genome databases**: chromosome names, lengths and circularity, k-mer sizes,
//!   base size, methylation and A-to-I indexes, maps and SNP indexes from a
//!   `gmap_build` directory tree
//! - **SNP indexes**: database and SNP index names from `snpindex` output
//! - **Annotation sniffing**: interval, splice-site, intron, SNP and tally grammars
//! - **Annotation statistics**: streaming line and annotation counts, gzip aware
//! - **Previews**: peek, blurb and primary-file summaries
//!
//! ## Example
//!
//! ```rust,no_run
//! use gmap_datatypes::core::config::DatatypeConfig;
//! use gmap_datatypes::gmapdb::genome::extract_genome_metadata;
//! use gmap_datatypes::render::preview::RenderPreview;
//! use gmap_datatypes::render::summary::render_summary_document;
//! use std::path::Path;
//!
//! let config = DatatypeConfig::default();
//! let meta = extract_genome_metadata(Path::new("dataset_42_files"), &config).unwrap();
//!
//! println!("{}", meta.render_preview(false).peek);
//! print!("{}", render_summary_document(&meta));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Datatypes, metadata records and configuration
//! - [`parsing`]: Filename grammars, chromosome files and annotation grammars
//! - [`gmapdb`]: Directory-layout metadata extraction
//! - [`render`]: Previews and summary documents
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod gmapdb;
pub mod parsing;
pub mod render;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::config::DatatypeConfig;
pub use core::metadata::{AnnotationStats, IndexMetadata, SnpIndexMetadata};
pub use core::types::{AnnotationKind, Datatype};
pub use gmapdb::genome::extract_genome_metadata;
pub use gmapdb::snp_index::extract_snp_metadata;
pub use parsing::annotation::{compute_annotation_stats, sniff};
