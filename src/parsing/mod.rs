//! Parsers for the files GMAP and GSNAP tools write.
//!
//! This module provides:
//!
//! - **Index filenames**: classify `gmap_build` and `snpindex` output by name
//! - **Chromosome files**: read `<db>.chromosome` name/length/circular tables
//! - **Annotation files**: line grammars, sniffing and statistics for
//!   interval, splice-site, intron, SNP and tally annotations
//!
//! ## Example
//!
//! ```rust,no_run
//! use gmap_datatypes::core::config::DatatypeConfig;
//! use gmap_datatypes::core::types::AnnotationKind;
//! use gmap_datatypes::parsing::annotation::{compute_annotation_stats, sniff};
//! use std::path::Path;
//!
//! let path = Path::new("refGene.splicesites");
//! let is_splice_sites = sniff(path, AnnotationKind::SpliceSite, &DatatypeConfig::default());
//! let stats = compute_annotation_stats(path).unwrap();
//! println!("{is_splice_sites} {} annotations", stats.annotations);
//! ```

pub mod annotation;
pub mod chromosome;
pub mod index_names;
