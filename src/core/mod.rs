//! Core data types shared by the extractors, sniffers and renderers.
//!
//! - [`Datatype`](types::Datatype): every datatype the plugin family registers
//! - [`AnnotationKind`](types::AnnotationKind): the closed set of annotation line grammars
//! - [`IndexMetadata`](metadata::IndexMetadata), [`SnpIndexMetadata`](metadata::SnpIndexMetadata),
//!   [`AnnotationStats`](metadata::AnnotationStats): typed metadata records
//! - [`DatatypeConfig`](config::DatatypeConfig): sniff, extraction and preview tunables
//!
//! ## Defaults
//!
//! Every metadata field has a documented "no value" default. A pattern that never
//! matches leaves its field at that default; absence is never an error.
//!
//! | Field | Default |
//! |-------|---------|
//! | `db_name`, `map_dir` | `unknown` |
//! | `basesize` | `12` |
//! | `snps_name` | `snps` |
//! | collections | empty |
//! | `cmet`, `atoi` | `false` |

pub mod config;
pub mod metadata;
pub mod types;
