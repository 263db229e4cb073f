//! Human-readable text the host shows for a dataset.
//!
//! - [`preview`]: peek and blurb strings, including the fixed purged-dataset text
//! - [`summary`]: primary-file documents for the composite datatypes

use std::fmt::Display;

pub mod preview;
pub mod summary;

/// Join displayable items with `", "`
pub(crate) fn join_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
