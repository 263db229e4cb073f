//! Filename grammars for the files `gmap_build` and `snpindex` write.
//!
//! ```text
//! <db>.chromosome                                  chromosome list
//! <db>.ref<BB><KK>3offsetscomp[.<snp_tag>]         reference offsets
//! <db>.met[ac][tg]<BB><KK>3offsetscomp             methylation offsets
//! <db>.a2i[ac][tg]<BB><KK>3offsetscomp             A-to-I offsets
//! <db>.ref<BB><KK>3positions.<snp_tag>             SNP index positions
//! ```
//!
//! Each grammar declares how many capture groups its consumers index into.
//! A pattern whose group count drifts from that number is a programming error
//! and surfaces as [`GrammarContractError`] instead of silently misreading groups.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;

/// Canonical suffix of an offsets-compression index file
pub const OFFSETS_SUFFIX: &str = "offsetscomp";

/// A capture group count that differs from what the consuming code indexes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Filename grammar '{grammar}' has {found} capture groups, expected {expected}")]
pub struct GrammarContractError {
    pub grammar: &'static str,
    pub expected: usize,
    pub found: usize,
}

/// A compiled filename pattern bound to its expected capture group count
pub struct FilenameGrammar {
    name: &'static str,
    regex: Regex,
    groups: usize,
}

impl FilenameGrammar {
    fn new(name: &'static str, pattern: &str, groups: usize) -> Self {
        Self {
            name,
            // Patterns are compile-time constants covered by the tests below
            regex: Regex::new(pattern).expect("invalid built-in filename grammar"),
            groups,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Match a filename, checking the group contract first
    ///
    /// # Errors
    ///
    /// Returns `GrammarContractError` if the compiled pattern does not have
    /// exactly the declared number of capture groups.
    pub fn captures<'h>(
        &self,
        filename: &'h str,
    ) -> Result<Option<Captures<'h>>, GrammarContractError> {
        // captures_len counts the implicit whole-match group
        let found = self.regex.captures_len() - 1;
        if found != self.groups {
            return Err(GrammarContractError {
                grammar: self.name,
                expected: self.groups,
                found,
            });
        }
        Ok(self.regex.captures(filename))
    }
}

static CHROMOSOME_FILE: LazyLock<FilenameGrammar> =
    LazyLock::new(|| FilenameGrammar::new("chromosome", r"^(.+)\.chromosome$", 1));

static OFFSETS_FILE: LazyLock<FilenameGrammar> = LazyLock::new(|| {
    FilenameGrammar::new(
        "offsets",
        r"^(.*)\.((ref)|(met)[atgc][atgc]|(a2i)[atgc][atgc])((\d\d)(\d\d))?(\d)(offsetscomp(?:\..+)?)$",
        10,
    )
});

static SNP_POSITIONS_FILE: LazyLock<FilenameGrammar> = LazyLock::new(|| {
    FilenameGrammar::new(
        "snp_positions",
        r"^(.*)\.(ref((\d\d)(\d\d))?\d*3positions)\.(.+)?$",
        6,
    )
});

/// Index family named by an offsets filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffsetsFamily {
    /// Plain reference index; `snp_tag` is set for SNP-tolerant variants
    Reference {
        basesize: Option<u32>,
        kmer: Option<u32>,
        snp_tag: Option<String>,
    },
    /// Methylation (`cmetindex`) index
    Methylation,
    /// A-to-I RNA editing (`atoiindex`) index
    AToI,
}

/// A classified offsets-compression filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetsFile {
    pub db_name: String,
    pub family: OffsetsFamily,
}

/// Match `<db>.chromosome`, returning the database name
///
/// # Errors
///
/// Returns `GrammarContractError` if the grammar's group contract is broken.
pub fn match_chromosome_file(filename: &str) -> Result<Option<String>, GrammarContractError> {
    Ok(CHROMOSOME_FILE
        .captures(filename)?
        .map(|caps| caps[1].to_string()))
}

/// Match an offsets-compression index filename
///
/// # Errors
///
/// Returns `GrammarContractError` if the grammar's group contract is broken.
pub fn match_offsets_file(filename: &str) -> Result<Option<OffsetsFile>, GrammarContractError> {
    let Some(caps) = OFFSETS_FILE.captures(filename)? else {
        return Ok(None);
    };

    let family = if caps.get(3).is_some() {
        let suffix = &caps[10];
        let snp_tag = suffix
            .strip_prefix(OFFSETS_SUFFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            .map(str::to_string);
        OffsetsFamily::Reference {
            basesize: parse_group(&caps, 7),
            kmer: parse_group(&caps, 8),
            snp_tag,
        }
    } else if caps.get(4).is_some() {
        OffsetsFamily::Methylation
    } else {
        OffsetsFamily::AToI
    };

    Ok(Some(OffsetsFile {
        db_name: caps[1].to_string(),
        family,
    }))
}

/// Match `<db>.ref<BB><KK>3positions.<tag>`, returning `(db_name, snp_tag)`
///
/// # Errors
///
/// Returns `GrammarContractError` if the grammar's group contract is broken.
pub fn match_snp_positions_file(
    filename: &str,
) -> Result<Option<(String, Option<String>)>, GrammarContractError> {
    Ok(SNP_POSITIONS_FILE.captures(filename)?.map(|caps| {
        (
            caps[1].to_string(),
            caps.get(6).map(|m| m.as_str().to_string()),
        )
    }))
}

fn parse_group(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}
