use serde::{Deserialize, Serialize};

/// Every datatype registered by the GMAP/GSNAP plugin family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datatype {
    /// Composite genome database produced by `gmap_build`
    GmapDb,
    /// Composite SNP index produced by `snpindex`
    GmapSnpIndex,
    /// Interval index tree map produced by `iit_store`
    IntervalIndexTree,
    SpliceSitesIntervalIndexTree,
    IntronsIntervalIndexTree,
    SnpsIntervalIndexTree,
    TallyIntervalIndexTree,
    /// Line-oriented annotation, one of the [`AnnotationKind`] grammars
    Annotation(AnnotationKind),
    /// Default GSNAP alignment output
    GsnapResult,
}

impl Datatype {
    /// All registered datatypes, in registration order
    pub const ALL: [Datatype; 13] = [
        Datatype::GmapDb,
        Datatype::GmapSnpIndex,
        Datatype::IntervalIndexTree,
        Datatype::SpliceSitesIntervalIndexTree,
        Datatype::IntronsIntervalIndexTree,
        Datatype::SnpsIntervalIndexTree,
        Datatype::TallyIntervalIndexTree,
        Datatype::Annotation(AnnotationKind::Interval),
        Datatype::Annotation(AnnotationKind::SpliceSite),
        Datatype::Annotation(AnnotationKind::Intron),
        Datatype::Annotation(AnnotationKind::Snp),
        Datatype::Annotation(AnnotationKind::Tally),
        Datatype::GsnapResult,
    ];

    /// File extension the host registers this datatype under
    #[must_use]
    pub fn file_ext(self) -> &'static str {
        match self {
            Datatype::GmapDb => "gmapdb",
            Datatype::GmapSnpIndex => "gmapsnpindex",
            Datatype::IntervalIndexTree => "iit",
            Datatype::SpliceSitesIntervalIndexTree => "splicesites.iit",
            Datatype::IntronsIntervalIndexTree => "introns.iit",
            Datatype::SnpsIntervalIndexTree => "snps.iit",
            Datatype::TallyIntervalIndexTree => "tally.iit",
            Datatype::Annotation(kind) => kind.file_ext(),
            Datatype::GsnapResult => "gsnap",
        }
    }

    /// Look up a datatype by its registered extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.file_ext() == ext)
    }

    /// Binary datatypes are never previewed as text
    #[must_use]
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Datatype::GmapDb
                | Datatype::GmapSnpIndex
                | Datatype::IntervalIndexTree
                | Datatype::SpliceSitesIntervalIndexTree
                | Datatype::IntronsIntervalIndexTree
                | Datatype::SnpsIntervalIndexTree
                | Datatype::TallyIntervalIndexTree
        )
    }

    /// Composite datatypes own an extra-files directory and an auto-generated primary file
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(self, Datatype::GmapDb | Datatype::GmapSnpIndex)
    }

    /// Text shown when the host has no stored peek for a dataset
    #[must_use]
    pub fn fallback_peek(self) -> &'static str {
        match self {
            Datatype::GmapDb => "GMAP index file",
            Datatype::GmapSnpIndex => "GMAP SNP index",
            _ => "",
        }
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_ext())
    }
}

/// The closed set of GMAP annotation line grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// `>label chr:start[..end] [tag]` headers followed by free annotation lines
    Interval,
    /// `>label.intronN chr:start..end donor|acceptor [distance]`
    SpliceSite,
    /// `>label.intronN chr:start..end [extra]`
    Intron,
    /// `>label chr:position XY`
    Snp,
    /// `gsnap_tally` output: `>total chr:start..end` plus base-count detail lines
    Tally,
}

/// Which lines of a file a grammar constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineScope {
    /// Only lines starting with `>` are checked and counted
    HeadersOnly,
    /// Every non-blank line is checked and counted
    EveryLine,
}

impl AnnotationKind {
    #[must_use]
    pub fn file_ext(self) -> &'static str {
        match self {
            AnnotationKind::Interval => "gmap_annotation",
            AnnotationKind::SpliceSite => "gmap_splicesites",
            AnnotationKind::Intron => "gmap_introns",
            AnnotationKind::Snp => "gmap_snps",
            AnnotationKind::Tally => "gsnap_tally",
        }
    }

    #[must_use]
    pub fn line_scope(self) -> LineScope {
        match self {
            AnnotationKind::Interval => LineScope::HeadersOnly,
            _ => LineScope::EveryLine,
        }
    }
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Interval => "interval",
            Self::SpliceSite => "splice-site",
            Self::Intron => "intron",
            Self::Snp => "SNP",
            Self::Tally => "tally",
        };
        write!(f, "{name}")
    }
}
