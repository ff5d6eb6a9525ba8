//! Paper identifier and paper record models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifying terms for one paper, as loaded from the input paper list.
///
/// Each field is optional but at least one is expected to be present; the
/// non-null identifiers double as exact-phrase search queries against the
/// mention source and as the overlap-exclusion vocabulary in scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperIdentifiers {
    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Digital Object Identifier.
    #[serde(default)]
    pub doi: Option<String>,

    /// PubMed ID.
    #[serde(default)]
    pub pubmed_id: Option<String>,

    /// PubMed Central ID.
    #[serde(default)]
    pub pmcid: Option<String>,
}

impl PaperIdentifiers {
    /// Iterate over the non-null identifiers in a fixed order
    /// (title, doi, pubmed_id, pmcid).
    pub fn present(&self) -> impl Iterator<Item = &str> {
        [&self.title, &self.doi, &self.pubmed_id, &self.pmcid]
            .into_iter()
            .filter_map(|id| id.as_deref())
    }

    /// True when all four identifiers are null.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Short label for log lines: the first identifier present.
    #[must_use]
    pub fn label(&self) -> &str {
        self.present().next().unwrap_or("<no identifiers>")
    }
}

/// A persisted paper record. Mentions reference it by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Store-assigned record id.
    pub id: Uuid,

    /// Paper title.
    pub title: Option<String>,

    /// Digital Object Identifier.
    pub doi: Option<String>,

    /// PubMed ID.
    pub pubmed_id: Option<String>,

    /// PubMed Central ID.
    pub pmcid: Option<String>,

    /// Rank accumulator amongst papers.
    pub weight: i64,
}

impl PaperRecord {
    /// Create a fresh record from identifiers, weight zero.
    #[must_use]
    pub fn new(ids: &PaperIdentifiers) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: ids.title.clone(),
            doi: ids.doi.clone(),
            pubmed_id: ids.pubmed_id.clone(),
            pmcid: ids.pmcid.clone(),
            weight: 0,
        }
    }
}

/// A paper in the aggregated "top" view.
///
/// Created on the first qualifying mention for a doi; `weight` is bumped by
/// one for every further qualifying mention inside the lookback window.
/// Never deleted by this pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPaperRecord {
    /// Store-assigned record id.
    pub id: Uuid,

    /// Paper title.
    pub title: Option<String>,

    /// Digital Object Identifier.
    pub doi: Option<String>,

    /// PubMed ID.
    pub pubmed_id: Option<String>,

    /// PubMed Central ID.
    pub pmcid: Option<String>,

    /// Incremented per qualifying mention.
    pub weight: i64,
}

impl TopPaperRecord {
    /// Seed a top-paper entry from a paper record, weight one.
    #[must_use]
    pub fn from_paper(paper: &PaperRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: paper.title.clone(),
            doi: paper.doi.clone(),
            pubmed_id: paper.pubmed_id.clone(),
            pmcid: paper.pmcid.clone(),
            weight: 1,
        }
    }
}
