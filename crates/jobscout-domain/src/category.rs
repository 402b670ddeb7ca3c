//! Category module - role categories a posting can be classified into

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role category of a posting
///
/// The four named categories are the ones the digest reports on, in their
/// fixed presentation priority. `Other` is a terminal bucket: postings that
/// land there are discarded before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Data Scientist, ML engineer and similar
    #[serde(rename = "Data Scientist")]
    DataScientist,

    /// Data / business / product analyst
    #[serde(rename = "Data Analyst")]
    DataAnalyst,

    /// Quant analyst, researcher, trader, financial engineer
    #[serde(rename = "Quantitative Finance")]
    QuantitativeFinance,

    /// Data engineer, ETL, pipelines
    #[serde(rename = "Data Engineer")]
    DataEngineer,

    /// Anything else, including unrecognized classifier output
    Other,
}

impl Category {
    /// Digest presentation order
    pub const PRIORITY_ORDER: [Category; 4] = [
        Category::DataScientist,
        Category::DataAnalyst,
        Category::QuantitativeFinance,
        Category::DataEngineer,
    ];

    /// Get the category name as displayed and persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DataScientist => "Data Scientist",
            Category::DataAnalyst => "Data Analyst",
            Category::QuantitativeFinance => "Quantitative Finance",
            Category::DataEngineer => "Data Engineer",
            Category::Other => "Other",
        }
    }

    /// Parse a category name
    ///
    /// Matching ignores case and surrounding whitespace. Anything that is not
    /// one of the known names maps to `Other`, so an LLM answering with a
    /// category we do not track can never leak into scoring.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "data scientist" => Category::DataScientist,
            "data analyst" => Category::DataAnalyst,
            "quantitative finance" => Category::QuantitativeFinance,
            "data engineer" => Category::DataEngineer,
            _ => Category::Other,
        }
    }

    /// Whether postings in this category are eligible for scoring
    pub fn is_tracked(&self) -> bool {
        *self != Category::Other
    }

    /// Position in the presentation order (`Other` sorts last)
    pub fn rank(&self) -> usize {
        Self::PRIORITY_ORDER
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::PRIORITY_ORDER.len())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
