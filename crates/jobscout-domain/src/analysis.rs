//! Typed request/response of the classification and textual-analysis service

use crate::category::Category;
use crate::job::RawPosting;
use serde::{Deserialize, Serialize};

/// What the analyzer sees of a posting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRequest {
    /// Job title
    pub title: String,
    /// Employer name
    pub company: String,
    /// Description text
    pub description: String,
}

impl ClassificationRequest {
    /// Build a request from a raw posting
    pub fn from_posting(posting: &RawPosting) -> Self {
        Self {
            title: posting.title.clone(),
            company: posting.company.clone(),
            description: posting.description.clone(),
        }
    }
}

/// Entry-level indicators found in a posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLevelSignals {
    /// Title carries an entry-level keyword (new grad, junior, ...)
    pub title_keyword: bool,

    /// Largest years-of-experience requirement mentioned, if any
    pub max_years_experience: Option<u32>,

    /// Description uses early-career phrasing
    pub early_career_phrasing: bool,

    /// Description targets degree holders or students
    pub degree_targeted: bool,

    /// Title carries a seniority term (senior, staff, lead, ...)
    pub senior_title: bool,

    /// Verdict of an external classifier, when one was consulted
    #[serde(default)]
    pub assessed: Option<bool>,
}

impl EntryLevelSignals {
    /// Whether the posting targets early-career candidates
    ///
    /// A seniority term in the title always disqualifies. An external
    /// verdict decides next. Otherwise an entry-level title keyword or an
    /// experience requirement within `max_years` qualifies; a posting that
    /// states no requirement at all counts as within the limit.
    pub fn is_entry_level(&self, max_years: u32) -> bool {
        if self.senior_title {
            return false;
        }
        if let Some(verdict) = self.assessed {
            return verdict;
        }
        let experience_ok = self.max_years_experience.is_none_or(|years| years <= max_years);
        self.title_keyword || experience_ok
    }

    /// Human-readable justification
    ///
    /// The phrases are the ones the scorer's clarity rules look for, so the
    /// persisted reasoning alone is enough to recompute clarity.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.title_keyword {
            parts.push("Title indicates entry-level".to_string());
        }
        if let Some(years) = self.max_years_experience {
            parts.push(format!("Requires {} years experience", years));
        }
        if self.early_career_phrasing {
            parts.push("Early-career phrasing".to_string());
        }
        if self.degree_targeted {
            parts.push("Degree-targeted hiring".to_string());
        }
        if self.senior_title {
            parts.push("Contains senior-level terminology".to_string());
        }

        if parts.is_empty() {
            "Entry-level validation".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Classifier answer for one posting
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Role category; `Other` when unrecognized
    pub category: Category,

    /// Entry-level indicators
    pub entry_level: EntryLevelSignals,

    /// Justification to persist as `entry_level_reasoning`
    pub reasoning: String,
}

impl Classification {
    /// Classification used when the classifier could not answer
    pub fn unavailable() -> Self {
        Self {
            category: Category::Other,
            entry_level: EntryLevelSignals::default(),
            reasoning: "Classification failed".to_string(),
        }
    }
}
