//! Dedup hash - normalized identity of a posting

use sha2::{Digest, Sha256};
use std::fmt;

/// Normalize a company name or title for identity comparison
///
/// Lowercases, strips punctuation, collapses runs of whitespace and trims.
/// Two listings that differ only in formatting normalize to the same string.
///
/// # Examples
///
/// ```
/// use jobscout_domain::normalize;
///
/// assert_eq!(normalize("  Acme,  Inc. "), "acme inc");
/// assert_eq!(normalize("Data Scientist - New Grad"), "data scientist new grad");
/// ```
pub fn normalize(input: &str) -> String {
    let stripped: String = input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uniqueness key of a job record
///
/// Hex SHA-256 of `normalize(company) + "|" + normalize(title)`. Distinct
/// postings that collide are treated as duplicates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobHash(String);

impl JobHash {
    /// Compute the hash for a company and title
    ///
    /// # Examples
    ///
    /// ```
    /// use jobscout_domain::JobHash;
    ///
    /// let a = JobHash::compute("Acme Inc.", "Data Scientist");
    /// let b = JobHash::compute("acme inc", "Data Scientist   ");
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 64);
    /// ```
    pub fn compute(company: &str, title: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(normalize(company).as_bytes());
        hasher.update(b"|");
        hasher.update(normalize(title).as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Wrap an already computed hash
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Get the hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("Data \t Scientist\n"), "data scientist");
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("J.P. Morgan & Co."), "jp morgan co");
    }

    #[test]
    fn test_hash_matches_across_sources() {
        let indeed = JobHash::compute("Acme Inc.", "Data Scientist - New Grad");
        let glassdoor = JobHash::compute("acme inc.", "Data Scientist - New Grad ");
        assert_eq!(indeed, glassdoor);
    }

    #[test]
    fn test_company_and_title_are_not_interchangeable() {
        let a = JobHash::compute("data", "scientist");
        let b = JobHash::compute("data scientist", "");
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_titles_differ() {
        let a = JobHash::compute("Acme", "Data Scientist");
        let b = JobHash::compute("Acme", "Data Engineer");
        assert_ne!(a, b);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn reformat(s: &str, upper: bool, pad: usize) -> String {
        let spaced = s.split(' ').collect::<Vec<_>>().join(&" ".repeat(pad + 1));
        let cased = if upper { spaced.to_uppercase() } else { spaced };
        format!("{}{}{}", " ".repeat(pad), cased, " ".repeat(pad))
    }

    proptest! {
        /// Property: hash is invariant to case and whitespace variation
        #[test]
        fn test_hash_stable_under_formatting(
            company in "[a-z]{1,8}( [a-z]{1,8}){0,2}",
            title in "[a-z]{1,8}( [a-z]{1,8}){0,3}",
            upper: bool,
            pad in 0usize..3,
        ) {
            let original = JobHash::compute(&company, &title);
            let reformatted = JobHash::compute(
                &reformat(&company, upper, pad),
                &reformat(&title, !upper, pad),
            );
            prop_assert_eq!(original, reformatted);
        }

        /// Property: normalization is idempotent
        #[test]
        fn test_normalize_idempotent(s in "[a-zA-Z0-9 .,&()\t-]{0,40}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
        }
    }
}
