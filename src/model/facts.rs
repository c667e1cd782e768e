//! Enrichment facts resolved by follow-up catalog lookups.

use std::fmt;

/// Placeholder shown for any value the catalog did not (or not yet) provide.
pub const UNKNOWN: &str = "Unknown";

/// Author details, keyed by author display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFact {
    /// Birth date as the catalog formats it, or "Unknown".
    pub birth_date: String,
    /// Best-known work, or "Unknown".
    pub top_work: String,
}

impl AuthorFact {
    /// Build a fact from optional catalog values, substituting "Unknown".
    ///
    /// Empty strings count as absent.
    pub fn new(birth_date: Option<&str>, top_work: Option<&str>) -> Self {
        fn or_unknown(value: Option<&str>) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string()
        }

        Self {
            birth_date: or_unknown(birth_date),
            top_work: or_unknown(top_work),
        }
    }
}

/// Average community rating for a work, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingFact {
    average_rating: f64,
}

impl RatingFact {
    /// Round the catalog average to one decimal.
    ///
    /// Returns `None` for a zero or non-finite average; the catalog reports `0`
    /// (or nothing) for unrated works.
    pub fn from_average(average: f64) -> Option<Self> {
        if !average.is_finite() || average == 0.0 {
            return None;
        }
        Some(Self {
            average_rating: (average * 10.0).round() / 10.0,
        })
    }
}

impl fmt::Display for RatingFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.average_rating)
    }
}

/// Primary subject of a work: the first comma-segment of its first subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFact(String);

impl SubjectFact {
    /// Extract the primary subject from the catalog's subject list.
    ///
    /// `["Science fiction, American", "Dune (Imaginary place)"]` yields
    /// `Science fiction`. Returns `None` when there is no usable first subject.
    pub fn from_subjects(subjects: &[String]) -> Option<Self> {
        let first = subjects.first()?;
        let segment = first.split(',').next().unwrap_or_default();
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    /// The subject text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
