//! Per-query filter criteria and URL exclusion matching

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, RecommendResult};

/// Lowest accepted threshold (percent scale)
pub const MIN_THRESHOLD: f64 = 0.0;

/// Highest accepted threshold (percent scale)
pub const MAX_THRESHOLD: f64 = 100.0;

/// What to do with a candidate whose embedding has zero magnitude
///
/// A degenerate reference embedding always fails the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Fail the whole query
    #[default]
    Reject,
    /// Drop the candidate and log a warning
    Skip,
}

/// Filter settings for one query
///
/// Built fresh by the caller for every query and never mutated during it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Minimum rounded score (0-100, inclusive)
    pub threshold: f64,
    /// URL pattern to exclude; `None` or empty excludes nothing
    pub exclude_pattern: Option<String>,
    /// Interpret `exclude_pattern` as a regular expression
    pub use_regex: bool,
    pub on_degenerate: DegeneratePolicy,
    /// Keep at most this many results after sorting
    pub limit: Option<usize>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::new(MIN_THRESHOLD)
    }
}

impl FilterCriteria {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            exclude_pattern: None,
            use_regex: false,
            on_degenerate: DegeneratePolicy::Reject,
            limit: None,
        }
    }

    /// Exclude URLs containing `pattern` literally
    pub fn exclude_literal(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = Some(pattern.into());
        self.use_regex = false;
        self
    }

    /// Exclude URLs matching the regular expression `pattern` anywhere
    pub fn exclude_regex(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = Some(pattern.into());
        self.use_regex = true;
        self
    }

    pub fn on_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.on_degenerate = policy;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check ranges without clamping
    ///
    /// # Errors
    /// [`RecommendError::Configuration`] for a NaN or out-of-range threshold,
    /// or a zero limit.
    pub fn validate(&self) -> RecommendResult<()> {
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&self.threshold) {
            return Err(RecommendError::config(format!(
                "threshold must be between {} and {}, got {}",
                MIN_THRESHOLD, MAX_THRESHOLD, self.threshold
            )));
        }

        if self.limit == Some(0) {
            return Err(RecommendError::config("limit must be at least 1"));
        }

        Ok(())
    }
}

/// Compiled form of the exclude pattern
#[derive(Debug, Clone)]
pub enum UrlExclusion {
    None,
    Literal(String),
    Regex(Regex),
}

impl UrlExclusion {
    /// Compile the exclusion described by `criteria`
    ///
    /// # Errors
    /// [`RecommendError::Pattern`] if regex mode is on and the pattern does
    /// not compile. Invalid patterns are never downgraded to literals.
    pub fn compile(criteria: &FilterCriteria) -> RecommendResult<Self> {
        let pattern = match criteria.exclude_pattern.as_deref() {
            None | Some("") => return Ok(Self::None),
            Some(pattern) => pattern,
        };

        if !criteria.use_regex {
            return Ok(Self::Literal(pattern.to_string()));
        }

        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|source| RecommendError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// True if `url` should be dropped
    pub fn excludes(&self, url: &str) -> bool {
        match self {
            Self::None => false,
            Self::Literal(needle) => url.contains(needle.as_str()),
            Self::Regex(re) => re.is_match(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URLS: [&str; 3] = ["/a/b", "/a/c", "/x/y"];

    fn kept(exclusion: &UrlExclusion) -> Vec<&'static str> {
        URLS.iter().copied().filter(|u| !exclusion.excludes(u)).collect()
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(FilterCriteria::new(0.0).validate().is_ok());
        assert!(FilterCriteria::new(100.0).validate().is_ok());
        assert!(FilterCriteria::new(80.5).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        for threshold in [-0.01, 100.01, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    FilterCriteria::new(threshold).validate(),
                    Err(RecommendError::Configuration(_))
                ),
                "threshold {} should be rejected",
                threshold
            );
        }
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        assert!(matches!(
            FilterCriteria::new(50.0).limit(0).validate(),
            Err(RecommendError::Configuration(_))
        ));
    }

    #[test]
    fn test_literal_exclusion() {
        let exclusion = UrlExclusion::compile(&FilterCriteria::new(0.0).exclude_literal("/a/")).unwrap();
        assert_eq!(kept(&exclusion), vec!["/x/y"]);
    }

    #[test]
    fn test_literal_exclusion_treats_metacharacters_literally() {
        let exclusion = UrlExclusion::compile(&FilterCriteria::new(0.0).exclude_literal("^/a/.*")).unwrap();
        assert_eq!(kept(&exclusion), URLS.to_vec());
    }

    #[test]
    fn test_regex_exclusion() {
        let exclusion = UrlExclusion::compile(&FilterCriteria::new(0.0).exclude_regex("^/a/.*")).unwrap();
        assert_eq!(kept(&exclusion), vec!["/x/y"]);
    }

    #[test]
    fn test_regex_exclusion_matches_anywhere() {
        let exclusion = UrlExclusion::compile(&FilterCriteria::new(0.0).exclude_regex("c$")).unwrap();
        assert_eq!(kept(&exclusion), vec!["/a/b", "/x/y"]);
    }

    #[test]
    fn test_empty_pattern_excludes_nothing() {
        for criteria in [
            FilterCriteria::new(0.0),
            FilterCriteria::new(0.0).exclude_literal(""),
            FilterCriteria::new(0.0).exclude_regex(""),
        ] {
            let exclusion = UrlExclusion::compile(&criteria).unwrap();
            assert!(matches!(exclusion, UrlExclusion::None));
            assert_eq!(kept(&exclusion), URLS.to_vec());
        }
    }

    #[test]
    fn test_invalid_regex_is_an_error() {
        let err = UrlExclusion::compile(&FilterCriteria::new(0.0).exclude_regex("/a/(")).unwrap_err();
        assert!(matches!(err, RecommendError::Pattern { ref pattern, .. } if pattern == "/a/("));
    }

    #[test]
    fn test_invalid_regex_is_fine_as_literal() {
        let exclusion = UrlExclusion::compile(&FilterCriteria::new(0.0).exclude_literal("/a/(")).unwrap();
        assert!(exclusion.excludes("/a/(draft)"));
        assert!(!exclusion.excludes("/a/b"));
    }

    #[test]
    fn test_degenerate_policy_serde() {
        let policy: DegeneratePolicy = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(policy, DegeneratePolicy::Skip);
        assert_eq!(serde_json::to_string(&DegeneratePolicy::Reject).unwrap(), "\"reject\"");
    }
}
