//! Ordered collections of test cases.

use regex::Regex;
use restprobe_domain::{DomainError, DomainResult};

use crate::case::TestCase;
use crate::error::{ApplicationError, ApplicationResult};

/// A named, ordered list of cases. Registration order is execution order.
#[derive(Debug, Clone, Default)]
pub struct Suite {
    name: String,
    cases: Vec<TestCase>,
}

impl Suite {
    /// Creates an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Registers a case (builder pattern).
    #[must_use]
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cases in execution order.
    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the suite has no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Keeps only the cases whose name matches `pattern`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidFilter`] for a malformed pattern and
    /// [`ApplicationError::EmptySelection`] when nothing matches.
    pub fn select(&self, pattern: &str) -> ApplicationResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| ApplicationError::InvalidFilter {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let cases: Vec<_> = self
            .cases
            .iter()
            .filter(|case| regex.is_match(case.name()))
            .cloned()
            .collect();

        if cases.is_empty() {
            return Err(ApplicationError::EmptySelection(pattern.to_string()));
        }

        Ok(Self {
            name: self.name.clone(),
            cases,
        })
    }

    /// Checks that every case declares at least one acceptable code and that
    /// names are unique.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] found.
    pub fn validate(&self) -> DomainResult<()> {
        for (index, case) in self.cases.iter().enumerate() {
            if case.expectation().codes.is_empty() {
                return Err(DomainError::EmptyCodeSet(case.name().to_string()));
            }
            if self.cases[..index].iter().any(|c| c.name() == case.name()) {
                return Err(DomainError::InvalidConfig(format!(
                    "duplicate case name `{}`",
                    case.name()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restprobe_domain::{AcceptableCodeSet, RequestSpec};

    fn case(name: &str) -> TestCase {
        TestCase::new(name, RequestSpec::get("/"), AcceptableCodeSet::valid())
    }

    fn names(suite: &Suite) -> Vec<&str> {
        suite.cases().iter().map(TestCase::name).collect()
    }

    #[test]
    fn test_select_preserves_order() {
        let suite = Suite::new("s")
            .with_case(case("auth_missing"))
            .with_case(case("rest_api_root"))
            .with_case(case("auth_wrong_password"));

        let selected = suite.select("^auth_").unwrap();
        assert_eq!(names(&selected), vec!["auth_missing", "auth_wrong_password"]);
    }

    #[test]
    fn test_select_rejects_bad_pattern() {
        let suite = Suite::new("s").with_case(case("a"));
        assert!(matches!(
            suite.select("("),
            Err(ApplicationError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_select_rejects_empty_selection() {
        let suite = Suite::new("s").with_case(case("a"));
        assert!(matches!(
            suite.select("zzz"),
            Err(ApplicationError::EmptySelection(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_code_set() {
        let suite = Suite::new("s").with_case(TestCase::new(
            "nothing",
            RequestSpec::get("/"),
            AcceptableCodeSet::default(),
        ));
        assert_eq!(
            suite.validate(),
            Err(DomainError::EmptyCodeSet("nothing".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let suite = Suite::new("s").with_case(case("a")).with_case(case("a"));
        assert!(matches!(
            suite.validate(),
            Err(DomainError::InvalidConfig(_))
        ));
    }
}
