//! Purpose queries over the endpoint index.

use std::{error::Error, fmt};

use crate::index::EndpointIndex;
use crate::model::EndpointRecord;

/// Reported when no endpoint description contains the purpose string.
///
/// A condition, not a fatal error: the adapter decides how to surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatch {
    purpose: String,
}

impl NoMatch {
    #[must_use]
    pub fn purpose(&self) -> &str {
        &self.purpose
    }
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let purpose = &self.purpose;
        write!(f, "no endpoint description contains {purpose:?}")
    }
}

impl Error for NoMatch {}

impl EndpointIndex {
    /// Returns every record whose description contains `purpose` as a
    /// literal, case-sensitive substring, in index order.
    ///
    /// No trimming, tokenization, or deduplication is applied.
    ///
    /// # Errors
    /// Returns [`NoMatch`] when nothing matched.
    pub fn suggest(&self, purpose: &str) -> Result<Vec<EndpointRecord>, NoMatch> {
        let matches: Vec<EndpointRecord> = self
            .records()
            .iter()
            .filter(|record| record.description.contains(purpose))
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(NoMatch {
                purpose: purpose.to_string(),
            });
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use crate::loader::DocumentLoader;
    use crate::model::ServiceDescriptor;

    async fn sample_index(fixture: &str) -> EndpointIndex {
        let dir = std::env::temp_dir().join("apidex-query-tests");
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join(fixture);
        std::fs::write(
            &path,
            r#"{
                "openapi": "3.0.0",
                "paths": {
                    "/users": { "get": { "summary": "Retrieve a list of users" } },
                    "/users/{userId}": { "get": { "summary": "Retrieve a specific user information" } },
                    "/products": { "get": { "summary": "Retrieve a list of products" } }
                }
            }"#,
        )
        .expect("fixture should be writable");

        let builder = IndexBuilder::new(DocumentLoader::default());
        builder
            .build(&[ServiceDescriptor::from_file("Test API", path)])
            .await
    }

    #[tokio::test]
    async fn matches_are_returned_in_index_order() {
        let index = sample_index("in-order.json").await;
        let matches = index.suggest("user").expect("two records mention user");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].path, "/users");
        assert_eq!(matches[0].description, "Retrieve a list of users");
        assert_eq!(matches[1].path, "/users/{userId}");
        assert_eq!(matches[1].description, "Retrieve a specific user information");
    }

    #[tokio::test]
    async fn partial_words_match_by_substring() {
        let index = sample_index("partial.json").await;
        let matches = index.suggest("list").expect("two records mention list");
        let paths: Vec<&str> = matches.iter().map(|record| record.path.as_str()).collect();
        assert_eq!(paths, ["/users", "/products"]);
    }

    #[tokio::test]
    async fn unmatched_purpose_reports_no_match() {
        let index = sample_index("unmatched.json").await;
        let err = index
            .suggest("non-existent feature")
            .expect_err("nothing should match");
        assert_eq!(err.purpose(), "non-existent feature");
    }

    #[tokio::test]
    async fn matching_is_case_sensitive() {
        let index = sample_index("case.json").await;
        assert!(index.suggest("USER").is_err());
    }
}
