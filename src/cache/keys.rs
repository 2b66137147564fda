//! Cache key definitions.
//!
//! One fixed key per cached collection — keys are never parameterized by
//! filter or caller, which is what makes coalescing concurrent loads sound.

/// Identifies a cached collection for lookup and invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    /// All projects, ordered by last update descending.
    Projects,
    /// All case studies, ordered by creation time descending.
    CaseStudies,
}

impl CollectionKey {
    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Projects => "projects",
            CollectionKey::CaseStudies => "case_studies",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        assert_ne!(CollectionKey::Projects, CollectionKey::CaseStudies);
        assert_ne!(
            CollectionKey::Projects.as_str(),
            CollectionKey::CaseStudies.as_str()
        );
    }
}
