//! Target-domain matching with the caller-configurable normalization policy.

/// Token that matches every queried name.
pub const WILDCARD: &str = "*";

/// Decides whether a queried name belongs to the configured redirect domain.
///
/// The same normalization (lowercase, optional leading-`www.` strip) is
/// applied to the configured target at construction and to every query name
/// before comparison, so the two can never disagree on policy.
#[derive(Debug, Clone)]
pub struct NameFilter {
    target: String,
    strip_www: bool,
}

impl NameFilter {
    pub fn new(domain: &str, strip_www: bool) -> Self {
        let mut filter = Self {
            target: String::new(),
            strip_www,
        };
        filter.target = if domain == WILDCARD {
            domain.to_string()
        } else {
            filter.normalize(domain)
        };
        filter
    }

    /// Normalized configured target (`*` for the wildcard).
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_wildcard(&self) -> bool {
        self.target == WILDCARD
    }

    /// Applies the normalization policy to a raw name.
    pub fn normalize(&self, name: &str) -> String {
        let lowered = name.to_ascii_lowercase();
        if self.strip_www {
            if let Some(stripped) = lowered.strip_prefix("www.") {
                return stripped.to_string();
            }
        }
        lowered
    }

    /// `name` must already be normalized via [`NameFilter::normalize`].
    pub fn matches(&self, name: &str) -> bool {
        self.is_wildcard() || name == self.target
    }
}
