//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile a route pattern into an anchored regex
//! - Match the full request path (partial matches rejected)
//! - Extract capture groups in left-to-right order
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A group that does not participate in the match yields an empty string,
//!   so parameter positions stay stable

use regex::Regex;

/// A compiled path pattern such as `/customers/([^/]+)/?`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile `pattern`, anchoring it at both ends.
    pub fn new(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let source = pattern.into();
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self { source, regex })
    }

    /// The pattern as registered, without anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole path matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match the whole path and return the captured groups.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}
