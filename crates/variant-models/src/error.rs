//! Error types for descriptor parsing.

/// Errors raised while parsing the textual descriptor form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// The text did not split into exactly three `" :: "`-separated segments.
    #[error("expected `<namespace> :: <feature> :: <value>`, got {0:?}")]
    Malformed(String),

    /// A segment contained characters outside its allowed set.
    #[error("invalid {segment} {value:?}")]
    InvalidSegment {
        /// Which segment failed ("namespace", "feature" or "value").
        segment: &'static str,
        /// The offending text.
        value: String,
    },
}

/// Result type for descriptor operations.
pub type Result<T> = std::result::Result<T, DescriptorError>;
