// ABOUTME: Error types for HTML conversion and node wire decoding.
// ABOUTME: Provides ContentError with NoBodyFound, TooDeep, InvalidNode, and Json variants.

use thiserror::Error;

/// Errors that can occur while converting or decoding content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The parsed document has no `<body>` element to convert.
    #[error("no body element found")]
    NoBodyFound,

    /// Allowed elements are nested deeper than the given limit.
    #[error("content nested deeper than {0} elements")]
    TooDeep(usize),

    /// A JSON value does not have the shape of a content node.
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// The input is not valid JSON, or the content could not be encoded.
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContentError {
    /// Creates an InvalidNode error with a custom message.
    pub fn invalid_node(msg: impl Into<String>) -> Self {
        ContentError::InvalidNode(msg.into())
    }

    /// Returns true if this error came from HTML conversion rather than JSON.
    pub fn is_parse(&self) -> bool {
        matches!(self, ContentError::NoBodyFound | ContentError::TooDeep(_))
    }
}
