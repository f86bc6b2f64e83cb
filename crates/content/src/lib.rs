// ABOUTME: Page content library: HTML-to-node conversion and the node JSON wire format.
// ABOUTME: Re-exports html_to_content, Node, Element, ContentError and the allow-lists.

//! Content handling for Telegraph-style pages.
//!
//! # Example
//!
//! ```
//! use telegraph_content::{encode_content, html_to_content};
//!
//! let content = html_to_content("<p>Hello, <b>world</b></p>").unwrap();
//! assert_eq!(
//!     encode_content(&content).unwrap(),
//!     r#"[{"tag":"p","children":["Hello, ",{"tag":"b","children":["world"]}]}]"#
//! );
//! ```

pub mod converter;
pub mod error;
pub mod node;

pub use converter::{html_to_content, is_allowed_attr, is_allowed_tag, ALLOWED_ATTRS, ALLOWED_TAGS};
pub use error::ContentError;
pub use node::{decode_content, encode_content, Element, Node, MAX_DEPTH};
