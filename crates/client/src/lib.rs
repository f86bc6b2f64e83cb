// ABOUTME: Main library entry point for the Telegraph API client.
// ABOUTME: Re-exports Client, ClientBuilder, Options, the error types, the data model, and content helpers.

//! A blocking client for the Telegraph publishing API.
//!
//! # Example
//!
//! ```no_run
//! use telegraph_client::{ApiError, Client};
//!
//! fn main() -> Result<(), ApiError> {
//!     let client = Client::builder().build()?;
//!     let account = client.create_account("Sandbox", "Anonymous", "")?;
//!     let page = client.create_page_from_html(
//!         &account.access_token,
//!         "Title",
//!         "<p>Hello, <b>world</b>!</p>",
//!         &account.author_name,
//!         &account.author_url,
//!     )?;
//!     println!("{}", page.url);
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod client;
pub mod error;
pub mod options;
pub mod page;
pub mod types;

pub use crate::client::Client;
pub use crate::error::{ApiError, ApiMethod, ErrorCode};
pub use crate::options::{ClientBuilder, Options, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use crate::types::{
    Account, AccountField, Envelope, Page, PageInput, PageList, PageViews, ViewsPeriod,
};
pub use telegraph_content::{
    decode_content, encode_content, html_to_content, ContentError, Element, Node, MAX_DEPTH,
};
