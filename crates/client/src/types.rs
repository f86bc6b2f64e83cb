// ABOUTME: Data model for Telegraph API payloads: Account, Page, PageList, PageViews, and the response envelope.
// ABOUTME: Also holds request-side option types (AccountField, PageInput, ViewsPeriod).

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use telegraph_content::Node;

use crate::error::{ApiError, ApiMethod};

/// A Telegraph account.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub short_name: String,
    pub author_name: String,
    pub author_url: String,
    /// Only returned by createAccount and revokeAccessToken.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub access_token: String,
    /// One-time login URL, returned on request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    pub page_count: u64,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.access_token.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("Account")
            .field("short_name", &self.short_name)
            .field("author_name", &self.author_name)
            .field("author_url", &self.author_url)
            .field("access_token", &token)
            .field("auth_url", &self.auth_url)
            .field("page_count", &self.page_count)
            .finish()
    }
}

/// A Telegraph page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub path: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub author_name: String,
    pub author_url: String,
    pub image_url: String,
    /// Empty unless the page was requested with content.
    pub content: Vec<Node>,
    pub views: u64,
    pub can_edit: bool,
}

/// One page of an account's page listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageList {
    pub total_count: u64,
    pub pages: Vec<Page>,
}

/// View count of a page for a given period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageViews {
    pub path: String,
    pub views: u64,
}

/// The `{ok, result | error}` wrapper around every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps the result, mapping `ok: false` to the method's failure code.
    pub fn into_result(self, method: ApiMethod) -> Result<T, ApiError> {
        if !self.ok {
            return Err(ApiError::failed(method, self.error));
        }
        self.result.ok_or_else(|| {
            ApiError::decode(
                method.name(),
                anyhow::anyhow!("response is ok but carries no result"),
            )
        })
    }
}

/// Account fields that getAccountInfo can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountField {
    ShortName,
    AuthorName,
    AuthorUrl,
    AuthUrl,
    PageCount,
}

/// Title, body and byline for createPage and editPage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInput {
    pub title: String,
    pub content: Vec<Node>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    /// Ask the service to echo the stored content back.
    pub return_content: bool,
}

impl PageInput {
    pub fn new(title: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            content,
            ..Default::default()
        }
    }

    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    pub fn author_url(mut self, url: impl Into<String>) -> Self {
        self.author_url = Some(url.into());
        self
    }

    pub fn return_content(mut self, return_content: bool) -> Self {
        self.return_content = return_content;
        self
    }
}

/// The period getViews counts over. Unset fields are left out of the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewsPeriod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
}

impl ViewsPeriod {
    pub fn all_time() -> Self {
        Self::default()
    }

    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            month: Some(month),
            ..Self::year(year)
        }
    }

    pub fn day(year: i32, month: u32, day: u32) -> Self {
        Self {
            day: Some(day),
            ..Self::month(year, month)
        }
    }

    pub fn hour(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self {
            hour: Some(hour),
            ..Self::day(year, month, day)
        }
    }

    /// Per-day period for a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::day(date.year(), date.month(), date.day())
    }
}
