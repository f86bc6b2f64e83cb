// ABOUTME: Page endpoints: createPage, editPage, getPage, getPageList, getViews.
// ABOUTME: Also provides create_page_from_html, which converts HTML before creating the page.

use reqwest::Method;
use serde::Serialize;
use telegraph_content::{html_to_content, Node};

use crate::client::Client;
use crate::error::{ApiError, ApiMethod};
use crate::types::{Envelope, Page, PageInput, PageList, PageViews, ViewsPeriod};

#[derive(Serialize)]
struct PageRequest<'a> {
    access_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    title: &'a str,
    content: &'a [Node],
    #[serde(skip_serializing_if = "Option::is_none")]
    author_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_url: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    return_content: bool,
}

impl<'a> PageRequest<'a> {
    fn new(access_token: &'a str, path: Option<&'a str>, input: &'a PageInput) -> Self {
        Self {
            access_token,
            path,
            title: &input.title,
            content: &input.content,
            author_name: input.author_name.as_deref(),
            author_url: input.author_url.as_deref(),
            return_content: input.return_content,
        }
    }
}

#[derive(Serialize)]
struct GetPageRequest {
    return_content: bool,
}

#[derive(Serialize)]
struct PageListRequest<'a> {
    access_token: &'a str,
    offset: u32,
    limit: u32,
}

#[derive(Serialize)]
struct ViewsRequest<'a> {
    path: &'a str,
    #[serde(flatten)]
    period: &'a ViewsPeriod,
}

impl Client {
    pub fn create_page(&self, access_token: &str, input: &PageInput) -> Result<Page, ApiError> {
        let body = PageRequest::new(access_token, None, input);
        let envelope: Envelope<Page> =
            self.request(Method::POST, ApiMethod::CreatePage, None, Some(&body))?;
        envelope.into_result(ApiMethod::CreatePage)
    }

    /// Convert `html` to content nodes and create a page from them.
    pub fn create_page_from_html(
        &self,
        access_token: &str,
        title: &str,
        html: &str,
        author_name: &str,
        author_url: &str,
    ) -> Result<Page, ApiError> {
        let content =
            html_to_content(html).map_err(|e| ApiError::content(ApiMethod::CreatePage.name(), e))?;
        let input = PageInput::new(title, content)
            .author_name(author_name)
            .author_url(author_url);
        self.create_page(access_token, &input)
    }

    /// Replace the title and content of the page at `path`.
    pub fn edit_page(
        &self,
        access_token: &str,
        path: &str,
        input: &PageInput,
    ) -> Result<Page, ApiError> {
        let body = PageRequest::new(access_token, Some(path), input);
        let envelope: Envelope<Page> =
            self.request(Method::POST, ApiMethod::EditPage, Some(path), Some(&body))?;
        envelope.into_result(ApiMethod::EditPage)
    }

    pub fn get_page(&self, path: &str, return_content: bool) -> Result<Page, ApiError> {
        let envelope: Envelope<Page> = self.request(
            Method::GET,
            ApiMethod::GetPage,
            Some(path),
            Some(&GetPageRequest { return_content }),
        )?;
        envelope.into_result(ApiMethod::GetPage)
    }

    /// List the account's pages, newest first, starting at `offset`.
    pub fn get_page_list(
        &self,
        access_token: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PageList, ApiError> {
        let body = PageListRequest {
            access_token,
            offset,
            limit,
        };
        let envelope: Envelope<PageList> =
            self.request(Method::POST, ApiMethod::GetPageList, None, Some(&body))?;
        envelope.into_result(ApiMethod::GetPageList)
    }

    pub fn get_views(&self, path: &str, period: &ViewsPeriod) -> Result<PageViews, ApiError> {
        let body = ViewsRequest { path, period };
        let envelope: Envelope<PageViews> =
            self.request(Method::POST, ApiMethod::GetViews, None, Some(&body))?;
        let mut views = envelope.into_result(ApiMethod::GetViews)?;
        if views.path.is_empty() {
            views.path = path.to_string();
        }
        Ok(views)
    }
}
