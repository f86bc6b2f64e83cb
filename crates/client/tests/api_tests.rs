// ABOUTME: Integration tests for the Telegraph endpoints against an httpmock server.
// ABOUTME: Checks request bodies, decoded results, and ok:false failure mapping per method.

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use telegraph_client::{
    html_to_content, AccountField, Client, Element, ErrorCode, Node, PageInput, ViewsPeriod,
};

const ACCOUNT_RESPONSE: &str = r#"{"ok":true,"result":{"short_name":"Test","author_name":"Tester","author_url":"https://example.com","access_token":"123456","page_count":0}}"#;
const PAGE_RESPONSE: &str = r#"{"ok":true,"result":{"path":"test-path","url":"https://example.com/test-path","title":"Test Page","content":[{"tag":"p","children":["Hello, world!"]}],"author_name":"Tester","author_url":"https://example.com","views":0,"can_edit":true}}"#;
const PAGE_LIST_RESPONSE: &str = r#"{"ok":true,"result":{"total_count":1,"pages":[{"path":"test-path","url":"https://example.com/test-path","title":"Test Page","author_name":"Tester","author_url":"https://example.com","views":0,"can_edit":true}]}}"#;
const VIEWS_RESPONSE: &str = r#"{"ok":true,"result":{"path":"test-path","views":100}}"#;
const ERROR_RESPONSE: &str = r#"{"ok":false,"error":"test error"}"#;

const TOKEN: &str = "123456";

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.url("/"))
        .debug(true)
        .build()
        .expect("client should build")
}

fn hello_content() -> Vec<Node> {
    vec![Node::from(Element::new("p").with_child("Hello, world!"))]
}

#[test]
fn create_account_posts_details() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/createAccount").json_body(json!({
            "short_name": "Test",
            "author_name": "Tester",
            "author_url": "https://example.com"
        }));
        then.status(200).body(ACCOUNT_RESPONSE);
    });

    let account = client_for(&server)
        .create_account("Test", "Tester", "https://example.com")
        .expect("create_account should succeed");
    mock.assert();

    assert_eq!(account.short_name, "Test");
    assert_eq!(account.access_token, TOKEN);
    assert_eq!(account.page_count, 0);
}

#[test]
fn get_account_info_sends_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/getAccountInfo").json_body(json!({
            "access_token": TOKEN,
            "fields": ["short_name", "author_name", "author_url", "page_count"]
        }));
        then.status(200).body(ACCOUNT_RESPONSE);
    });

    let fields = [
        AccountField::ShortName,
        AccountField::AuthorName,
        AccountField::AuthorUrl,
        AccountField::PageCount,
    ];
    let account = client_for(&server)
        .get_account_info(TOKEN, &fields)
        .expect("get_account_info should succeed");
    mock.assert();
    assert_eq!(account.author_name, "Tester");
}

#[test]
fn get_account_info_omits_empty_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/getAccountInfo")
            .json_body(json!({"access_token": TOKEN}));
        then.status(200).body(ACCOUNT_RESPONSE);
    });

    client_for(&server)
        .get_account_info(TOKEN, &[])
        .expect("get_account_info should succeed");
    mock.assert();
}

#[test]
fn edit_account_info_includes_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/editAccountInfo").json_body(json!({
            "access_token": TOKEN,
            "short_name": "Test",
            "author_name": "Tester",
            "author_url": "https://example.com"
        }));
        then.status(200).body(ACCOUNT_RESPONSE);
    });

    let account = client_for(&server)
        .edit_account_info(TOKEN, "Test", "Tester", "https://example.com")
        .expect("edit_account_info should succeed");
    mock.assert();
    assert_eq!(account.short_name, "Test");
}

#[test]
fn revoke_access_token_returns_account() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/revokeAccessToken")
            .json_body(json!({"access_token": TOKEN}));
        then.status(200).body(ACCOUNT_RESPONSE);
    });

    let account = client_for(&server)
        .revoke_access_token(TOKEN)
        .expect("revoke_access_token should succeed");
    mock.assert();
    assert_eq!(account.access_token, TOKEN);
}

#[test]
fn create_page_embeds_content_nodes() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/createPage").json_body(json!({
            "access_token": TOKEN,
            "title": "Test Page",
            "content": [{"tag": "p", "children": ["Hello, world!"]}],
            "author_name": "Tester",
            "author_url": "https://example.com"
        }));
        then.status(200).body(PAGE_RESPONSE);
    });

    let input = PageInput::new("Test Page", hello_content())
        .author_name("Tester")
        .author_url("https://example.com");
    let page = client_for(&server)
        .create_page(TOKEN, &input)
        .expect("create_page should succeed");
    mock.assert();

    assert_eq!(page.title, "Test Page");
    assert_eq!(page.path, "test-path");
    assert_eq!(page.content, hello_content());
    assert!(page.can_edit);
}

#[test]
fn create_page_from_html_converts_first() {
    let html = r#"<p>Hello, <b>world</b>! This is an <a href="https://example.com">example link</a>.</p>"#;
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/createPage").json_body(json!({
            "access_token": TOKEN,
            "title": "Test Page",
            "content": [{"tag": "p", "children": [
                "Hello, ",
                {"tag": "b", "children": ["world"]},
                "! This is an ",
                {"tag": "a", "attrs": {"href": "https://example.com"}, "children": ["example link"]},
                "."
            ]}],
            "author_name": "Tester",
            "author_url": "https://example.com"
        }));
        then.status(200).body(PAGE_RESPONSE);
    });

    let page = client_for(&server)
        .create_page_from_html(TOKEN, "Test Page", html, "Tester", "https://example.com")
        .expect("create_page_from_html should succeed");
    mock.assert();
    assert_eq!(page.url, "https://example.com/test-path");
}

#[test]
fn create_page_from_html_without_body_is_parse_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/createPage");
        then.status(200).body(PAGE_RESPONSE);
    });

    let err = client_for(&server)
        .create_page_from_html(TOKEN, "T", "<frameset><frame src=\"a\"></frameset>", "", "")
        .expect_err("frameset has no body");
    assert_eq!(err.code, ErrorCode::Parse);
    mock.assert_hits(0);
}

#[test]
fn edit_page_posts_to_path_endpoint() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/editPage/test-path").json_body(json!({
            "access_token": TOKEN,
            "path": "test-path",
            "title": "Test Page",
            "content": [{"tag": "p", "children": ["Hello, world!"]}],
            "return_content": true
        }));
        then.status(200).body(PAGE_RESPONSE);
    });

    let input = PageInput::new("Test Page", hello_content()).return_content(true);
    let page = client_for(&server)
        .edit_page(TOKEN, "test-path", &input)
        .expect("edit_page should succeed");
    mock.assert();
    assert_eq!(page.title, "Test Page");
}

#[test]
fn get_page_uses_get() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/getPage/test-path")
            .json_body(json!({"return_content": true}));
        then.status(200).body(PAGE_RESPONSE);
    });

    let page = client_for(&server)
        .get_page("test-path", true)
        .expect("get_page should succeed");
    mock.assert();
    assert_eq!(page.content, hello_content());
}

#[test]
fn get_page_list_paginates() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/getPageList").json_body(json!({
            "access_token": TOKEN,
            "offset": 0,
            "limit": 10
        }));
        then.status(200).body(PAGE_LIST_RESPONSE);
    });

    let list = client_for(&server)
        .get_page_list(TOKEN, 0, 10)
        .expect("get_page_list should succeed");
    mock.assert();

    assert_eq!(list.total_count, 1);
    assert_eq!(list.pages.len(), 1);
    assert_eq!(list.pages[0].path, "test-path");
    assert!(list.pages[0].content.is_empty());
}

#[test]
fn get_views_sends_period() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/getViews").json_body(json!({
            "path": "test-path",
            "year": 2024,
            "month": 5,
            "day": 17
        }));
        then.status(200).body(VIEWS_RESPONSE);
    });

    let views = client_for(&server)
        .get_views("test-path", &ViewsPeriod::day(2024, 5, 17))
        .expect("get_views should succeed");
    mock.assert();
    assert_eq!(views.views, 100);
    assert_eq!(views.path, "test-path");
}

#[test]
fn get_views_fills_missing_path() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/getViews");
        then.status(200).body(r#"{"ok":true,"result":{"views":7}}"#);
    });

    let views = client_for(&server)
        .get_views("other-path", &ViewsPeriod::all_time())
        .expect("get_views should succeed");
    assert_eq!(views.path, "other-path");
    assert_eq!(views.views, 7);
}

#[test]
fn ok_false_maps_to_method_specific_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(200).body(ERROR_RESPONSE);
    });
    server.mock(|when, then| {
        when.method(GET);
        then.status(200).body(ERROR_RESPONSE);
    });

    let client = client_for(&server);
    let input = PageInput::new("T", hello_content());
    let cases = [
        (client.create_account("a", "b", "c").unwrap_err(), ErrorCode::CreateAccountFailed),
        (client.get_account_info(TOKEN, &[]).unwrap_err(), ErrorCode::GetAccountInfoFailed),
        (client.edit_account_info(TOKEN, "a", "b", "c").unwrap_err(), ErrorCode::EditAccountInfoFailed),
        (client.revoke_access_token(TOKEN).unwrap_err(), ErrorCode::RevokeAccessTokenFailed),
        (client.create_page(TOKEN, &input).unwrap_err(), ErrorCode::CreatePageFailed),
        (client.edit_page(TOKEN, "p", &input).unwrap_err(), ErrorCode::EditPageFailed),
        (client.get_page("p", false).unwrap_err(), ErrorCode::GetPageFailed),
        (client.get_page_list(TOKEN, 0, 1).unwrap_err(), ErrorCode::GetPageListFailed),
        (client.get_views("p", &ViewsPeriod::all_time()).unwrap_err(), ErrorCode::GetViewsFailed),
    ];
    for (err, code) in cases {
        assert_eq!(err.code, code);
        assert!(err.is_operation_failure());
        assert_eq!(err.description.as_deref(), Some("test error"));
    }
}

#[test]
fn http_400_envelope_is_status_error_not_operation_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/createAccount");
        then.status(400).body(ERROR_RESPONSE);
    });

    let err = client_for(&server)
        .create_account("a", "b", "c")
        .expect_err("400 should fail");
    assert!(err.is_unexpected_status());
    assert!(!err.is_operation_failure());
    assert!(!err.is_transport());
    assert_eq!(err.description.as_deref(), Some("test error"));
}

#[test]
fn converted_content_survives_service_echo() {
    let html = "<figure><img src=\"/file/a.jpg\"><figcaption>A <em>caption</em></figcaption></figure><p>Text</p>";
    let content = html_to_content(html).unwrap();
    let echoed = json!({
        "ok": true,
        "result": {"path": "p", "url": "u", "title": "t", "content": content}
    });

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/getPage/p");
        then.status(200).body(echoed.to_string());
    });

    let page = client_for(&server)
        .get_page("p", true)
        .expect("get_page should succeed");
    assert_eq!(page.content, content);
}

#[test]
fn edit_page_errors_report_method_name() {
    let status_server = MockServer::start();
    status_server.mock(|when, then| {
        when.method(POST).path("/editPage/test-path");
        then.status(400).body(ERROR_RESPONSE);
    });
    let failure_server = MockServer::start();
    failure_server.mock(|when, then| {
        when.method(POST).path("/editPage/test-path");
        then.status(200).body(ERROR_RESPONSE);
    });

    let input = PageInput::new("T", hello_content());
    let status_err = client_for(&status_server)
        .edit_page(TOKEN, "test-path", &input)
        .unwrap_err();
    let failure_err = client_for(&failure_server)
        .edit_page(TOKEN, "test-path", &input)
        .unwrap_err();

    assert_eq!(status_err.code, ErrorCode::UnexpectedStatus);
    assert_eq!(failure_err.code, ErrorCode::EditPageFailed);
    assert_eq!(status_err.op, "editPage");
    assert_eq!(failure_err.op, status_err.op);
}

#[test]
fn deepest_convertible_page_decodes_from_response() {
    let depth = telegraph_client::MAX_DEPTH;
    let html = format!("{}deep{}", "<blockquote>".repeat(depth), "</blockquote>".repeat(depth));
    let content = html_to_content(&html).unwrap();
    let echoed = json!({
        "ok": true,
        "result": {"path": "deep", "url": "u", "title": "t", "content": content}
    });

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/getPage/deep");
        then.status(200).body(echoed.to_string());
    });

    let page = client_for(&server)
        .get_page("deep", true)
        .expect("deep page should decode");
    assert_eq!(page.content, content);
}
