// ABOUTME: Account endpoints: createAccount, getAccountInfo, editAccountInfo, revokeAccessToken.
// ABOUTME: Each call posts a typed JSON body and unwraps the envelope into an Account.

use reqwest::Method;
use serde::Serialize;

use crate::client::Client;
use crate::error::{ApiError, ApiMethod};
use crate::types::{Account, AccountField, Envelope};

#[derive(Serialize)]
struct AccountDetails<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    short_name: &'a str,
    author_name: &'a str,
    author_url: &'a str,
}

#[derive(Serialize)]
struct AccountInfoRequest<'a> {
    access_token: &'a str,
    #[serde(skip_serializing_if = "no_fields")]
    fields: &'a [AccountField],
}

fn no_fields(fields: &&[AccountField]) -> bool {
    fields.is_empty()
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    access_token: &'a str,
}

impl Client {
    fn post_account<B: Serialize>(&self, method: ApiMethod, body: &B) -> Result<Account, ApiError> {
        let envelope: Envelope<Account> = self.request(Method::POST, method, None, Some(body))?;
        envelope.into_result(method)
    }

    /// Create a new account. The returned account carries its access token.
    pub fn create_account(
        &self,
        short_name: &str,
        author_name: &str,
        author_url: &str,
    ) -> Result<Account, ApiError> {
        let body = AccountDetails {
            access_token: None,
            short_name,
            author_name,
            author_url,
        };
        self.post_account(ApiMethod::CreateAccount, &body)
    }

    /// Fetch account information. An empty `fields` slice lets the service pick its defaults.
    pub fn get_account_info(
        &self,
        access_token: &str,
        fields: &[AccountField],
    ) -> Result<Account, ApiError> {
        let body = AccountInfoRequest {
            access_token,
            fields,
        };
        self.post_account(ApiMethod::GetAccountInfo, &body)
    }

    pub fn edit_account_info(
        &self,
        access_token: &str,
        short_name: &str,
        author_name: &str,
        author_url: &str,
    ) -> Result<Account, ApiError> {
        let body = AccountDetails {
            access_token: Some(access_token),
            short_name,
            author_name,
            author_url,
        };
        self.post_account(ApiMethod::EditAccountInfo, &body)
    }

    /// Revoke `access_token`; the returned account holds the replacement token.
    pub fn revoke_access_token(&self, access_token: &str) -> Result<Account, ApiError> {
        self.post_account(ApiMethod::RevokeAccessToken, &TokenRequest { access_token })
    }
}
