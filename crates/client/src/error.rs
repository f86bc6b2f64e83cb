// ABOUTME: Error types for the Telegraph client including ErrorCode, ApiMethod, and ApiError.
// ABOUTME: Separates transport, status, decode, and parse failures from per-method ok:false failures.

use std::fmt;

use telegraph_content::ContentError;

/// The API methods exposed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    CreateAccount,
    GetAccountInfo,
    EditAccountInfo,
    RevokeAccessToken,
    CreatePage,
    EditPage,
    GetPage,
    GetPageList,
    GetViews,
}

impl ApiMethod {
    /// The method name as it appears in endpoint paths.
    pub fn name(&self) -> &'static str {
        match self {
            ApiMethod::CreateAccount => "createAccount",
            ApiMethod::GetAccountInfo => "getAccountInfo",
            ApiMethod::EditAccountInfo => "editAccountInfo",
            ApiMethod::RevokeAccessToken => "revokeAccessToken",
            ApiMethod::CreatePage => "createPage",
            ApiMethod::EditPage => "editPage",
            ApiMethod::GetPage => "getPage",
            ApiMethod::GetPageList => "getPageList",
            ApiMethod::GetViews => "getViews",
        }
    }

    /// The error code reported when the service answers `ok: false`.
    pub fn failure_code(&self) -> ErrorCode {
        match self {
            ApiMethod::CreateAccount => ErrorCode::CreateAccountFailed,
            ApiMethod::GetAccountInfo => ErrorCode::GetAccountInfoFailed,
            ApiMethod::EditAccountInfo => ErrorCode::EditAccountInfoFailed,
            ApiMethod::RevokeAccessToken => ErrorCode::RevokeAccessTokenFailed,
            ApiMethod::CreatePage => ErrorCode::CreatePageFailed,
            ApiMethod::EditPage => ErrorCode::EditPageFailed,
            ApiMethod::GetPage => ErrorCode::GetPageFailed,
            ApiMethod::GetPageList => ErrorCode::GetPageListFailed,
            ApiMethod::GetViews => ErrorCode::GetViewsFailed,
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error codes representing different categories of client failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Parse,
    Transport,
    UnexpectedStatus,
    Decode,
    CreateAccountFailed,
    GetAccountInfoFailed,
    EditAccountInfoFailed,
    RevokeAccessTokenFailed,
    CreatePageFailed,
    EditPageFailed,
    GetPageFailed,
    GetPageListFailed,
    GetViewsFailed,
}

impl ErrorCode {
    /// Returns true for the per-method `ok: false` codes.
    pub fn is_operation_failure(&self) -> bool {
        !matches!(
            self,
            ErrorCode::Parse | ErrorCode::Transport | ErrorCode::UnexpectedStatus | ErrorCode::Decode
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Parse => "HTML parse error",
            ErrorCode::Transport => "transport error",
            ErrorCode::UnexpectedStatus => "unexpected status code",
            ErrorCode::Decode => "decode error",
            ErrorCode::CreateAccountFailed => "failed to create account",
            ErrorCode::GetAccountInfoFailed => "failed to get account info",
            ErrorCode::EditAccountInfoFailed => "failed to edit account info",
            ErrorCode::RevokeAccessTokenFailed => "failed to revoke access token",
            ErrorCode::CreatePageFailed => "failed to create page",
            ErrorCode::EditPageFailed => "failed to edit page",
            ErrorCode::GetPageFailed => "failed to get page",
            ErrorCode::GetPageListFailed => "failed to get page list",
            ErrorCode::GetViewsFailed => "failed to get views",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for client operations.
#[derive(Debug, thiserror::Error)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Endpoint or method the failure belongs to.
    pub op: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// The service's `error` string from an `ok: false` envelope.
    pub description: Option<String>,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "telegraph: {}: {}", self.op, self.code)?;
        if let Some(status) = self.status {
            write!(f, " ({})", status)?;
        }
        if let Some(ref description) = self.description {
            write!(f, ": {}", description)?;
        }
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ApiError {
    fn new(code: ErrorCode, op: impl Into<String>) -> Self {
        Self {
            code,
            op: op.into(),
            status: None,
            description: None,
            source: None,
        }
    }

    /// Create a Transport error.
    pub fn transport(op: impl Into<String>, source: anyhow::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(ErrorCode::Transport, op)
        }
    }

    /// Create an UnexpectedStatus error, keeping the envelope description if one was sent.
    pub fn unexpected_status(op: impl Into<String>, status: u16, description: Option<String>) -> Self {
        Self {
            status: Some(status),
            description,
            ..Self::new(ErrorCode::UnexpectedStatus, op)
        }
    }

    /// Create a Decode error.
    pub fn decode(op: impl Into<String>, source: anyhow::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(ErrorCode::Decode, op)
        }
    }

    /// Create the method-specific error for an `ok: false` envelope.
    pub fn failed(method: ApiMethod, description: Option<String>) -> Self {
        Self {
            description,
            ..Self::new(method.failure_code(), method.name())
        }
    }

    /// Wrap a content conversion or decoding error.
    pub fn content(op: impl Into<String>, err: ContentError) -> Self {
        let code = if err.is_parse() {
            ErrorCode::Parse
        } else {
            ErrorCode::Decode
        };
        Self {
            source: Some(anyhow::Error::new(err)),
            ..Self::new(code, op)
        }
    }

    /// Returns true if this is a Transport error.
    pub fn is_transport(&self) -> bool {
        self.code == ErrorCode::Transport
    }

    /// Returns true if this is an UnexpectedStatus error.
    pub fn is_unexpected_status(&self) -> bool {
        self.code == ErrorCode::UnexpectedStatus
    }

    /// Returns true if this is a Decode error.
    pub fn is_decode(&self) -> bool {
        self.code == ErrorCode::Decode
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if the service answered `ok: false`.
    pub fn is_operation_failure(&self) -> bool {
        self.code.is_operation_failure()
    }

    /// Returns true if the underlying HTTP call timed out.
    pub fn is_timeout(&self) -> bool {
        self.source
            .as_ref()
            .and_then(|src| src.downcast_ref::<reqwest::Error>())
            .is_some_and(reqwest::Error::is_timeout)
    }
}
