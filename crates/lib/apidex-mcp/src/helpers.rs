use std::borrow::Cow;

use apidex_core::query::NoMatch;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub(crate) fn internal_err(message: impl Into<Cow<'static, str>>) -> ErrorData {
    mcp_err(ErrorCode::INTERNAL_ERROR, message)
}

/// An empty suggestion result is reported as not-found, matching how the
/// adapter's callers expect the condition surfaced.
pub(crate) fn map_no_match(err: &NoMatch) -> ErrorData {
    mcp_err(ErrorCode::RESOURCE_NOT_FOUND, err.to_string())
}
