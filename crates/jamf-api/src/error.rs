use thiserror::Error;

/// Top-level error type for the `jamf-api` crate.
///
/// Every failure mode of the request pipeline has its own variant. Service
/// methods wrap errors in [`Error::Request`] to record which operation and
/// endpoint failed; [`Error::kind`] looks through that wrapper so callers can
/// branch on the failure class without inspecting message text.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// A required connection parameter is missing or malformed.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// An identifier value was neither an integer id nor a string name.
    #[error("Invalid identifier of type {found}: use a name (string) or an id (integer)")]
    InvalidIdentifier { found: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── API ─────────────────────────────────────────────────────────
    /// The server answered with a status other than 200 or 201.
    #[error("Request error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// Successful status, but a media type the client cannot decode.
    #[error("Unsupported response content type '{content_type}'")]
    UnsupportedContentType { content_type: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Successful status and known media type, but the body did not decode.
    #[error("Response was successful but the {content_type} body could not be decoded: {source}")]
    Decode {
        content_type: String,
        #[source]
        source: DecodeError,
    },

    /// The request payload could not be serialized.
    #[error("Failed to encode request body: {message}")]
    Encode { message: String },

    /// Local precondition failure, raised before any request is sent.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    // ── Context ─────────────────────────────────────────────────────
    /// An error annotated with the operation and endpoint it came from.
    #[error("{operation} failed ({endpoint}): {source}")]
    Request {
        operation: String,
        endpoint: String,
        #[source]
        source: Box<Error>,
    },
}

/// Underlying parser failure carried by [`Error::Decode`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::DeError),

    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Failure class of an [`Error`], stable across context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfiguration,
    InvalidIdentifier,
    Transport,
    Api,
    UnsupportedContentType,
    Decode,
    Encode,
    Validation,
}

impl Error {
    /// Wrap this error with the operation and endpoint that produced it.
    pub fn context(self, operation: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Request {
            operation: operation.into(),
            endpoint: endpoint.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context layers removed.
    pub fn root(&self) -> &Error {
        match self {
            Self::Request { source, .. } => source.root(),
            other => other,
        }
    }

    /// Failure class of the innermost error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            Self::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Api,
            Self::UnsupportedContentType { .. } => ErrorKind::UnsupportedContentType,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Encode { .. } => ErrorKind::Encode,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Request { source, .. } => source.kind(),
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self.root() {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_survives_nested_context() {
        let err = Error::Api {
            status: 500,
            body: "bad request".into(),
        }
        .context("list computers", "https://jss.example.com/JSSResource/computers")
        .context("inventory sync", "-");

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(500));
        assert!(matches!(err.root(), Error::Api { .. }));
    }

    #[test]
    fn context_display_names_operation_and_endpoint() {
        let err = Error::Validation {
            field: "general.name",
            reason: "name required for new policy".into(),
        }
        .context("create policy", "https://jss.example.com/JSSResource/policies/id/-1");

        let text = err.to_string();
        assert!(text.starts_with("create policy failed"), "{text}");
        assert!(text.contains("/JSSResource/policies/id/-1"), "{text}");
        assert!(text.contains("name required"), "{text}");
    }

    #[test]
    fn not_found_and_transient_hints() {
        let missing = Error::Api {
            status: 404,
            body: "The server has not found anything matching the request URI".into(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_transient());

        let gateway = Error::Api {
            status: 503,
            body: String::new(),
        };
        assert!(gateway.is_transient());

        let unsupported = Error::UnsupportedContentType {
            content_type: "text/html".into(),
        };
        assert_eq!(unsupported.status(), None);
        assert!(!unsupported.is_not_found());
    }
}
