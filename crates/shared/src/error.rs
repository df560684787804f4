use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnknownRoute,
    ContentFetchFailed,
    StaleCompletion,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("unknown route '{0}'")]
    UnknownRoute(String),
    #[error("content '{content_id}' unavailable: {reason}")]
    ContentUnavailable { content_id: String, reason: String },
    #[error("completion for '{target}' is stale; current route is '{current}'")]
    StaleCompletion { target: String, current: String },
}

impl NavError {
    pub fn content_unavailable(content_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ContentUnavailable {
            content_id: content_id.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownRoute(_) => ErrorCode::UnknownRoute,
            Self::ContentUnavailable { .. } => ErrorCode::ContentFetchFailed,
            Self::StaleCompletion { .. } => ErrorCode::StaleCompletion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route table must contain at least one route")]
    Empty,
    #[error("route key must not be empty")]
    EmptyKey,
    #[error("duplicate route key '{0}'")]
    DuplicateKey(String),
    #[error("default route '{0}' is not declared in the table")]
    MissingDefault(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_stable_codes() {
        let unavailable = NavError::content_unavailable("connect", "backend offline");
        assert_eq!(unavailable.code(), ErrorCode::ContentFetchFailed);
        assert_eq!(
            unavailable.to_string(),
            "content 'connect' unavailable: backend offline"
        );
        assert_eq!(
            NavError::UnknownRoute("blog".into()).code(),
            ErrorCode::UnknownRoute
        );
        let stale = NavError::StaleCompletion {
            target: "profile".into(),
            current: "connect".into(),
        };
        assert_eq!(stale.code(), ErrorCode::StaleCompletion);
    }
}
