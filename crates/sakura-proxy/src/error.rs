use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sakura_types::proxy::ProxyErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("API key not configured")]
    NotConfigured,

    #[error("Invalid request: {0} required")]
    BadRequest(&'static str),

    /// Upstream or body failure, reported with its cause in `details`
    #[error("{context}")]
    Failed {
        context: &'static str,
        details: String,
    },
}

impl ProxyError {
    pub fn failed(context: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Failed {
            context,
            details: cause.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let details = match self {
            Self::Failed { details, .. } => {
                tracing::error!("{error}: {details}");
                Some(details)
            }
            _ => None,
        };

        (status, Json(ProxyErrorBody { error, details })).into_response()
    }
}

/// Handler for any method a route does not accept
pub async fn method_not_allowed() -> ProxyError {
    ProxyError::MethodNotAllowed
}
