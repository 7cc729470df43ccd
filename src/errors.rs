//! Crate-wide error type with HTTP mapping.
//!
//! Every layer returns [`Error`]; the [`IntoResponse`] impl decides the
//! status code, the `{"detail": ...}` body and the diagnostic headers, so
//! handlers can simply use `?`.

use axum::http::{header::HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::ontology::store::StoreError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No term matches the supplied identifier.
    #[error("HPO Term does not exist")]
    TermNotFound { token: String },

    /// The identifier is structurally invalid before any lookup.
    #[error("Invalid HPO identifier")]
    InvalidIdentifier { token: String },

    /// Unclassified query parse failure.
    #[error("Invalid query")]
    InvalidQuery,

    /// Unknown similarity method name.
    #[error("Invalid `method` parameter")]
    InvalidSimilarityMethod { value: String },

    /// Unknown combine strategy name.
    #[error("Invalid `combine` parameter")]
    InvalidCombineStrategy { value: String },

    /// Unknown information-content kind.
    #[error("Invalid information content kind specified")]
    InvalidInformationContentKind { value: String },

    /// Referenced gene or disease is not part of the annotation indices.
    #[error("{entity} does not exist")]
    UpstreamEntityNotFound { entity: &'static str },

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    JSON(#[from] serde_json::Error),
}

impl Error {
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::TermNotFound { .. } | Self::UpstreamEntityNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidIdentifier { .. }
            | Self::InvalidQuery
            | Self::InvalidSimilarityMethod { .. }
            | Self::InvalidCombineStrategy { .. }
            | Self::InvalidInformationContentKind { .. } => StatusCode::BAD_REQUEST,
            Self::Message(_) | Self::Store(_) | Self::IO(_) | Self::JSON(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Structured error body mirrored by every failing endpoint.
#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error.msg = %self, error.detail = ?self, "request_error");
        } else {
            tracing::debug!(error.msg = %self, "request_rejected");
        }

        let mut response = (
            status,
            Json(ErrorDetail {
                detail: self.to_string(),
            }),
        )
            .into_response();

        match &self {
            Self::TermNotFound { token } | Self::InvalidIdentifier { token } => {
                if let Ok(value) = HeaderValue::from_str(token) {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static("x-termnotfound"), value);
                }
            }
            Self::InvalidQuery => {
                response.headers_mut().insert(
                    HeaderName::from_static("x-error"),
                    HeaderValue::from_static("Invalid query provided"),
                );
            }
            _ => {}
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn message_helper_maps_to_internal_error() {
        let response = Error::msg("boot failure").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["detail"], "boot failure");
    }

    #[tokio::test]
    async fn resolution_failures_carry_the_diagnostic_header() {
        let response = Error::TermNotFound {
            token: "HP:0009999".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("x-termnotfound").unwrap(),
            "HP:0009999"
        );
    }
}
