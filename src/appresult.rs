use std::any::Any;

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::removal::RemovalError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// A refusal the caller is meant to see, rendered as its code.
    Api(StatusCode, &'static str),
    Internal(anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl AppError {
    pub fn not_found() -> Self {
        Self::Api(StatusCode::NOT_FOUND, "NOT_FOUND")
    }

    pub fn method_not_allowed() -> Self {
        Self::Api(StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED")
    }

    pub fn invalid(code: &'static str) -> Self {
        Self::Api(StatusCode::UNPROCESSABLE_ENTITY, code)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Api(status, detail) => (status, detail),
            AppError::Internal(err) => {
                tracing::error!("{err}\n\n{}", err.backtrace());
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<RemovalError> for AppError {
    fn from(err: RemovalError) -> Self {
        Self::Api(err.status(), err.code())
    }
}

// Extractor rejections keep their status but not axum's plain-text body.
impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        tracing::debug!("bad query: {err}");
        Self::Api(err.status(), "INVALID_QUERY")
    }
}

impl From<PathRejection> for AppError {
    fn from(err: PathRejection) -> Self {
        tracing::debug!("bad path: {err}");
        Self::Api(err.status(), "INVALID_PATH")
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(anyhow::Error);

/// Panics inside a handler come back as the same envelope as any other
/// internal error.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let msg = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "handler panicked".to_owned()
    };

    AppError::from(anyhow::Error::msg(msg)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn removal_error_keeps_its_code() {
        let (status, body) = render(AppError::from(RemovalError::NotAdmin).into_response()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, serde_json::json!({ "detail": "NOT_ADMIN" }));
    }

    #[tokio::test]
    async fn internal_error_hides_cause() {
        let err = AppError::from(anyhow::anyhow!("secret lock state"));
        let (status, body) = render(err.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "detail": "INTERNAL_ERROR" }));
    }

    #[tokio::test]
    async fn panics_become_internal_errors() {
        let (status, body) = render(panic_response(Box::new("boom"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "INTERNAL_ERROR");
    }
}
