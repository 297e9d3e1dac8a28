use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Referential integrity error: {0}")]
    ReferentialIntegrity(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal error: {}", other),
                )
            }
        };

        (status, message).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::ConstraintViolation(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Error::ReferentialIntegrity(db.message().to_string())
            }
            other => Error::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: Error) -> (StatusCode, String) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn client_errors_render_bare_message() {
        assert_eq!(
            render(Error::Unauthorized("Unauthorized".into())).await,
            (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
        );
        assert_eq!(
            render(Error::NotFound("Device not found".into())).await,
            (StatusCode::NOT_FOUND, "Device not found".to_string())
        );
        assert_eq!(
            render(Error::BadRequest("Provider not supported".into())).await,
            (StatusCode::BAD_REQUEST, "Provider not supported".to_string())
        );
    }

    #[tokio::test]
    async fn store_errors_surface_as_internal() {
        let (status, body) =
            render(Error::ConstraintViolation("UNIQUE constraint failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal error: Constraint violation: UNIQUE constraint failed");

        let (status, body) = render(Error::Internal("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal error: boom");
    }
}
