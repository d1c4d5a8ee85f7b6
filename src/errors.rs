use axum::http::StatusCode;
use axum::response::Html;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn no_active_phase() -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "No active phase found for this client".to_string(),
        }
    }

    /// Keeps the status, swaps the text shown to the user.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            status: self.status,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status == reqwest::StatusCode::NOT_FOUND => Self::not_found(err.to_string()),
            _ => Self::upstream(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Html(crate::ui::render_error_page(&self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_message_keeps_status() {
        let err = AppError::upstream("connection refused").with_message("System Offline. Check Connection.");
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.message, "System Offline. Check Connection.");
    }

    #[test]
    fn missing_active_phase_is_its_own_message() {
        let err = AppError::no_active_phase();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "No active phase found for this client (422 Unprocessable Entity)");
    }
}
