use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("todo with id {id} not found")]
    NotFound { id: i32 },
    #[error("bad request: {message}")]
    BadRequest {
        code: &'static str,
        message: String,
    },
    #[error("internal error")]
    Internal { code: &'static str, message: String },
}

impl AppError {
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_embeds_id() {
        assert_eq!(AppError::not_found(42).to_string(), "todo with id 42 not found");
    }

    #[test]
    fn internal_message_is_not_displayed() {
        let err = AppError::internal("id space exhausted");
        assert_eq!(err.to_string(), "internal error");
    }
}
