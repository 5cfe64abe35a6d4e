use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// One rejected booking field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Could not connect to the server: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Reservation rejected with HTTP {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Booking is not valid: {}", join(.0))]
    Invalid(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SubmissionError {
    /// Text suitable for showing to the person making the booking.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Connection(_) => {
                "Could not connect to the server. Please check your connection and try again."
                    .to_string()
            }
            SubmissionError::Rejected { status, .. } => format!(
                "The reservation service answered with status {}. Please try again.",
                status.as_u16()
            ),
            SubmissionError::Request(_) => {
                "Something went wrong while sending your booking. Please try again.".to_string()
            }
            SubmissionError::Invalid(errors) => {
                format!("Please correct the following: {}", join(errors))
            }
        }
    }

    /// Whether sending the same booking again may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SubmissionError::Invalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_includes_status() {
        let err = SubmissionError::Rejected {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        assert!(err.user_message().contains("502"));
        assert!(err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Reservation rejected with HTTP 502 Bad Gateway: upstream down"
        );
    }

    #[test]
    fn invalid_booking_lists_fields() {
        let err = SubmissionError::Invalid(vec![
            ValidationError::new("email", "Please enter a valid email address."),
            ValidationError::new("numAdults", "At least 1 adult is required."),
        ]);
        assert!(!err.is_retryable());
        assert_eq!(
            err.user_message(),
            "Please correct the following: \
             email: Please enter a valid email address.; \
             numAdults: At least 1 adult is required."
        );
    }
}
