use strum::EnumIs;
use thiserror::Error;

/// A check whose evaluation panicked.
///
/// Every panic counts, not only those raised by the assertion macro itself: an
/// unrelated fault while evaluating the asserted expression is reported the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CheckFailure {
    pub message: String,
}

impl CheckFailure {
    pub(crate) const NON_STRING_PAYLOAD: &'static str = "<non-string panic payload>";

    /// Extract a readable message from a panic payload.
    pub fn from_payload(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            Self::NON_STRING_PAYLOAD.to_string()
        };
        Self { message }
    }
}

#[derive(Debug, Error, EnumIs)]
pub enum AssertestError {
    #[error("{name}: {failed} of {total} checks failed")]
    ChecksFailed {
        name: String,
        failed: usize,
        total: usize,
    },
}

pub type AssertestResult<T> = Result<T, AssertestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_messages_are_extracted() {
        let from_str = CheckFailure::from_payload(&"boom");
        assert_eq!(from_str.message, "boom");

        let from_string = CheckFailure::from_payload(&String::from("kaboom"));
        assert_eq!(from_string.to_string(), "kaboom");

        let opaque = CheckFailure::from_payload(&42u32);
        assert_eq!(opaque.message, CheckFailure::NON_STRING_PAYLOAD);
    }

    #[test]
    fn checks_failed_display() {
        let error = AssertestError::ChecksFailed {
            name: "f".into(),
            failed: 1,
            total: 3,
        };
        assert!(error.is_checks_failed());
        assert_eq!(error.to_string(), "f: 1 of 3 checks failed");
    }
}
