use proc_macro2::Span;
use strum::EnumIs;
use thiserror::Error;

/// Reasons `#[assert_tests]` refuses to expand.
///
/// Each variant keeps the span the compiler should underline; [`syn::Error`] is what
/// finally reaches the user, through `into_compile_error`.
#[derive(Debug, Error, EnumIs)]
pub enum TransformError {
    /// The item is not something whose body can be rewritten.
    #[error("`#[assert_tests]` can only be applied to a `fn` item with a body, found {found}")]
    NotAFunction { span: Span, found: String },

    #[error(
        "unknown `assert_tests` option `{option}`; expected one of `name`, `total`, `passed`, `crate`, `strict`"
    )]
    UnknownOption { span: Span, option: String },

    #[error("`assert_tests` option `{option}` is given more than once")]
    DuplicateOption { span: Span, option: String },

    #[error("invalid value for `assert_tests` option `{option}`: {reason}")]
    InvalidOption {
        span: Span,
        option: String,
        reason: String,
    },

    /// The rewrite visited a different number of assertions than were located.
    #[error(
        "located {located} assertions but rewrote {visited}; the function cannot be checked reliably"
    )]
    RecordMismatch {
        span: Span,
        located: usize,
        visited: usize,
    },

    #[error(transparent)]
    Syntax(#[from] syn::Error),
}

impl TransformError {
    pub fn span(&self) -> Span {
        match self {
            TransformError::NotAFunction { span, .. }
            | TransformError::UnknownOption { span, .. }
            | TransformError::DuplicateOption { span, .. }
            | TransformError::InvalidOption { span, .. }
            | TransformError::RecordMismatch { span, .. } => *span,
            TransformError::Syntax(error) => error.span(),
        }
    }
}

impl From<TransformError> for syn::Error {
    fn from(error: TransformError) -> Self {
        match error {
            TransformError::Syntax(error) => error,
            other => syn::Error::new(other.span(), other),
        }
    }
}

pub type TransformResult<T> = Result<T, TransformError>;
