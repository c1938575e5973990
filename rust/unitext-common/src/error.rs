use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn precondition(operation: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::PreconditionViolation {
                operation: operation.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn parse_failure(input: impl Into<String>, target: &'static str) -> Error {
        Error(
            ErrorKind::ParseFailure {
                input: input.into(),
                target,
            }
            .into(),
        )
    }

    pub fn not_supported(feature: impl Into<String>) -> Error {
        Error(
            ErrorKind::NotSupported {
                feature: feature.into(),
            }
            .into(),
        )
    }

    /// Whether this error reports a violated operation precondition.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self.kind(), ErrorKind::PreconditionViolation { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("precondition violated in {operation}: {message}")]
    PreconditionViolation { operation: String, message: String },

    #[error("cannot parse '{input}' as {target}")]
    ParseFailure { input: String, target: &'static str },

    #[error("not supported: {feature}")]
    NotSupported { feature: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let e = Error::precondition("increment", "position is past the end");
        assert!(e.is_precondition_violation());
        assert_eq!(
            e.to_string(),
            "precondition violated in increment: position is past the end"
        );

        let e = Error::parse_failure("abc", "integer");
        assert!(!e.is_precondition_violation());
        assert!(matches!(
            e.into_kind(),
            ErrorKind::ParseFailure {
                target: "integer",
                ..
            }
        ));

        let e = Error::not_supported("NFKC");
        assert_eq!(e.to_string(), "not supported: NFKC");
    }
}
