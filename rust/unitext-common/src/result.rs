pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_precondition {
    ($operation:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_precondition(result, $operation, stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_precondition(predicate: bool, operation: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        precondition_violated(operation, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn precondition_violated(operation: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::PreconditionViolation {
        operation: operation.to_string(),
        message: condition.to_string(),
    }
    .into())
}
