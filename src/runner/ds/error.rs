use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum JErrorType {
    #[error("Uncaught reference error: {0}.")]
    ReferenceError(String),
    #[error("Uncaught type error: {0}.")]
    TypeError(String),
    #[error("Uncaught range error: {0}.")]
    RangeError(String),
    #[error("Uncaught syntax error: {0}.")]
    SyntaxError(String),
    /// Raised by user supplied functions, e.g. a mocked getter that throws.
    #[error("Uncaught error: {0}.")]
    Error(String),
}
impl JErrorType {
    pub fn message(&self) -> &str {
        match self {
            JErrorType::ReferenceError(m)
            | JErrorType::TypeError(m)
            | JErrorType::RangeError(m)
            | JErrorType::SyntaxError(m)
            | JErrorType::Error(m) => m,
        }
    }
}
