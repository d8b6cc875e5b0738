use crate::response::ResultCode;

/// Expected, recoverable business rejection raised by application logic.
///
/// Carries its own envelope code, defaulting to the business band. Distinct
/// from programming or infrastructure defects, which are classified
/// separately and never surface their detail to callers.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct BusinessError {
    code: u16,
    message: String,
}

impl BusinessError {
    /// Business rejection with the default business code
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: ResultCode::BusinessError.code(),
            message: message.into(),
        }
    }

    /// Business rejection with an explicit code
    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Business rejection from a result code, using its default message
    pub fn from_code(code: ResultCode) -> Self {
        Self {
            code: code.code(),
            message: code.message().to_string(),
        }
    }

    /// Business rejection from a result code with an overridden message
    pub fn from_code_message(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
