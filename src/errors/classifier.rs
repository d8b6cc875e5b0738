//! Boundary fault classification.
//!
//! Every fault that escapes a handler is mapped to exactly one response
//! envelope by an ordered category table, first match wins. More specific
//! categories sit before the generic tail: reordering them would degrade
//! business and validation faults to generic internal errors.

use axum::response::{IntoResponse, Response};
use tracing::error;

use super::business::BusinessError;
use super::validation::{
    BindingError, ConstraintViolationError, InvalidArgumentError, PayloadValidationError,
    TypeMismatchError,
};
use crate::response::{ApiResponse, ResultCode};

struct Classified {
    code: u16,
    message: String,
}

type Matcher = fn(&anyhow::Error) -> Option<Classified>;

/// Ordered category table. Matchers probe the whole cause chain, so a fault
/// keeps its classification even after `context()` wrapping.
const CHAIN: &[(&str, Matcher)] = &[
    ("business", match_business),
    ("payload-validation", match_payload_validation),
    ("binding", match_binding),
    ("constraint-violation", match_constraint_violation),
    ("type-mismatch", match_type_mismatch),
    ("invalid-argument", match_invalid_argument),
];

fn find_in_chain<E: std::error::Error + 'static>(fault: &anyhow::Error) -> Option<&E> {
    fault.chain().find_map(|cause| cause.downcast_ref::<E>())
}

fn match_business(fault: &anyhow::Error) -> Option<Classified> {
    find_in_chain::<BusinessError>(fault).map(|e| Classified {
        code: e.code(),
        message: e.message().to_string(),
    })
}

fn match_payload_validation(fault: &anyhow::Error) -> Option<Classified> {
    find_in_chain::<PayloadValidationError>(fault).map(|e| Classified {
        code: ResultCode::ValidateFailed.code(),
        message: e.to_string(),
    })
}

fn match_binding(fault: &anyhow::Error) -> Option<Classified> {
    find_in_chain::<BindingError>(fault).map(|e| Classified {
        code: ResultCode::ValidateFailed.code(),
        message: e.to_string(),
    })
}

fn match_constraint_violation(fault: &anyhow::Error) -> Option<Classified> {
    find_in_chain::<ConstraintViolationError>(fault).map(|e| Classified {
        code: ResultCode::ValidateFailed.code(),
        message: e.to_string(),
    })
}

fn match_type_mismatch(fault: &anyhow::Error) -> Option<Classified> {
    // Deserializer detail stays in the log only.
    find_in_chain::<TypeMismatchError>(fault).map(|_| Classified {
        code: ResultCode::ValidateFailed.code(),
        message: ResultCode::ValidateFailed.message().to_string(),
    })
}

fn match_invalid_argument(fault: &anyhow::Error) -> Option<Classified> {
    find_in_chain::<InvalidArgumentError>(fault).map(|e| Classified {
        code: ResultCode::ValidateFailed.code(),
        message: e.to_string(),
    })
}

/// Map a fault to its response envelope.
///
/// Total: every fault yields exactly one envelope. Each classification emits
/// one diagnostic record with the category and the full fault detail before
/// returning, including when the returned message is the fixed generic one.
pub fn classify(fault: &anyhow::Error) -> ApiResponse<()> {
    for &(category, matcher) in CHAIN {
        if let Some(outcome) = matcher(fault) {
            error!(category, detail = ?fault, "request failed: {fault}");
            return ApiResponse::failed_with(outcome.code, outcome.message);
        }
    }

    // Unmatched faults are internal defects: the detail goes to the log, the
    // caller only sees the fixed generic message.
    error!(category = "unclassified", detail = ?fault, "request failed: {fault}");
    ApiResponse::failed_code(ResultCode::InternalServerError)
}

/// Handler-level error wrapper.
///
/// Handlers return `Result<_, AppError>`; any fault converted through `?`
/// is classified into an envelope when the response is rendered, so each
/// handled request produces exactly one envelope.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        classify(&self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::validation::FieldError;

    #[test]
    fn test_business_fault_classified_verbatim() {
        let fault = anyhow::Error::new(BusinessError::with_code(650, "insufficient balance"));
        let resp = classify(&fault);
        assert_eq!(resp.code, 650);
        assert_eq!(resp.message.as_deref(), Some("insufficient balance"));
        assert_eq!(resp.data, None);
    }

    #[test]
    fn test_business_fault_survives_context_wrapping() {
        let fault = anyhow::Error::new(BusinessError::new("rejected"))
            .context("while handling transfer");
        let resp = classify(&fault);
        assert_eq!(resp.code, 600);
        assert_eq!(resp.message.as_deref(), Some("rejected"));
    }

    #[test]
    fn test_payload_validation_messages_joined() {
        let fault = anyhow::Error::new(PayloadValidationError::new(vec![
            FieldError::new("name", "name required"),
            FieldError::new("age", "age must be positive"),
        ]));
        let resp = classify(&fault);
        assert_eq!(resp.code, 400);
        assert_eq!(
            resp.message.as_deref(),
            Some("name required, age must be positive")
        );
    }

    #[test]
    fn test_binding_fault_is_client_error() {
        let fault = anyhow::Error::new(BindingError::new(vec![
            "page must be a number".to_string(),
        ]));
        let resp = classify(&fault);
        assert_eq!(resp.code, 400);
        assert_eq!(resp.message.as_deref(), Some("page must be a number"));
    }

    #[test]
    fn test_constraint_violations_joined() {
        let fault = anyhow::Error::new(ConstraintViolationError::new(vec![
            "amount must be positive".to_string(),
        ]));
        let resp = classify(&fault);
        assert_eq!(resp.code, 400);
        assert_eq!(resp.message.as_deref(), Some("amount must be positive"));
    }

    #[test]
    fn test_type_mismatch_detail_suppressed() {
        let fault = anyhow::Error::new(TypeMismatchError::new(
            "id",
            "invalid digit found in string \"abc\"",
        ));
        let resp = classify(&fault);
        assert_eq!(resp.code, 400);
        assert_eq!(resp.message.as_deref(), Some("参数校验失败"));
        assert!(!resp.message.unwrap().contains("abc"));
    }

    #[test]
    fn test_invalid_argument_message_verbatim() {
        let fault = anyhow::Error::new(InvalidArgumentError::new("cannot transfer to self"));
        let resp = classify(&fault);
        assert_eq!(resp.code, 400);
        assert_eq!(resp.message.as_deref(), Some("cannot transfer to self"));
    }

    #[test]
    fn test_unclassified_fault_never_leaks_detail() {
        let fault = anyhow::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "npe at line 42",
        ));
        let resp = classify(&fault);
        assert_eq!(resp.code, 500);
        assert_eq!(resp.message.as_deref(), Some("系统内部错误"));
        assert!(!resp.message.unwrap().contains("npe at line 42"));
        assert_eq!(resp.data, None);
    }

    #[test]
    fn test_plain_anyhow_message_never_leaks() {
        let fault = anyhow::anyhow!("connection pool exhausted");
        let resp = classify(&fault);
        assert_eq!(resp.code, 500);
        assert_eq!(resp.message.as_deref(), Some("系统内部错误"));
    }

    #[test]
    fn test_classification_idempotent_up_to_timestamp() {
        let fault = anyhow::Error::new(BusinessError::with_code(650, "insufficient balance"));
        let first = classify(&fault);
        let second = classify(&fault);
        assert_eq!(first.code, second.code);
        assert_eq!(first.message, second.message);
        assert_eq!(first.data, second.data);
    }

    #[test]
    fn test_business_matched_before_generic_tail() {
        // A business fault must not degrade to the internal-error envelope.
        let fault = anyhow::Error::new(BusinessError::from_code(ResultCode::NotFound));
        let resp = classify(&fault);
        assert_eq!(resp.code, 404);
        assert_ne!(resp.message.as_deref(), Some("系统内部错误"));
    }

    #[test]
    fn test_app_error_renders_single_envelope() {
        let err = AppError::from(BusinessError::new("rejected"));
        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
