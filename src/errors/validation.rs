//! Client-input fault types surfaced through the classifier.
//!
//! Field-level detail is aggregated into a single message joined with `", "`,
//! preserving the order in which the validation engine reported the errors.

/// Delimiter between aggregated field-error messages
const MESSAGE_DELIMITER: &str = ", ";

fn join_messages<S: AsRef<str>>(messages: &[S]) -> String {
    messages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(MESSAGE_DELIMITER)
}

fn join_field_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(MESSAGE_DELIMITER)
}

/// A single field-level validation failure
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Request-body validation failed
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", join_field_messages(.errors))]
pub struct PayloadValidationError {
    errors: Vec<FieldError>,
}

impl PayloadValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl From<validator::ValidationErrors> for PayloadValidationError {
    fn from(source: validator::ValidationErrors) -> Self {
        let errors = source
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                    FieldError::new(field, message)
                })
            })
            .collect();
        Self { errors }
    }
}

/// Request parameters could not be bound (malformed query string or body)
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", join_messages(.errors))]
pub struct BindingError {
    errors: Vec<String>,
}

impl BindingError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

/// Method-level constraint check failed
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", join_messages(.violations))]
pub struct ConstraintViolationError {
    violations: Vec<String>,
}

impl ConstraintViolationError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }

    pub fn single(violation: impl Into<String>) -> Self {
        Self {
            violations: vec![violation.into()],
        }
    }
}

/// Argument had the wrong type.
///
/// The detail names deserializer internals, so it is logged but never
/// returned to the caller.
#[derive(Debug, Clone, thiserror::Error)]
#[error("parameter '{parameter}' has the wrong type: {detail}")]
pub struct TypeMismatchError {
    pub parameter: String,
    pub detail: String,
}

impl TypeMismatchError {
    pub fn new(parameter: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            detail: detail.into(),
        }
    }
}

/// Programmer-raised precondition violation; the message is caller-visible
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct InvalidArgumentError(pub String);

impl InvalidArgumentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_field_errors_joined_in_order() {
        let err = PayloadValidationError::new(vec![
            FieldError::new("name", "name required"),
            FieldError::new("age", "age must be positive"),
        ]);
        assert_eq!(err.to_string(), "name required, age must be positive");
    }

    #[test]
    fn test_single_field_error() {
        let err = PayloadValidationError::new(vec![FieldError::new("name", "name required")]);
        assert_eq!(err.to_string(), "name required");
    }

    #[test]
    fn test_from_validation_engine() {
        #[derive(Validate)]
        struct Payload {
            #[validate(length(min = 1, message = "name required"))]
            name: String,
        }

        let payload = Payload {
            name: String::new(),
        };
        let err = PayloadValidationError::from(payload.validate().unwrap_err());
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].field, "name");
        assert_eq!(err.to_string(), "name required");
    }

    #[test]
    fn test_binding_errors_joined() {
        let err = BindingError::new(vec!["page must be a number".to_string()]);
        assert_eq!(err.to_string(), "page must be a number");
    }

    #[test]
    fn test_constraint_violations_joined() {
        let err = ConstraintViolationError::new(vec![
            "amount must be positive".to_string(),
            "amount must not exceed the daily limit".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "amount must be positive, amount must not exceed the daily limit"
        );
    }

    #[test]
    fn test_type_mismatch_display_carries_detail_for_logs() {
        let err = TypeMismatchError::new("id", "invalid digit found in string");
        assert!(err.to_string().contains("id"));
        assert!(err.to_string().contains("invalid digit"));
    }
}
