//! Validation Utilities

use validator::ValidationErrors;

use super::error::{AppError, FieldError};

/// Flatten validation errors into field errors, ordered by `field_order`.
///
/// Fields missing from `field_order` come last, by name.
pub fn field_errors(errors: &ValidationErrors, field_order: &[&str]) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            })
        })
        .collect();

    let rank = |field: &str| {
        field_order
            .iter()
            .position(|f| *f == field)
            .unwrap_or(field_order.len())
    };
    field_errors.sort_by(|a, b| {
        rank(a.field.as_str())
            .cmp(&rank(b.field.as_str()))
            .then_with(|| a.field.cmp(&b.field))
    });
    field_errors
}

/// Convert validation errors to AppError, naming the first violated field of
/// `field_order` in the message.
pub fn validation_error(errors: ValidationErrors, field_order: &[&str]) -> AppError {
    let field_errors = field_errors(&errors, field_order);

    let message = field_errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation {
        message,
        errors: field_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "name can't be empty"))]
        name: String,
        #[validate(email(message = "bad email"))]
        email: String,
    }

    const SIGNUP_FIELDS: &[&str] = &["name", "email"];

    #[test]
    fn test_field_errors_follow_declared_order() {
        let signup = Signup {
            name: String::new(),
            email: "nope".into(),
        };
        let errors = signup.validate().unwrap_err();

        let fields: Vec<String> = field_errors(&errors, SIGNUP_FIELDS)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["name", "email"]);
    }

    #[test]
    fn test_unlisted_fields_come_last() {
        let signup = Signup {
            name: String::new(),
            email: "nope".into(),
        };
        let errors = signup.validate().unwrap_err();

        let first = field_errors(&errors, &["email"]).remove(0);
        assert_eq!(first.field, "email");
    }

    #[test]
    fn test_validation_error_carries_fields() {
        let signup = Signup {
            name: String::new(),
            email: "nope".into(),
        };
        let err = validation_error(signup.validate().unwrap_err(), SIGNUP_FIELDS);

        match err {
            AppError::Validation { message, errors } => {
                assert_eq!(message, "name: name can't be empty");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
