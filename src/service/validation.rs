//! Field validation shared by create and update payloads.

use crate::error::AppError;

/// Length bounds for a text column, counted in characters after trimming whitespace.
#[derive(Clone, Copy, Debug)]
pub struct TextRule {
    pub min_length: usize,
    pub max_length: usize,
}

pub const NAME: TextRule = TextRule {
    min_length: 1,
    max_length: 255,
};

pub const DESCRIPTION: TextRule = TextRule {
    min_length: 20,
    max_length: 1000,
};

pub struct RequestValidator;

impl RequestValidator {
    /// Missing and `null` both count as absent on create.
    pub fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
        value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
    }

    /// Check the trimmed `value` against `rule` and return the trimmed text.
    pub fn text(field: &str, value: String, rule: &TextRule) -> Result<String, AppError> {
        let value = value.trim();
        let len = value.chars().count();
        if len == 0 {
            return Err(AppError::Validation(format!("{} must not be blank", field)));
        }
        if len < rule.min_length {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                field, rule.min_length
            )));
        }
        if len > rule.max_length {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, rule.max_length
            )));
        }
        Ok(value.to_string())
    }

    pub fn required_text(field: &str, value: Option<String>, rule: &TextRule) -> Result<String, AppError> {
        Self::text(field, Self::required(field, value)?, rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn required_fields() {
        assert_eq!(RequestValidator::required("name", Some(1)).unwrap(), 1);
        let err = RequestValidator::required::<String>("name", None).unwrap_err();
        assert_eq!(message(err), "name is required");
    }

    #[test]
    fn text_bounds() {
        assert_eq!(
            RequestValidator::text("name", "Storm".into(), &NAME).unwrap(),
            "Storm"
        );
        let err = RequestValidator::text("name", "   ".into(), &NAME).unwrap_err();
        assert_eq!(message(err), "name must not be blank");

        let err = RequestValidator::text("description", "too short".into(), &DESCRIPTION).unwrap_err();
        assert_eq!(message(err), "description must be at least 20 characters");

        let err = RequestValidator::text("name", "x".repeat(256), &NAME).unwrap_err();
        assert_eq!(message(err), "name must be at most 255 characters");
    }

    #[test]
    fn text_is_stored_trimmed() {
        assert_eq!(
            RequestValidator::text("name", "  Storm \n".into(), &NAME).unwrap(),
            "Storm"
        );
        // 18 visible characters padded past 20 with spaces is still too short.
        let padded = format!("   {}   ", "a".repeat(18));
        let err = RequestValidator::text("description", padded, &DESCRIPTION).unwrap_err();
        assert_eq!(message(err), "description must be at least 20 characters");
    }
}
