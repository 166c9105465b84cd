//! Evaluation of validation attributes against values.
//!
//! Each rule follows the behavior of its DataAnnotations counterpart: null values pass every
//! rule except `Required`, and a rule applied to a value of the wrong shape fails with an error
//! (not a validation failure) so that the caller can report it as an unexpected failure.

use crate::{
    metadata::{
        customattributes::{ValidationAttribute, ValidationRule},
        instance::Value,
    },
    validation::{ValidationContext, ValidationFailure},
    BoxError,
};

const REQUIRED_MESSAGE: &str = "The {0} field is required.";
const STRING_LENGTH_MESSAGE: &str = "The field {0} must be a string with a maximum length of {1}.";
const STRING_LENGTH_INCLUDING_MINIMUM_MESSAGE: &str =
    "The field {0} must be a string with a minimum length of {2} and a maximum length of {1}.";
const MAX_LENGTH_MESSAGE: &str =
    "The field {0} must be a string or array type with a maximum length of '{1}'.";
const MIN_LENGTH_MESSAGE: &str =
    "The field {0} must be a string or array type with a minimum length of '{1}'.";
const REGEX_MESSAGE: &str = "The field {0} must match the regular expression '{1}'.";
const RANGE_MESSAGE: &str = "The field {0} must be between {1} and {2}.";
const CUSTOM_MESSAGE: &str = "{0} is not valid.";

/// Substitutes `{0}`, `{1}`, ... in `template` with `args` in a single pass, so placeholders
/// inside the arguments are left alone. Unknown placeholders are kept verbatim.
fn format_message(template: &str, args: &[&str]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        message.push_str(&rest[..start]);
        let placeholder = &rest[start..];

        let arg = placeholder.find('}').and_then(|end| {
            let index = placeholder[1..end].parse::<usize>().ok()?;
            Some((args.get(index)?, end))
        });
        match arg {
            Some((arg, end)) => {
                message.push_str(arg);
                rest = &placeholder[end + 1..];
            }
            None => {
                message.push('{');
                rest = &placeholder[1..];
            }
        }
    }

    message.push_str(rest);
    message
}

fn cast_error(value: &Value, target: &str) -> BoxError {
    let source = match value {
        Value::Null => "null",
        Value::Bool(_) => "System.Boolean",
        Value::Int(_) => "System.Int64",
        Value::Float(_) => "System.Double",
        Value::String(_) => "System.String",
        Value::Bytes(_) => "System.Byte[]",
        Value::Object(instance) => instance.type_name(),
        Value::Collection(_) => "System.Collections.Generic.ICollection",
    };

    format!("Unable to cast object of type '{source}' to type '{target}'.").into()
}

fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(value) => Some(value.chars().count()),
        Value::Bytes(value) => Some(value.len()),
        Value::Collection(items) => Some(items.len()),
        _ => None,
    }
}

impl ValidationAttribute {
    /// Returns `true` if `value` satisfies the rule.
    ///
    /// # Errors
    /// Returns an error if the rule cannot be applied to the value, or if a custom routine fails.
    pub fn is_valid(
        &self,
        value: &Value,
        context: &ValidationContext,
    ) -> std::result::Result<bool, BoxError> {
        Ok(self.validation_result(value, context)?.is_none())
    }

    /// Evaluates the rule, returning the failure when `value` does not satisfy it.
    ///
    /// # Errors
    /// Returns an error if the rule cannot be applied to the value, or if a custom routine fails.
    pub fn validation_result(
        &self,
        value: &Value,
        context: &ValidationContext,
    ) -> std::result::Result<Option<ValidationFailure>, BoxError> {
        let display_name = context.display_name.as_str();

        let valid = match &self.rule {
            ValidationRule::Required {
                allow_empty_strings,
            } => match value {
                Value::Null => false,
                Value::String(value) => *allow_empty_strings || !value.trim().is_empty(),
                _ => true,
            },
            ValidationRule::StringLength { maximum, minimum } => match value {
                Value::Null => true,
                Value::String(value) => {
                    let length = value.chars().count();
                    length >= *minimum && length <= *maximum
                }
                other => return Err(cast_error(other, "System.String")),
            },
            ValidationRule::MaxLength(limit) => {
                if *limit == Some(0) {
                    return Err(
                        "MaxLengthAttribute must have a Length value that is greater than zero. Use MaxLength() without parameters to indicate that the string or array can have the maximum allowable length."
                            .into(),
                    );
                }

                match value {
                    Value::Null => true,
                    other => {
                        let length =
                            value_length(other).ok_or_else(|| cast_error(other, "System.Array"))?;
                        limit.map_or(true, |limit| length <= limit)
                    }
                }
            }
            ValidationRule::MinLength(limit) => match value {
                Value::Null => true,
                other => {
                    let length =
                        value_length(other).ok_or_else(|| cast_error(other, "System.Array"))?;
                    length >= *limit
                }
            },
            ValidationRule::RegularExpression(rule) => {
                let Some(regex) = rule.regex() else {
                    return Err(format!(
                        "The pattern '{}' is not a valid regular expression.",
                        rule.pattern
                    )
                    .into());
                };

                match value {
                    Value::Null => true,
                    other => {
                        let text = other.to_string();
                        text.is_empty() || regex.is_match(&text)
                    }
                }
            }
            ValidationRule::Range { minimum, maximum } => {
                let number = match value {
                    Value::Null => None,
                    Value::String(text) => Some(
                        text.trim()
                            .parse::<f64>()
                            .map_err(|_| cast_error(value, "System.Double"))?,
                    ),
                    other => Some(other.as_f64().ok_or_else(|| cast_error(other, "System.Double"))?),
                };

                number.map_or(true, |number| number >= *minimum && number <= *maximum)
            }
            ValidationRule::CustomValidation(custom) => {
                return Ok((custom.func)(value, context)?.map(|mut failure| {
                    if failure.message.is_empty() {
                        failure.message = self.format_error_message(display_name);
                    }
                    failure
                }));
            }
        };

        Ok((!valid).then(|| ValidationFailure::new(self.format_error_message(display_name))))
    }

    /// Formats the error message of this attribute for the given display name
    #[must_use]
    pub fn format_error_message(&self, display_name: &str) -> String {
        let (default_template, first, second) = match &self.rule {
            ValidationRule::Required { .. } => (REQUIRED_MESSAGE, String::new(), String::new()),
            ValidationRule::StringLength { maximum, minimum } => (
                if *minimum == 0 {
                    STRING_LENGTH_MESSAGE
                } else {
                    STRING_LENGTH_INCLUDING_MINIMUM_MESSAGE
                },
                maximum.to_string(),
                minimum.to_string(),
            ),
            ValidationRule::MaxLength(limit) => (
                MAX_LENGTH_MESSAGE,
                limit.map_or_else(|| "-1".to_string(), |limit| limit.to_string()),
                String::new(),
            ),
            ValidationRule::MinLength(limit) => {
                (MIN_LENGTH_MESSAGE, limit.to_string(), String::new())
            }
            ValidationRule::RegularExpression(rule) => {
                (REGEX_MESSAGE, rule.pattern.clone(), String::new())
            }
            ValidationRule::Range { minimum, maximum } => {
                (RANGE_MESSAGE, minimum.to_string(), maximum.to_string())
            }
            ValidationRule::CustomValidation(_) => (CUSTOM_MESSAGE, String::new(), String::new()),
        };

        let template = self.error_message.as_deref().unwrap_or(default_template);
        format_message(template, &[display_name, &first, &second])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::instance::Instance;

    fn context(display_name: &str) -> ValidationContext {
        ValidationContext::new("Entity", display_name, Some(display_name.to_string()))
    }

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
        assert_eq!(format_message("no args", &["a"]), "no args");
        assert_eq!(format_message("{0} {7} {x", &["a"]), "a {7} {x");
        assert_eq!(
            format_message(RANGE_MESSAGE, &["Seats {1}", "1", "9"]),
            "The field Seats {1} must be between 1 and 9."
        );
    }

    #[test]
    fn test_required() {
        let attribute = ValidationAttribute::required();
        let ctx = context("Name");

        assert!(!attribute.is_valid(&Value::Null, &ctx).unwrap());
        assert!(!attribute.is_valid(&Value::from("  "), &ctx).unwrap());
        assert!(attribute.is_valid(&Value::from("abc"), &ctx).unwrap());
        assert!(attribute.is_valid(&Value::from(0), &ctx).unwrap());

        let failure = attribute.validation_result(&Value::Null, &ctx).unwrap().unwrap();
        assert_eq!(failure.message, "The Name field is required.");

        let permissive = ValidationAttribute::new(ValidationRule::Required {
            allow_empty_strings: true,
        });
        assert!(permissive.is_valid(&Value::from(""), &ctx).unwrap());
    }

    #[test]
    fn test_string_length() {
        let attribute = ValidationAttribute::string_length(10);
        let ctx = context("Name");

        assert!(attribute.is_valid(&Value::from("abc"), &ctx).unwrap());
        assert!(attribute.is_valid(&Value::Null, &ctx).unwrap());

        let failure = attribute
            .validation_result(&Value::from("abcdefghijklmnopq"), &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(
            failure.message,
            "The field Name must be a string with a maximum length of 10."
        );

        assert!(attribute.is_valid(&Value::from(1), &ctx).is_err());
    }

    #[test]
    fn test_string_length_with_minimum() {
        let attribute = ValidationAttribute::new(ValidationRule::StringLength {
            maximum: 5,
            minimum: 2,
        });
        let failure = attribute
            .validation_result(&Value::from("a"), &context("Code"))
            .unwrap()
            .unwrap();
        assert_eq!(
            failure.message,
            "The field Code must be a string with a minimum length of 2 and a maximum length of 5."
        );
    }

    #[test]
    fn test_max_and_min_length() {
        let ctx = context("Data");

        let max = ValidationAttribute::max_length(Some(3));
        assert!(max.is_valid(&Value::from(vec![1u8, 2, 3]), &ctx).unwrap());
        assert!(!max.is_valid(&Value::from("abcd"), &ctx).unwrap());
        assert_eq!(
            max.format_error_message("Data"),
            "The field Data must be a string or array type with a maximum length of '3'."
        );

        let unbounded = ValidationAttribute::max_length(None);
        assert!(unbounded.is_valid(&Value::from("a".repeat(10_000)), &ctx).unwrap());

        assert!(ValidationAttribute::max_length(Some(0))
            .is_valid(&Value::from("a"), &ctx)
            .is_err());

        let min = ValidationAttribute::min_length(2);
        assert!(!min.is_valid(&Value::from("a"), &ctx).unwrap());
        assert!(min.is_valid(&Value::Null, &ctx).unwrap());
        assert!(min.is_valid(&Value::from(true), &ctx).is_err());
    }

    #[test]
    fn test_regular_expression() {
        let attribute = ValidationAttribute::regular_expression("^[A-Z]{3}$");
        let ctx = context("Departure.Airport.AirportCode");

        assert!(attribute.is_valid(&Value::from("YVR"), &ctx).unwrap());
        assert!(attribute.is_valid(&Value::Null, &ctx).unwrap());
        assert!(attribute.is_valid(&Value::from(""), &ctx).unwrap());

        let failure = attribute
            .validation_result(&Value::from("???"), &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(
            failure.message,
            "The field Departure.Airport.AirportCode must match the regular expression '^[A-Z]{3}$'."
        );

        // Partial matches are not enough
        let digits = ValidationAttribute::regular_expression(r"\d{4}");
        assert!(!digits.is_valid(&Value::from("QF0006"), &ctx).unwrap());
        assert!(digits.is_valid(&Value::from(1234), &ctx).unwrap());

        let broken = ValidationAttribute::regular_expression("([A-Z");
        assert!(broken.is_valid(&Value::from("A"), &ctx).is_err());
    }

    #[test]
    fn test_range() {
        let attribute = ValidationAttribute::range(1.0, 10.0);
        let ctx = context("Seats");

        assert!(attribute.is_valid(&Value::from(5), &ctx).unwrap());
        assert!(attribute.is_valid(&Value::from("7"), &ctx).unwrap());
        assert!(!attribute.is_valid(&Value::from(11.5), &ctx).unwrap());
        assert!(attribute.is_valid(&Value::from("seven"), &ctx).is_err());
        assert_eq!(
            attribute.format_error_message("Seats"),
            "The field Seats must be between 1 and 10."
        );
    }

    #[test]
    fn test_custom_validation() {
        let attribute = ValidationAttribute::custom("AirportDetails", "ValidateCountry", |value, _| {
            let airport = value.as_object().ok_or("expected AirportDetails")?;
            Ok((airport.get("CountryCode") == Value::from("ZZ")).then(|| {
                ValidationFailure::new(format!(
                    "City '{}' is not located in country 'ZZ'.",
                    airport.get("CityCode")
                ))
            }))
        });
        let ctx = context("Airport");

        let airport = Instance::new("AirportDetails");
        airport.set("CityCode", "YVR");
        airport.set("CountryCode", "ZZ");

        let failure = attribute
            .validation_result(&Value::Object(airport), &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(failure.message, "City 'YVR' is not located in country 'ZZ'.");
        assert_eq!(attribute.type_name(), "CustomValidationAttribute");

        assert!(attribute.validation_result(&Value::from(1), &ctx).is_err());
    }

    #[test]
    fn test_custom_error_message() {
        let attribute = ValidationAttribute::required().with_error_message("{0} is mandatory");
        let failure = attribute
            .validation_result(&Value::Null, &context("FlightNumber"))
            .unwrap()
            .unwrap();
        assert_eq!(failure.message, "FlightNumber is mandatory");
    }
}
