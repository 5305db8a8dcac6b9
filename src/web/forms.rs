//! Form field parsing and input validation.

use std::fmt;

use serde::Deserialize;

/// Raw calculator form fields as submitted.
///
/// Fields stay as strings here so that locale-normalized decimal parsing is
/// an explicit step rather than a deserializer side effect.
#[derive(Debug, Default, Deserialize)]
pub struct CalculatorForm {
    pub voltage: Option<String>,
    pub current: Option<String>,
    pub rate: Option<String>,
}

/// Parsed numeric inputs for one calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorInput {
    /// Supply voltage (V).
    pub voltage: f64,
    /// Load current (A).
    pub current: f64,
    /// Tariff rate in currency subunits per kWh.
    pub rate_subunits: f64,
}

/// Error for a submission where voltage, current, or rate is not strictly
/// positive. The one user-facing error of the whole system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidInput;

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Please enter positive numbers for Voltage, Current and Rate."
        )
    }
}

impl std::error::Error for InvalidInput {}

impl CalculatorInput {
    /// Parses the three fields, defaulting each to 0.0 when absent or
    /// unparseable.
    pub fn from_form(form: &CalculatorForm) -> Self {
        Self {
            voltage: parse_decimal(form.voltage.as_deref(), 0.0),
            current: parse_decimal(form.current.as_deref(), 0.0),
            rate_subunits: parse_decimal(form.rate.as_deref(), 0.0),
        }
    }

    /// Checks that all three inputs are strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any field is zero, negative, or NaN; no
    /// computation may happen in that case.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.voltage > 0.0 && self.current > 0.0 && self.rate_subunits > 0.0 {
            Ok(())
        } else {
            Err(InvalidInput)
        }
    }
}

/// Parses a decimal field accepting either `,` or `.` as the separator.
///
/// Mirrors lenient form-input coercion: leading/trailing whitespace is
/// ignored and the longest leading numeric prefix is taken, so `"12abc"`
/// parses as 12.0. Absent input or input with no numeric prefix yields
/// `default`.
pub fn parse_decimal(raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    let normalized = raw.trim().replace(',', ".");

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in normalized.char_indices() {
        match c {
            '+' | '-' if i == 0 => end = i + 1,
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return default;
    }
    normalized[..end].parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(voltage: &str, current: &str, rate: &str) -> CalculatorForm {
        CalculatorForm {
            voltage: Some(voltage.to_string()),
            current: Some(current.to_string()),
            rate: Some(rate.to_string()),
        }
    }

    #[test]
    fn parses_period_decimal() {
        assert_eq!(parse_decimal(Some("21.8"), 0.0), 21.8);
    }

    #[test]
    fn parses_comma_decimal() {
        assert_eq!(parse_decimal(Some("21,8"), 0.0), 21.8);
    }

    #[test]
    fn absent_field_uses_default() {
        assert_eq!(parse_decimal(None, 0.0), 0.0);
        assert_eq!(parse_decimal(None, 1.5), 1.5);
    }

    #[test]
    fn junk_uses_default() {
        assert_eq!(parse_decimal(Some("abc"), 0.0), 0.0);
        assert_eq!(parse_decimal(Some(""), 0.0), 0.0);
        assert_eq!(parse_decimal(Some("."), 0.0), 0.0);
        assert_eq!(parse_decimal(Some("-"), 0.0), 0.0);
    }

    #[test]
    fn numeric_prefix_parses() {
        assert_eq!(parse_decimal(Some("12abc"), 0.0), 12.0);
        assert_eq!(parse_decimal(Some("3.5V"), 0.0), 3.5);
        assert_eq!(parse_decimal(Some("-2,5 A"), 0.0), -2.5);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(parse_decimal(Some("  230  "), 0.0), 230.0);
    }

    #[test]
    fn from_form_parses_all_fields() {
        let input = CalculatorInput::from_form(&form("230", "10", "21,8"));
        assert_eq!(input.voltage, 230.0);
        assert_eq!(input.current, 10.0);
        assert_eq!(input.rate_subunits, 21.8);
    }

    #[test]
    fn empty_form_defaults_to_zero() {
        let input = CalculatorInput::from_form(&CalculatorForm::default());
        assert_eq!(input.voltage, 0.0);
        assert_eq!(input.current, 0.0);
        assert_eq!(input.rate_subunits, 0.0);
    }

    #[test]
    fn positive_inputs_validate() {
        let input = CalculatorInput::from_form(&form("230", "10", "21.8"));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn zero_or_negative_inputs_rejected() {
        for (v, c, r) in [
            ("0", "10", "21.8"),
            ("230", "0", "21.8"),
            ("230", "10", "0"),
            ("-230", "10", "21.8"),
            ("230", "-1", "21.8"),
            ("230", "10", "-21.8"),
        ] {
            let input = CalculatorInput::from_form(&form(v, c, r));
            assert_eq!(input.validate(), Err(InvalidInput), "inputs {v}/{c}/{r}");
        }
    }

    #[test]
    fn error_message_names_all_fields() {
        let msg = InvalidInput.to_string();
        assert!(msg.contains("Voltage"));
        assert!(msg.contains("Current"));
        assert!(msg.contains("Rate"));
    }
}
