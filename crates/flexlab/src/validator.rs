//! Input validation for attribute text fields.
//!
//! Each editable text field of a [`FlexItemAttributes`](crate::FlexItemAttributes)
//! has a validator that decides, per keystroke, whether the raw text is an
//! acceptable final value for that field. Validators are pure: they inspect
//! the text and return a verdict, nothing else. Empty or unparsable input is
//! invalid; it blocks the commit but never raises an error.
//!
//! # Built-in Validators
//!
//! - [`IntegerValidator`]: any signed integer (the `order` field)
//! - [`NonNegativeDecimalValidator`]: non-negative decimals (`flex_grow`, `flex_shrink`)
//! - [`DimensionValidator`]: a length or one of the two size sentinels (`width`, `height`)
//! - [`FixedDimensionValidator`]: a plain length, no sentinels (min/max constraints)
//! - [`FlexBasisPercentValidator`]: the unset sentinel or a whole percentage

/// Trait for input validators.
///
/// Validators check whether input text is a valid final value according to
/// some criteria. They can be attached to text input widgets to provide
/// real-time validation.
pub trait Validator: Send + Sync {
    /// Validate the input string.
    ///
    /// Returns `true` when the text parses to a value inside the field's
    /// domain. Empty input is never valid.
    fn validate(&self, input: &str) -> bool;
}

// Allow using &dyn Validator / Box<dyn Validator> as a Validator
impl<V: Validator + ?Sized> Validator for &V {
    fn validate(&self, input: &str) -> bool {
        (**self).validate(input)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, input: &str) -> bool {
        (**self).validate(input)
    }
}

/// `true` when `input` is a plain run of ASCII digits that fits in an `i32`.
fn is_non_negative_integer(input: &str) -> bool {
    !input.is_empty()
        && input.bytes().all(|b| b.is_ascii_digit())
        && input.parse::<i32>().is_ok()
}

/// Validator for signed integer input.
///
/// Accepts an optional leading `-` followed by ASCII digits; the value must
/// fit in an `i32`. Used for the `order` field, which may be negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerValidator;

impl Validator for IntegerValidator {
    fn validate(&self, input: &str) -> bool {
        let digits = input.strip_prefix('-').unwrap_or(input);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        // Format is right; reject only on overflow.
        input.parse::<i32>().is_ok()
    }
}

/// Validator for non-negative decimal input.
///
/// Accepts ASCII digits with at most one decimal point and no sign. Used for
/// the `flex_grow` and `flex_shrink` factors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonNegativeDecimalValidator;

impl Validator for NonNegativeDecimalValidator {
    fn validate(&self, input: &str) -> bool {
        let mut has_dot = false;
        let mut has_digit = false;
        for c in input.chars() {
            if c.is_ascii_digit() {
                has_digit = true;
            } else if c == '.' && !has_dot {
                has_dot = true;
            } else {
                return false;
            }
        }
        has_digit && input.parse::<f32>().is_ok_and(|v| v.is_finite())
    }
}

/// Validator for `width`/`height` input.
///
/// Accepts the two size sentinels (`-1` match-parent, `-2` wrap-content) or
/// any non-negative integer length.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionValidator;

impl Validator for DimensionValidator {
    fn validate(&self, input: &str) -> bool {
        matches!(input, "-1" | "-2") || is_non_negative_integer(input)
    }
}

/// Validator for the min/max size constraints.
///
/// Accepts only a non-negative integer length; the size sentinels are not
/// meaningful for constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDimensionValidator;

impl Validator for FixedDimensionValidator {
    fn validate(&self, input: &str) -> bool {
        is_non_negative_integer(input)
    }
}

/// Validator for the flex basis percentage.
///
/// Accepts `-1` (the unset sentinel) or a non-negative whole percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexBasisPercentValidator;

impl Validator for FlexBasisPercentValidator {
    fn validate(&self, input: &str) -> bool {
        input == "-1" || is_non_negative_integer(input)
    }
}
