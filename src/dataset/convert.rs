//! Raw string to typed value conversion, shared by cell reads and row
//! materialization.

use crate::error::{ImateError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// A type a raw cell string can be converted into.
///
/// Integer and float targets fail with [`ImateError::Conversion`] on
/// unparsable input. `Decimal` instead yields `Ok(None)`, carrying over the
/// original service library's tolerance for malformed decimals. `String` is
/// identity. Anything without an impl is rejected at compile time.
pub trait FromCell: Sized {
    /// Target name used in conversion error messages
    const TARGET: &'static str;

    fn from_cell(raw: &str) -> Result<Option<Self>>;
}

macro_rules! numeric_from_cell {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromCell for $ty {
                const TARGET: &'static str = $name;

                fn from_cell(raw: &str) -> Result<Option<Self>> {
                    raw.trim()
                        .parse::<$ty>()
                        .map(Some)
                        .map_err(|_| ImateError::Conversion {
                            value: raw.to_string(),
                            target: $name,
                        })
                }
            }
        )*
    };
}

numeric_from_cell! {
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    f32 => "f32",
    f64 => "f64",
}

impl FromCell for String {
    const TARGET: &'static str = "String";

    fn from_cell(raw: &str) -> Result<Option<Self>> {
        Ok(Some(raw.to_string()))
    }
}

impl FromCell for Decimal {
    const TARGET: &'static str = "Decimal";

    // Tolerant by contract: a malformed decimal reads as no value.
    fn from_cell(raw: &str) -> Result<Option<Self>> {
        Ok(Decimal::from_str(raw.trim()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversion() {
        assert_eq!(i32::from_cell("42").unwrap(), Some(42));
        assert_eq!(i64::from_cell("-9000000000").unwrap(), Some(-9000000000));
        assert_eq!(i16::from_cell(" 7 ").unwrap(), Some(7));
    }

    #[test]
    fn test_integer_conversion_failure() {
        let err = i32::from_cell("abc").unwrap_err();
        match err {
            ImateError::Conversion { value, target } => {
                assert_eq!(value, "abc");
                assert_eq!(target, "i32");
            }
            other => panic!("Expected Conversion error, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_rejects_decimal_literal() {
        assert!(i32::from_cell("1.5").is_err());
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(f64::from_cell("3.25").unwrap(), Some(3.25));
        assert_eq!(f32::from_cell("-0.5").unwrap(), Some(-0.5));
    }

    #[test]
    fn test_float_conversion_failure() {
        assert!(f64::from_cell("abc").is_err());
    }

    #[test]
    fn test_string_is_identity() {
        assert_eq!(
            String::from_cell("  as-is ").unwrap(),
            Some("  as-is ".to_string())
        );
    }

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(
            Decimal::from_cell("12.345").unwrap(),
            Some(Decimal::from_str("12.345").unwrap())
        );
    }

    #[test]
    fn test_decimal_failure_is_none_not_error() {
        // Documented asymmetry with the integer/float paths
        assert_eq!(Decimal::from_cell("abc").unwrap(), None);
    }
}
