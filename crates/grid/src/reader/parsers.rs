//! Conversions for individual JSON values in a model document
//!
//! Everything here works on borrowed `serde_json::Value` nodes and carries a
//! `field` path through purely for error reporting, e.g. `model_mask[3].x3`.

// crate modules
use crate::error::{Error, Result};

// layerview modules
use layerview_utils::f;

// external crates
use serde_json::Value;

/// Look up the positional key of an indexed object, e.g. `{"x3": [...]}`
///
/// The key is built from the element position, so element 3 must contain
/// `x3`. Any other key is not considered, even if it is the only one.
pub fn positional<'a>(node: &'a Value, prefix: char, index: usize, field: &str) -> Result<&'a Value> {
    let key = f!("{prefix}{index}");
    let object = node.as_object().ok_or_else(|| Error::UnexpectedType {
        field: field.to_string(),
        expected: "an object",
    })?;

    match object.get(&key) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(Error::MissingField {
            field: f!("{field}.{key}"),
        }),
    }
}

/// Borrow a node as a JSON array
pub fn array<'a>(node: &'a Value, field: &str) -> Result<&'a [Value]> {
    node.as_array()
        .map(|a| a.as_slice())
        .ok_or_else(|| Error::UnexpectedType {
            field: field.to_string(),
            expected: "an array",
        })
}

/// Convert a leaf to a mask value
///
/// - Integers must fit in an `i32`
/// - Floats are truncated toward zero
/// - Strings must contain an integer, surrounding whitespace is ignored
/// - Booleans are 1 and 0
pub fn mask_value(node: &Value, field: &str) -> Result<i32> {
    let value = match node {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                i32::try_from(v).ok()
            } else if let Some(v) = n.as_u64() {
                i32::try_from(v).ok()
            } else {
                n.as_f64().and_then(truncate_to_i32)
            }
        }
        Value::String(s) => s.trim().parse::<i32>().ok(),
        Value::Bool(b) => Some(i32::from(*b)),
        _ => None,
    };

    value.ok_or_else(|| Error::ValueConversion {
        field: field.to_string(),
        value: node.to_string(),
        target: "32-bit integer",
    })
}

/// Convert an axis entry to a finite coordinate
///
/// Plain numbers, numeric strings and booleans (as 1 and 0) are accepted.
pub fn coordinate(node: &Value, field: &str) -> Result<f64> {
    let value = match node {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    };

    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::ValueConversion {
            field: field.to_string(),
            value: node.to_string(),
            target: "finite float",
        })
}

/// Convert a whole array of axis entries
pub fn coordinates(nodes: &[Value], field: &str) -> Result<Vec<f64>> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| coordinate(node, &f!("{field}[{i}]")))
        .collect()
}

fn truncate_to_i32(value: f64) -> Option<i32> {
    let value = value.trunc();
    if value.is_finite() && value >= i32::MIN as f64 && value <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positional_key_lookup() {
        let node = json!({"x2": [1, 2, 3]});
        assert_eq!(positional(&node, 'x', 2, "model").unwrap(), &json!([1, 2, 3]));

        // the key has to match the position exactly
        let err = positional(&node, 'x', 1, "model[1]").unwrap_err();
        assert!(matches!(err, Error::MissingField { field } if field == "model[1].x1"));

        // explicit nulls count as missing
        let node = json!({"y0": null});
        assert!(positional(&node, 'y', 0, "row").is_err());

        // and the node must be an object at all
        let node = json!([1, 2]);
        assert!(matches!(
            positional(&node, 'x', 0, "model[0]"),
            Err(Error::UnexpectedType { .. })
        ));
    }

    #[test]
    fn mask_values() {
        assert_eq!(mask_value(&json!(3), "v").unwrap(), 3);
        assert_eq!(mask_value(&json!(-7), "v").unwrap(), -7);
        assert_eq!(mask_value(&json!(2.9), "v").unwrap(), 2);
        assert_eq!(mask_value(&json!(-2.9), "v").unwrap(), -2);
        assert_eq!(mask_value(&json!("12"), "v").unwrap(), 12);
        assert_eq!(mask_value(&json!(" 4 "), "v").unwrap(), 4);
        assert_eq!(mask_value(&json!(true), "v").unwrap(), 1);
        assert_eq!(mask_value(&json!(false), "v").unwrap(), 0);
    }

    #[test]
    fn mask_value_failures() {
        for node in [
            json!("1.5"),
            json!("abc"),
            json!(null),
            json!([1]),
            json!(4_000_000_000_u64),
            json!(1e20),
        ] {
            assert!(
                matches!(mask_value(&node, "v"), Err(Error::ValueConversion { .. })),
                "{node} should not convert"
            );
        }
    }

    #[test]
    fn coordinate_values() {
        assert_eq!(coordinate(&json!(1.25), "c").unwrap(), 1.25);
        assert_eq!(coordinate(&json!(10), "c").unwrap(), 10.0);
        assert_eq!(coordinate(&json!("0.5"), "c").unwrap(), 0.5);
        assert_eq!(coordinate(&json!("-3"), "c").unwrap(), -3.0);
        assert!(coordinate(&json!("inf"), "c").is_err());
        assert!(coordinate(&json!("NaN"), "c").is_err());
        assert_eq!(coordinate(&json!(false), "c").unwrap(), 0.0);
        assert_eq!(coordinate(&json!(true), "c").unwrap(), 1.0);
        assert!(coordinate(&json!(null), "c").is_err());
    }

    #[test]
    fn coordinate_arrays_report_position() {
        let nodes = vec![json!(0.0), json!("1.0"), json!("two")];
        let err = coordinates(&nodes, "output_axes.x_ax").unwrap_err();
        assert!(matches!(
            err,
            Error::ValueConversion { field, .. } if field == "output_axes.x_ax[2]"
        ));
    }
}
