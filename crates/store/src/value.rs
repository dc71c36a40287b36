//! Row values as seen by the host engine.

use std::fmt;

use arrow::array::Array;
use floe_common::error::Result;

/// A single column value of a materialized row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal { value: i128, precision: u8, scale: i8 },
    String(String),
    Binary(Vec<u8>),
    /// Days since the Unix epoch.
    Date(i32),
    /// Microseconds since the Unix epoch.
    Timestamp(i64),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Decimal { value, scale, .. } => {
                if *scale <= 0 {
                    let zeros = scale.unsigned_abs() as usize;
                    return match 10i128.checked_pow(zeros as u32).and_then(|m| value.checked_mul(m)) {
                        Some(scaled) => write!(f, "{}", scaled),
                        None if *value == 0 => write!(f, "0"),
                        None => write!(f, "{}{}", value, "0".repeat(zeros)),
                    };
                }
                let divisor = 10i128.pow(*scale as u32);
                let sign = if *value < 0 { "-" } else { "" };
                let abs = value.unsigned_abs();
                let divisor = divisor as u128;
                write!(f, "{}{}.{:0width$}", sign, abs / divisor, abs % divisor, width = *scale as usize)
            }
            Value::String(v) => write!(f, "{}", v),
            Value::Binary(v) => {
                for byte in v {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::Date(v) => write!(f, "{}", v),
            Value::Timestamp(v) => write!(f, "{}", v),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Translates one cell of a columnar accessor into the host's [`Value`].
///
/// One resolver instance is shared by every batch a reader iterates.
pub trait ColumnResolver: Send + Sync + fmt::Debug {
    fn resolve(&self, column: &dyn Array, row: usize) -> Result<Value>;
}
