//! Arrow column values to host row values.

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Decimal128Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use floe_common::error::{Error, Result};
use floe_store::{ColumnResolver, Value};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Default [`ColumnResolver`] mapping Arrow types onto host row values.
///
/// Unsigned integers widen to the next signed type; `UInt64` becomes a
/// scale-0 decimal. Timestamps normalize to microseconds and drop the zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostTypeResolver;

impl ColumnResolver for HostTypeResolver {
    fn resolve(&self, column: &dyn Array, row: usize) -> Result<Value> {
        if row >= column.len() {
            return Err(Error::Execution(format!("row {} out of bounds for column of length {}", row, column.len())));
        }
        if column.is_null(row) {
            return Ok(Value::Null);
        }

        let value = match column.data_type() {
            DataType::Null => Value::Null,
            DataType::Boolean => Value::Boolean(column.as_boolean().value(row)),
            DataType::Int8 => Value::Byte(column.as_primitive::<Int8Type>().value(row)),
            DataType::Int16 => Value::Short(column.as_primitive::<Int16Type>().value(row)),
            DataType::Int32 => Value::Int(column.as_primitive::<Int32Type>().value(row)),
            DataType::Int64 => Value::Long(column.as_primitive::<Int64Type>().value(row)),
            DataType::UInt8 => Value::Short(column.as_primitive::<UInt8Type>().value(row) as i16),
            DataType::UInt16 => Value::Int(column.as_primitive::<UInt16Type>().value(row) as i32),
            DataType::UInt32 => Value::Long(column.as_primitive::<UInt32Type>().value(row) as i64),
            DataType::UInt64 => Value::Decimal {
                value: column.as_primitive::<UInt64Type>().value(row) as i128,
                precision: 20,
                scale: 0,
            },
            DataType::Float32 => Value::Float(column.as_primitive::<Float32Type>().value(row)),
            DataType::Float64 => Value::Double(column.as_primitive::<Float64Type>().value(row)),
            DataType::Decimal128(precision, scale) => Value::Decimal {
                value: column.as_primitive::<Decimal128Type>().value(row),
                precision: *precision,
                scale: *scale,
            },
            DataType::Utf8 => Value::String(column.as_string::<i32>().value(row).to_string()),
            DataType::LargeUtf8 => Value::String(column.as_string::<i64>().value(row).to_string()),
            DataType::Utf8View => Value::String(column.as_string_view().value(row).to_string()),
            DataType::Binary => Value::Binary(column.as_binary::<i32>().value(row).to_vec()),
            DataType::LargeBinary => Value::Binary(column.as_binary::<i64>().value(row).to_vec()),
            DataType::FixedSizeBinary(_) => Value::Binary(column.as_fixed_size_binary().value(row).to_vec()),
            DataType::Date32 => Value::Date(column.as_primitive::<Date32Type>().value(row)),
            DataType::Date64 => {
                let millis = column.as_primitive::<Date64Type>().value(row);
                Value::Date(millis.div_euclid(MILLIS_PER_DAY) as i32)
            }
            DataType::Timestamp(unit, _) => Value::Timestamp(timestamp_micros(column, row, unit)),
            DataType::List(_) => self.resolve_list(column.as_list::<i32>().value(row).as_ref())?,
            DataType::LargeList(_) => self.resolve_list(column.as_list::<i64>().value(row).as_ref())?,
            other => return Err(Error::NotSupported(format!("column type {}", other))),
        };
        Ok(value)
    }
}

impl HostTypeResolver {
    fn resolve_list(&self, items: &dyn Array) -> Result<Value> {
        (0..items.len()).map(|i| self.resolve(items, i)).collect::<Result<Vec<_>>>().map(Value::List)
    }
}

fn timestamp_micros(column: &dyn Array, row: usize, unit: &TimeUnit) -> i64 {
    match unit {
        TimeUnit::Second => column.as_primitive::<TimestampSecondType>().value(row).saturating_mul(1_000_000),
        TimeUnit::Millisecond => column.as_primitive::<TimestampMillisecondType>().value(row).saturating_mul(1_000),
        TimeUnit::Microsecond => column.as_primitive::<TimestampMicrosecondType>().value(row),
        TimeUnit::Nanosecond => column.as_primitive::<TimestampNanosecondType>().value(row).div_euclid(1_000),
    }
}
