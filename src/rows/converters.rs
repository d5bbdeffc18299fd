use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde_json::{Value, json};

use crate::excel::{Cell, CellType, DataTypeInfo};

// Excel serials count days from 1900-01-00 and include the phantom 1900-02-29
pub fn excel_date_to_iso_string(excel_date: f64) -> String {
    let days = if excel_date > 59.0 {
        excel_date - 1.0
    } else {
        excel_date
    };

    let Some(base_date) = NaiveDate::from_ymd_opt(1900, 1, 1) else {
        return excel_date.to_string();
    };
    let whole_days = days.trunc() as i64;
    let fractional_day = days.fract();

    let Some(date) = TimeDelta::try_days(whole_days.saturating_sub(1))
        .and_then(|offset| base_date.checked_add_signed(offset))
    else {
        return excel_date.to_string();
    };

    if fractional_day > 0.0 {
        let seconds = (fractional_day * 86_400.0).round() as u32;
        if let Some(time) = NaiveTime::from_hms_opt(seconds / 3600, (seconds % 3600) / 60, seconds % 60) {
            return NaiveDateTime::new(date, time)
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string();
        }
    }

    date.format("%Y-%m-%d").to_string()
}

fn number_value(num: f64) -> Value {
    if num.fract() == 0.0 && num.abs() < 1e15 {
        json!(num.trunc() as i64)
    } else {
        json!(num)
    }
}

/// Converts a loaded cell into the JSON scalar served for it. Empty cells map
/// to `Value::Null`; callers decide whether to omit or pad them.
pub fn process_cell_value(cell: &Cell) -> Value {
    if cell.value.is_empty() {
        return Value::Null;
    }

    match &cell.original_type {
        Some(DataTypeInfo::Float(f)) => number_value(*f),
        Some(DataTypeInfo::Int(i)) => json!(i),
        Some(DataTypeInfo::DateTime(dt)) if *dt >= 0.0 => json!(excel_date_to_iso_string(*dt)),
        Some(DataTypeInfo::DateTimeIso(s)) => json!(s),
        Some(DataTypeInfo::Bool(b)) => json!(b),
        Some(DataTypeInfo::Empty) => Value::Null,
        Some(_) => json!(cell.value),
        None => match cell.cell_type {
            CellType::Number => cell
                .value
                .parse::<f64>()
                .map_or_else(|_| json!(cell.value), number_value),
            CellType::Boolean => match cell.value.to_lowercase().as_str() {
                "true" => json!(true),
                "false" => json!(false),
                _ => json!(cell.value),
            },
            CellType::Empty => Value::Null,
            CellType::Text | CellType::Date => json!(cell.value),
        },
    }
}
