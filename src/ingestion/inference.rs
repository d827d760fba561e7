//! Column type inference.
//!
//! Both loaders first turn their input into untyped [`RawCell`]s plus a header row, then call
//! [`build_table`], which classifies each column with [`infer_column_type`] and converts the
//! cells into typed [`Value`]s.
//!
//! A cell is null when it is empty, when its text is empty after trimming, or when its trimmed
//! text is one of the [`NA_MARKERS`] (`NA`, `N/A`, `NaN`, `null`, ...).
//!
//! Rules, applied per column over its non-null cells:
//!
//! - `Bool` iff every cell is a boolean (`true`/`false` in any case, or a spreadsheet boolean)
//! - `Int64` iff every cell is an integer (text parsing as `i64`, or an integral number)
//! - `Float64` iff every cell is a finite number
//! - `Utf8` otherwise
//!
//! Spreadsheet dates and durations ([`RawCell::Temporal`]) are never numeric, so a date column
//! is `Utf8`. A column with no non-null cells is `Float64`, so it still counts as numeric.

use std::collections::{HashMap, HashSet};

use crate::types::{DataType, Field, Schema, Table, Value};

/// Text values read as missing, compared after trimming. Matching is case-sensitive.
pub const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// An untyped cell as read from the source, before inference.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
    /// A spreadsheet date, time or duration, already rendered as text.
    Temporal(String),
}

impl RawCell {
    fn is_null(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => is_na_text(s),
            _ => false,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            RawCell::Bool(b) => Some(*b),
            RawCell::Text(s) => parse_bool(s),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            RawCell::Int(i) => Some(*i),
            RawCell::Number(f) => integral_f64_to_i64(*f),
            RawCell::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            RawCell::Int(i) => Some(*i as f64),
            RawCell::Number(f) if f.is_finite() => Some(*f),
            RawCell::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    fn into_text(self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s,
            RawCell::Int(i) => i.to_string(),
            RawCell::Number(f) => match integral_f64_to_i64(f) {
                Some(i) => i.to_string(),
                None => f.to_string(),
            },
            RawCell::Bool(b) => b.to_string(),
            RawCell::Temporal(s) => s,
        }
    }
}

fn is_na_text(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || NA_MARKERS.contains(&t)
}

fn parse_bool(s: &str) -> Option<bool> {
    let t = s.trim();
    if t.eq_ignore_ascii_case("true") {
        Some(true)
    } else if t.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn integral_f64_to_i64(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it does not fit.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

/// Classify a column from its cells.
pub fn infer_column_type<'a, I>(cells: I) -> DataType
where
    I: IntoIterator<Item = &'a RawCell>,
{
    let mut all_bool = true;
    let mut all_int = true;
    let mut all_float = true;

    for cell in cells.into_iter().filter(|c| !c.is_null()) {
        all_bool &= cell.as_bool().is_some();
        all_int &= cell.as_i64().is_some();
        all_float &= cell.as_f64().is_some();
        if !(all_bool || all_float) {
            return DataType::Utf8;
        }
    }

    // An all-null column satisfies every rule; numeric wins.
    if all_int && all_bool {
        DataType::Float64
    } else if all_bool {
        DataType::Bool
    } else if all_int {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

fn convert_cell(cell: RawCell, data_type: DataType) -> Value {
    if cell.is_null() {
        return Value::Null;
    }
    // Inference guarantees the typed accessor succeeds for every non-null cell.
    match data_type {
        DataType::Bool => cell.as_bool().map(Value::Bool).unwrap_or(Value::Null),
        DataType::Int64 => cell.as_i64().map(Value::Int64).unwrap_or(Value::Null),
        DataType::Float64 => cell.as_f64().map(Value::Float64).unwrap_or(Value::Null),
        DataType::Utf8 => Value::Utf8(cell.into_text()),
    }
}

/// Make header names non-empty and unique.
///
/// An empty header becomes `Unnamed: {index}`; a repeated name gets a `.1`, `.2`, ... suffix.
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };

        let mut candidate = base.clone();
        while used.contains(&candidate) {
            let n = counts.entry(base.clone()).or_insert(0);
            *n += 1;
            candidate = format!("{base}.{n}");
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// Build a typed [`Table`] from a header row and untyped data rows.
///
/// Short rows are padded with nulls; cells past the header width are dropped.
pub fn build_table(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> Table {
    let names = normalize_headers(headers);
    let width = names.len();

    let rows: Vec<Vec<RawCell>> = rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, RawCell::Empty);
            row
        })
        .collect();

    let types: Vec<DataType> = (0..width)
        .map(|idx| infer_column_type(rows.iter().map(|r| &r[idx])))
        .collect();

    let values = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(types.iter())
                .map(|(cell, dt)| convert_cell(cell, *dt))
                .collect()
        })
        .collect();

    let fields = names
        .into_iter()
        .zip(types)
        .map(|(name, dt)| Field::new(name, dt))
        .collect();

    Table::new(Schema::new(fields), values)
}
