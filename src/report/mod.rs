use std::collections::HashMap;

use crate::input::{InputError, is_missing};
use crate::mapping::MappingError;

pub mod text;

pub const TOP_RECURRENT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("non-numeric value '{value}' in column {column} (data row {row})")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
    #[error("column {0} has no numeric values")]
    EmptyColumn(String),
}

/// Distinct values in order of first appearance.
pub fn unique_in_order<'a, I>(values: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for v in values {
        if seen.insert(v) {
            out.push(v);
        }
    }
    out
}

/// Frequency ranking, highest count first. Equal counts keep the order in
/// which the values first appeared. At most `n` entries are returned.
pub fn top_recurrent<'a, I>(values: I, n: usize) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut slot: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for v in values {
        match slot.get(v) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                slot.insert(v, counts.len());
                counts.push((v, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

/// Mean of the present cells. Blank and NA-like cells are skipped; anything
/// else must parse to a finite number.
pub fn mean_of_column(column: &str, values: &[&str]) -> Result<f64, ReportError> {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for (row, raw) in values.iter().enumerate() {
        if is_missing(raw) {
            continue;
        }
        let v = raw.trim();
        let invalid = || ReportError::InvalidNumber {
            column: column.to_string(),
            row: row + 1,
            value: v.to_string(),
        };
        let parsed: f64 = v.parse().map_err(|_| invalid())?;
        if !parsed.is_finite() {
            return Err(invalid());
        }
        sum += parsed;
        count += 1;
    }
    if count == 0 {
        return Err(ReportError::EmptyColumn(column.to_string()));
    }
    Ok(sum / count as f64)
}

/// Two-decimal rounding, ties to even.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// Shortest round-trip representation in the style of Python's float repr:
/// `20.0`, `20.33`, and exponent form outside `[1e-4, 1e16)` (`1e+16`).
pub fn format_decimal(v: f64) -> String {
    let magnitude = v.abs();
    if v.is_finite() && v != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{:e}", v);
        if let Some((mantissa, exp)) = sci.split_once('e') {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            return format!("{}e{}{:0>2}", mantissa, sign, digits);
        }
        return sci;
    }
    let s = format!("{}", v);
    if v.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
