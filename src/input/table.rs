use std::io::Read;

use crate::input::InputError;

/// Header plus rows of an SSM file. Every row holds exactly
/// `columns.len()` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsmTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SsmTable {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of the named column in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, InputError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| InputError::MissingColumn(name.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
            .collect())
    }
}

/// Cell spellings read as a missing value, following the pandas `read_csv`
/// defaults. Surrounding whitespace is ignored.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    let v = value.trim();
    MISSING_TOKENS.iter().any(|&t| t == v)
}

pub fn parse_ssm<R: Read>(reader: R, source: &str) -> Result<SsmTable, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(|e| csv_error(source, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if columns.is_empty() {
        return Err(InputError::Parse(format!("{source} is empty")));
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| csv_error(source, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(SsmTable { columns, rows })
}

fn csv_error(source: &str, err: csv::Error) -> InputError {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => InputError::Io(e),
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.map(|p| p.line()).unwrap_or(0);
            InputError::Parse(format!(
                "{source} line {line} has {len} fields, header has {expected_len}"
            ))
        }
        other => InputError::Parse(format!("{source}: {other:?}")),
    }
}
