//! Record splitting and cell interpretation.

use std::collections::HashMap;

use percolate_core::AttributeValue;

use crate::errors::{TableError, TableKind};

/// Interprets a raw cell as an edge attribute value.
///
/// Empty cells and the `NA` marker are missing values. Anything `f64` can
/// parse is a number, `true`/`false` (any case) is a flag, and everything
/// else is kept as text.
///
/// # Examples
/// ```
/// use percolate_core::AttributeValue;
/// use percolate_providers_tables::parse_cell;
///
/// assert_eq!(parse_cell(" 12.5 "), Some(AttributeValue::Number(12.5)));
/// assert_eq!(parse_cell("TRUE"), Some(AttributeValue::Flag(true)));
/// assert_eq!(parse_cell("motorway"), Some(AttributeValue::from("motorway")));
/// assert_eq!(parse_cell(""), None);
/// assert_eq!(parse_cell("NA"), None);
/// ```
#[must_use]
pub fn parse_cell(raw: &str) -> Option<AttributeValue> {
    let cell = raw.trim();
    if cell.is_empty() || cell == "NA" {
        return None;
    }
    if let Ok(number) = cell.parse::<f64>() {
        return Some(AttributeValue::Number(number));
    }
    if cell.eq_ignore_ascii_case("true") {
        return Some(AttributeValue::Flag(true));
    }
    if cell.eq_ignore_ascii_case("false") {
        return Some(AttributeValue::Flag(false));
    }
    Some(AttributeValue::from(cell))
}

/// Splits one record on `delimiter`, honouring double-quoted fields with
/// `""` escapes. Unquoted fields are trimmed.
pub(crate) fn split_record(
    line: &str,
    delimiter: char,
    table: TableKind,
    line_number: usize,
) -> Result<Vec<String>, TableError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if quoted {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => quoted = false,
                _ => current.push(ch),
            }
        } else if ch == delimiter {
            fields.push(finish_field(&mut current, was_quoted));
            was_quoted = false;
        } else if ch == '"' && current.trim().is_empty() {
            current.clear();
            quoted = true;
            was_quoted = true;
        } else {
            current.push(ch);
        }
    }
    if quoted {
        return Err(TableError::UnterminatedQuote {
            table,
            line: line_number,
        });
    }
    fields.push(finish_field(&mut current, was_quoted));
    Ok(fields)
}

fn finish_field(current: &mut String, was_quoted: bool) -> String {
    let field = std::mem::take(current);
    if was_quoted {
        field
    } else {
        field.trim().to_owned()
    }
}

/// Column names of a table and their positions.
#[derive(Debug)]
pub(crate) struct Header {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Header {
    pub(crate) fn new(columns: Vec<String>, table: TableKind) -> Result<Self, TableError> {
        let mut positions = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if positions.insert(column.clone(), position).is_some() {
                return Err(TableError::DuplicateColumn {
                    table,
                    column: column.clone(),
                });
            }
        }
        Ok(Self { columns, positions })
    }

    #[rustfmt::skip]
    pub(crate) fn len(&self) -> usize { self.columns.len() }

    pub(crate) fn columns(&self) -> impl Iterator<Item = (usize, &str)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(position, name)| (position, name.as_str()))
    }

    pub(crate) fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub(crate) fn require(&self, column: &'static str, table: TableKind) -> Result<usize, TableError> {
        self.position(column)
            .ok_or(TableError::MissingColumn { table, column })
    }
}
