//! CSV encoding and decoding for registration documents.
//!
//! Escaping follows the RFC 4180 convention: a field containing a comma, a
//! double quote, or a newline is wrapped in double quotes, with internal
//! double quotes doubled. Every other field is emitted verbatim, so an empty
//! field serializes to zero characters.

use std::borrow::Cow;
use thiserror::Error;

/// Structural failure while reading a CSV document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("Malformed document: expected at least a header line")]
    MalformedDocument,
}

/// Escapes a single field for inclusion in a CSV row.
pub fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Encodes one row: each field escaped independently, joined with commas.
///
/// No line terminator is appended.
pub fn encode_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| escape(field.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Encodes a full document: the header line exactly once, then one line per
/// row in the given order, each terminated by a single `\n`.
pub fn encode_document<I, R, S>(header: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut document = encode_row(header.iter().copied());
    document.push('\n');
    for row in rows {
        document.push_str(&encode_row(row));
        document.push('\n');
    }
    document
}

/// Returns the number of data rows in a document: physical lines minus the
/// header line.
///
/// A header-only document has zero rows. An empty document (zero lines) is
/// malformed. Note this is a physical line count; a quoted newline inside a
/// field inflates it.
pub fn count_rows(document: &str) -> Result<usize, CsvError> {
    let lines = document.trim_end().lines().count();
    if lines == 0 {
        return Err(CsvError::MalformedDocument);
    }
    Ok(lines - 1)
}

/// Returns the first line of a document verbatim.
pub fn header(document: &str) -> Result<&str, CsvError> {
    document.lines().next().ok_or(CsvError::MalformedDocument)
}

/// Splits one logical row on top-level commas and undoes field escaping.
pub fn decode_row(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // A doubled quote inside a quoted field is a literal quote.
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

/// Decodes a whole document into rows of field values, header row first.
///
/// Rows are separated on unquoted newlines, so fields containing quoted
/// newlines survive the round trip.
pub fn decode_document(document: &str) -> Result<Vec<Vec<String>>, CsvError> {
    if document.is_empty() {
        return Err(CsvError::MalformedDocument);
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in document.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '\n' if !in_quotes => {
                rows.push(decode_row(&current));
                current.clear();
            }
            other => current.push(other),
        }
    }
    if !current.is_empty() {
        rows.push(decode_row(&current));
    }
    Ok(rows)
}
