// CSV text to ordered records
use crate::domain::record::Record;
use std::sync::Arc;

/// Parse export text into records.
///
/// The first non-empty line is the header. Each following line is
/// tokenized with [`tokenize`] and paired with the header positionally;
/// rows are never rejected, short rows simply leave trailing fields unset.
/// Blank lines are skipped and empty input yields no records.
pub fn parse(text: &str) -> Vec<Record> {
    let text = text.trim_start_matches('\u{feff}').trim();
    let mut lines = text.lines();

    let header_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Vec::new(),
    };

    let headers: Arc<[String]> = header_line
        .split(',')
        .map(|h| h.trim().to_string())
        .collect();

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| Record::new(headers.clone(), tokenize(line)))
        .collect()
}

/// Split one data line into tokens.
///
/// A token is either a double-quoted span, whose quotes are stripped and
/// whose commas are kept, or a run of non-comma characters. Commas only
/// separate; consecutive commas produce no empty token.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(',') {
            rest = after;
            continue;
        }

        if let Some(inner) = rest.strip_prefix('"') {
            if let Some(end) = inner.find('"') {
                tokens.push(inner[..end].to_string());
                rest = &inner[end + 1..];
                continue;
            }
        }

        let end = rest.find(',').unwrap_or(rest.len());
        tokens.push(strip_quotes(&rest[..end]).to_string());
        rest = &rest[end..];
    }

    tokens
}

/// Re-emit a record's values in header order, quoting values that contain
/// a comma.
pub fn serialize_row(record: &Record) -> String {
    record
        .fields()
        .map(|(_, value)| quote(value.unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header line plus one line per record, taking the header from the first
/// record. No records gives empty text.
pub fn serialize(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let header = first
        .headers()
        .iter()
        .map(|h| quote(h))
        .collect::<Vec<_>>()
        .join(",");

    std::iter::once(header)
        .chain(records.iter().map(serialize_row))
        .map(|line| line + "\n")
        .collect()
}

fn quote(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

fn strip_quotes(token: &str) -> &str {
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}
