use std::collections::HashMap;

/// One data line of the input, keyed by lowercase header name.
///
/// Keys are normalized at construction and on lookup, so callers can ask for
/// `"team"` or `"TEAM"` and get the same value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .or_else(|| self.fields.get(&key.to_lowercase()))
            .map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: String) {
        self.fields.insert(key.to_lowercase(), value);
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::default();
        for (key, value) in iter {
            row.insert(key.as_ref(), value.into());
        }
        row
    }
}

/// Split one line into trimmed fields.
///
/// A double quote toggles quoted mode and is dropped; commas inside quotes are
/// kept. Doubled quotes are not treated as an escaped literal quote.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Strip one pair of surrounding quotes from a value that still carries them
fn unquote(value: String) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].to_string()
    } else {
        value
    }
}

/// Parse comma-delimited text with a header line into raw rows.
///
/// Header names are trimmed and lowercased. Blank lines are skipped, rows with
/// fewer values than headers simply lack the trailing keys, and surplus values
/// are dropped.
pub fn parse_delimited(text: &str) -> Vec<RawRow> {
    let mut lines = text.trim().split('\n');

    let headers: Vec<String> = match lines.next() {
        Some(header) if !header.trim().is_empty() => header
            .trim()
            .split(',')
            .map(|h| h.trim().to_lowercase())
            .collect(),
        _ => return Vec::new(),
    };

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let values = split_line(line);
            let mut row = RawRow::default();
            for (header, value) in headers.iter().zip(values) {
                row.insert(header, unquote(value));
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rows() {
        let rows = parse_delimited("name,team\nAlpha,Food\nBeta,Payments\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Alpha"));
        assert_eq!(rows[1].get("team"), Some("Payments"));
    }

    #[test]
    fn test_quoted_field_keeps_comma() {
        let rows = parse_delimited("name,team\n\"a,b\",Food");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("a,b"));
        assert_eq!(rows[0].get("team"), Some("Food"));
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let upper = parse_delimited("NAME, TEAM \nA,Food");
        let lower = parse_delimited("name,team\nA,Food");
        assert_eq!(upper[0].get("team"), Some("Food"));
        assert_eq!(upper[0].get("TEAM"), Some("Food"));
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let rows = parse_delimited("name\nA\n\n   \nB\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some("B"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = parse_delimited("name,team\r\nA,Food\r\nB,Payments\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("team"), Some("Food"));
        assert_eq!(rows[1].get("name"), Some("B"));
    }

    #[test]
    fn test_short_rows_leave_keys_absent() {
        let rows = parse_delimited("name,team,status\nA,Food");
        assert_eq!(rows[0].get("status"), None);
        assert_eq!(rows[0].fields.len(), 2);
    }

    #[test]
    fn test_extra_values_are_dropped() {
        let rows = parse_delimited("name\nA,extra,more");
        assert_eq!(rows[0].fields.len(), 1);
        assert_eq!(rows[0].get("name"), Some("A"));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let rows = parse_delimited("name,team\n  A  ,  \" Food \" ");
        assert_eq!(rows[0].get("name"), Some("A"));
        assert_eq!(rows[0].get("team"), Some("Food"));
    }

    #[test]
    fn test_doubled_quotes_are_not_escapes() {
        // `""` toggles quoted mode twice and leaves nothing behind
        let rows = parse_delimited("name\nsay \"\"hi\"\"");
        assert_eq!(rows[0].get("name"), Some("say hi"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_delimited("").is_empty());
        assert!(parse_delimited("   \n  ").is_empty());
        assert!(parse_delimited("name,team").is_empty());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"x\"".to_string()), "x");
        assert_eq!(unquote("\"".to_string()), "\"");
        assert_eq!(unquote("plain".to_string()), "plain");
    }

    #[test]
    fn test_raw_row_from_iter() {
        let row: RawRow = [("Name", "A"), ("STATUS", "Done")].into_iter().collect();
        assert_eq!(row.get("name"), Some("A"));
        assert_eq!(row.get("status"), Some("Done"));
    }
}
