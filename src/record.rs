//! Record-file parser (§4.2).
//!
//! Parses a persisted optimization-record document — `---`-delimited
//! records tagged `!Missed`/`!Passed`/`!Analysis` — into the same
//! `Remark` vector the live collector produces, so downstream stages are
//! source-agnostic. This is a best-effort line scanner, not a full YAML
//! parser (see design notes in the top-level spec).

use aion_ir::{Remark, RemarkArgument, RemarkKind, SourceLocation};

/// Parse a full record-file document into the remarks it contains.
/// Malformed individual records are skipped; a record with an empty
/// `Pass` field is dropped silently.
pub fn parse_records(document: &str) -> Vec<Remark> {
    split_records(document)
        .into_iter()
        .filter_map(|(tag, body)| parse_one_record(tag, body))
        .collect()
}

/// Split the document into `(tag, body)` pairs at each `---` boundary.
fn split_records(document: &str) -> Vec<(String, String)> {
    let mut records = Vec::new();
    let mut current_tag: Option<String> = None;
    let mut current_body = String::new();

    for line in document.lines() {
        if let Some(rest) = line.trim_start().strip_prefix("---") {
            if let Some(tag) = current_tag.take() {
                records.push((tag, std::mem::take(&mut current_body)));
            }
            current_tag = Some(rest.trim().to_string());
            continue;
        }
        if current_tag.is_some() {
            current_body.push_str(line);
            current_body.push('\n');
        }
    }
    if let Some(tag) = current_tag {
        records.push((tag, current_body));
    }
    records
}

fn parse_one_record(tag: String, body: String) -> Option<Remark> {
    let kind = match tag.as_str() {
        "!Missed" => RemarkKind::Missed,
        "!Passed" => RemarkKind::Applied,
        "!Analysis" => RemarkKind::Analysis,
        _ => return None,
    };

    let pass = field(&body, "Pass")?;
    if pass.is_empty() {
        return None;
    }
    let name = field(&body, "Name").unwrap_or_default();
    let function = field(&body, "Function").unwrap_or_default();
    let loc = parse_debug_loc(&body);
    let (message, args) = parse_args(&body);

    Some(
        Remark::new(kind, pass, name, function, message)
            .with_loc(loc)
            .with_args(args),
    )
}

/// Find `Field: Value` and return the (quote-stripped) value, requiring
/// the byte before the match to be newline, space, or `{` — a best-effort
/// defense against matching `Pass:`-like substrings inside message bodies.
fn field(body: &str, name: &str) -> Option<String> {
    let needle = format!("{name}:");
    let bytes = body.as_bytes();
    let mut search_from = 0;

    while let Some(rel) = body[search_from..].find(&needle) {
        let pos = search_from + rel;
        let boundary_ok = pos == 0 || matches!(bytes[pos - 1], b'\n' | b' ' | b'{');
        if boundary_ok {
            let rest = &body[pos + needle.len()..];
            let value_end = rest.find(['\n', ',', '}']).unwrap_or(rest.len());
            let raw = rest[..value_end].trim();
            return Some(strip_quotes(raw).to_string());
        }
        search_from = pos + needle.len();
    }
    None
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_debug_loc(body: &str) -> SourceLocation {
    let file = field(body, "File").unwrap_or_default();
    if file.is_empty() {
        return SourceLocation::invalid();
    }
    let line = field(body, "Line").and_then(|v| v.parse().ok()).unwrap_or(0);
    let column = field(body, "Column").and_then(|v| v.parse().ok()).unwrap_or(0);
    SourceLocation::new(file, line, column)
}

/// Reconstruct the human message from the `Args:` map sequence, and
/// collect each item's fields as `RemarkArgument`s. Concatenation inserts
/// a single space iff neither side already has one at the join point.
fn parse_args(body: &str) -> (String, Vec<RemarkArgument>) {
    let Some(args_pos) = body.find("Args:") else {
        return (String::new(), Vec::new());
    };
    let Some(open) = body[args_pos..].find('[') else {
        return (String::new(), Vec::new());
    };
    let start = args_pos + open + 1;
    let Some(close_rel) = body[start..].find(']') else {
        return (String::new(), Vec::new());
    };
    let list = &body[start..start + close_rel];

    let mut message = String::new();
    let mut args = Vec::new();

    for item in split_items(list) {
        for (key, value) in item_fields(&item) {
            append_piece(&mut message, &value);
            args.push(RemarkArgument::new(key, value));
        }
    }

    (message, args)
}

/// Split `{...}, {...}` into its `{...}` items.
fn split_items(list: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0;
    let mut current = String::new();
    for ch in list.chars() {
        match ch {
            '{' => {
                depth += 1;
                if depth == 1 {
                    current.clear();
                    continue;
                }
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    items.push(current.trim().to_string());
                    continue;
                }
            }
            _ => {}
        }
        if depth > 0 {
            current.push(ch);
        }
    }
    items
}

fn item_fields(item: &str) -> Vec<(String, String)> {
    item.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once(':')?;
            Some((key.trim().to_string(), strip_quotes(value.trim()).to_string()))
        })
        .collect()
}

fn append_piece(message: &mut String, piece: &str) {
    let needs_space = !message.is_empty() && !message.ends_with(' ') && !piece.starts_with(' ');
    if needs_space {
        message.push(' ');
    }
    message.push_str(piece.trim_start());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_missed_record_with_split_args() {
        let doc = "--- !Missed\nPass: 'loop-vectorize'\nName: 'MissedDetails'\nFunction: 'f'\nArgs: [ {String: 'loop not'}, {String: ' vectorized'} ]\n...\n";
        let remarks = parse_records(doc);
        assert_eq!(remarks.len(), 1);
        assert_eq!(remarks[0].kind, RemarkKind::Missed);
        assert_eq!(remarks[0].message, "loop not vectorized");
        assert_eq!(remarks[0].pass_name, "loop-vectorize");
        assert_eq!(remarks[0].function_name, "f");
    }

    #[test]
    fn record_with_empty_pass_is_dropped() {
        let doc = "--- !Missed\nPass: ''\nName: 'X'\n...\n";
        assert!(parse_records(doc).is_empty());
    }

    #[test]
    fn unknown_tag_is_skipped() {
        let doc = "--- !Unknown\nPass: 'x'\n...\n";
        assert!(parse_records(doc).is_empty());
    }

    #[test]
    fn debug_loc_is_parsed_when_present() {
        let doc = "--- !Missed\nPass: 'inline'\nName: 'X'\nFunction: 'f'\nDebugLoc: { File: 'a.c', Line: '3', Column: '7' }\n...\n";
        let remarks = parse_records(doc);
        assert_eq!(remarks[0].loc, SourceLocation::new("a.c", 3, 7));
    }

    #[test]
    fn field_boundary_heuristic_avoids_matching_inside_message_body() {
        let doc = "--- !Missed\nPass: 'inline'\nName: 'X'\nFunction: 'f'\nArgs: [ {String: 'Function: weird text'} ]\n...\n";
        let remarks = parse_records(doc);
        assert_eq!(remarks[0].function_name, "f");
    }
}
