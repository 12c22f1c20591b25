//! Column order recovery for Cypher results.
//!
//! Neo4j rows arrive as field maps, so the positional order of the columns
//! is read back from the query's final `RETURN` projection.

/// Column names of the final `RETURN` clause, in projection order.
///
/// An item's column name is its alias when it has one (`count(t) AS talks`
/// gives `talks`), otherwise the expression text (`p.name`). Returns an
/// empty list for queries without a `RETURN`, and skips `*`.
pub fn projection_columns(query: &str) -> Vec<String> {
    let query = query.trim().trim_end_matches(';');
    let Some(start) = find_keyword(query, "RETURN", true) else {
        return Vec::new();
    };

    let rest = &query[start + "RETURN".len()..];
    let end = ["ORDER", "SKIP", "LIMIT"]
        .iter()
        .filter_map(|kw| find_keyword(rest, kw, false))
        .min()
        .unwrap_or(rest.len());

    let mut body = rest[..end].trim();
    if let Some(0) = find_keyword(body, "DISTINCT", false) {
        body = body["DISTINCT".len()..].trim_start();
    }

    split_top_level(body)
        .into_iter()
        .map(column_name)
        .filter(|name| !name.is_empty() && name != "*")
        .collect()
}

/// Order result keys by their position in the projection.
///
/// Keys the projection does not mention are appended in name order.
pub fn order_columns(projection: &[String], keys: Vec<String>) -> Vec<String> {
    let mut ordered: Vec<String> = projection
        .iter()
        .filter(|name| keys.contains(name))
        .cloned()
        .collect();

    let mut extra: Vec<String> = keys
        .into_iter()
        .filter(|key| !ordered.contains(key))
        .collect();
    extra.sort();
    ordered.extend(extra);
    ordered
}

fn column_name(item: &str) -> String {
    match find_keyword(item, "AS", true) {
        Some(pos) => item[pos + 2..].trim().trim_matches('`').to_string(),
        None => item.trim().to_string(),
    }
}

/// Marks the bytes that sit outside string literals and brackets.
fn top_level_mask(text: &str) -> Vec<bool> {
    let bytes = text.as_bytes();
    let mut mask = Vec::with_capacity(bytes.len());
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    let mut depth = 0usize;

    for &b in bytes {
        mask.push(quote.is_none() && depth == 0);
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }
    mask
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Byte offset of a top-level, whole-word, case-insensitive keyword.
///
/// A word right after `.` is a property key (`t.order`), never a clause.
fn find_keyword(text: &str, keyword: &str, last: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let kw = keyword.as_bytes();
    if bytes.len() < kw.len() {
        return None;
    }
    let mask = top_level_mask(text);

    let mut hits = (0..=bytes.len() - kw.len()).filter(|&i| {
        mask[i]
            && bytes[i..i + kw.len()].eq_ignore_ascii_case(kw)
            && (i == 0 || !(is_word_byte(bytes[i - 1]) || bytes[i - 1] == b'.'))
            && bytes.get(i + kw.len()).map_or(true, |&b| !is_word_byte(b))
    });

    if last {
        hits.last()
    } else {
        hits.next()
    }
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mask = top_level_mask(text);
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b',' && mask[i] {
            parts.push(&text[start..i]);
            start = i + 1;
        }
    }
    parts.push(&text[start..]);
    parts
}
