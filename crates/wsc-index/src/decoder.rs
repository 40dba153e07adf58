//! Linkage-name decoding.
//!
//! A demangled linkage name of a function looks like
//!
//! ```text
//! s:Dispatch.DispatchQueue.async(execute: @escaping () -> ()) -> ()
//! (extension in MyKit):Swift.Array.chunked<A>(by: (A) -> Swift.Bool) -> [[A]]
//! ```
//!
//! `decode_declaration` turns that into a declaration the parser accepts:
//!
//! ```text
//! func async(execute: @escaping () -> ()) -> () {}
//! ```
//!
//! Only the parameter list of the result is meaningful. Any input the
//! scanner cannot make sense of yields `None`.

use wsc_common::limits::MAX_LINKAGE_NAME_LEN;

const C_FAMILY_PREFIX: &str = "c:";
const SWIFT_PREFIX: &str = "s:";

/// Rebuild `func <name>(<params>)<rest> {}` from a demangled linkage name.
pub fn decode_declaration(linkage_name: &str) -> Option<String> {
    if linkage_name.len() > MAX_LINKAGE_NAME_LEN {
        return None;
    }
    let mut text = linkage_name.trim();
    if text.starts_with(C_FAMILY_PREFIX) {
        return None;
    }
    if let Some(rest) = text.strip_prefix(SWIFT_PREFIX) {
        text = rest;
    }

    // `(extension in Module):` and similar context groups.
    if text.starts_with('(') {
        let close = matching_paren(text, 0)?;
        text = &text[close + 1..];
        text = text.strip_prefix(':').unwrap_or(text);
    }

    let open = first_top_level_paren(text)?;
    let name = strip_qualifier(&text[..open])?;
    if name.is_empty() {
        return None;
    }
    let close = matching_paren(text, open)?;
    let parameters = normalize_parameters(&text[open + 1..close])?;
    let rest = text[close + 1..].trim_end();
    if !parens_balanced(rest) {
        return None;
    }

    Some(format!("func {name}({parameters}){rest} {{}}"))
}

/// Byte offset of the `)` closing the `(` at `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in text.bytes().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// First `(` outside any generic argument or subscript brackets.
fn first_top_level_paren(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    for (offset, &byte) in bytes.iter().enumerate() {
        match byte {
            b'<' | b'[' => depth += 1,
            b'>' if is_arrow_head(bytes, offset) => {}
            b'>' | b']' => depth -= 1,
            b'(' if depth == 0 => return Some(offset),
            _ => {}
        }
        if depth < 0 {
            return None;
        }
    }
    None
}

/// `Module.Type<A.B>.method<C>` -> `method<C>`.
///
/// Scans right to left so that dots inside generic argument lists are not
/// taken as qualifier separators.
fn strip_qualifier(qualified: &str) -> Option<&str> {
    let bytes = qualified.as_bytes();
    let mut depth = 0i32;
    let mut start = 0usize;
    for offset in (0..bytes.len()).rev() {
        match bytes[offset] {
            b'>' if is_arrow_head(bytes, offset) => {}
            b'>' | b']' | b')' => depth += 1,
            b'<' | b'[' | b'(' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            b'.' if depth == 0 => {
                start = offset + 1;
                break;
            }
            _ => {}
        }
    }
    let name = qualified[start..].trim();
    // Leading words such as `static` when the name is unqualified.
    Some(name.rsplit(' ').next().unwrap_or(name))
}

/// Split at top-level commas and give unlabeled entries a `_:` label.
fn normalize_parameters(list: &str) -> Option<String> {
    if list.trim().is_empty() {
        return Some(String::new());
    }
    let mut parameters = Vec::new();
    for entry in split_top_level(list)? {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }
        if has_label(entry) {
            parameters.push(entry.to_string());
        } else {
            parameters.push(format!("_: {entry}"));
        }
    }
    Some(parameters.join(", "))
}

fn split_top_level(list: &str) -> Option<Vec<&str>> {
    let bytes = list.as_bytes();
    let mut entries = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (offset, &byte) in bytes.iter().enumerate() {
        match byte {
            b'(' | b'[' | b'<' => depth += 1,
            b')' | b']' => depth -= 1,
            b'>' if is_arrow_head(bytes, offset) => {}
            b'>' => depth -= 1,
            b',' if depth == 0 => {
                entries.push(&list[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
        if depth < 0 {
            return None;
        }
    }
    if depth != 0 {
        return None;
    }
    entries.push(&list[start..]);
    Some(entries)
}

/// The `>` of a `->` is not a closing angle bracket.
fn is_arrow_head(bytes: &[u8], offset: usize) -> bool {
    offset > 0 && bytes[offset - 1] == b'-'
}

/// `label: Type` rather than a bare type.
fn has_label(entry: &str) -> bool {
    let ident_len = entry
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if ident_len == 0 || entry.as_bytes()[0].is_ascii_digit() {
        return false;
    }
    entry[ident_len..].trim_start().starts_with(':')
}

fn parens_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for byte in text.bytes() {
        match byte {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}
