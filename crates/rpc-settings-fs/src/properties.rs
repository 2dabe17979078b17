// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reader for the `java.util.Properties` text format used by `.prefs` files.

use std::collections::BTreeMap;

use crate::FsError;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Parse properties `text` into a key/value map.
///
/// Supports `#`/`!` comments, `=`, `:` or whitespace separators, line
/// continuations and backslash escapes (including `\uXXXX`). Lines end at
/// `\n`, `\r` or `\r\n`. Later entries win over earlier ones.
pub fn parse_properties(text: &str) -> Result<BTreeMap<String, String>, FsError> {
    let mut entries = BTreeMap::new();
    let mut lines = physical_lines(text).enumerate();
    while let Some((index, raw)) = lines.next() {
        let line = raw.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let mut logical = line.to_owned();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }
        let (key, value) = split_entry(&logical);
        let line_no = index + 1;
        entries.insert(unescape(key, line_no)?, unescape(value, line_no)?);
    }
    Ok(entries)
}

/// Like [`str::lines`], but a lone `\r` also ends a line.
fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\r', '\n']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

/// An odd number of trailing backslashes joins the next line.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }
    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (&line[..key_end], rest.trim_start_matches(is_blank))
}

fn unescape(raw: &str, line: usize) -> Result<String, FsError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(unicode_escape(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decodes the code unit(s) following `\u`, pairing UTF-16 surrogates.
fn unicode_escape(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char, FsError> {
    let high = hex4(chars, line)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).ok_or_else(|| invalid_escape(line, high));
    }
    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(invalid_escape(line, high));
    }
    let low = hex4(chars, line)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(invalid_escape(line, low));
    }
    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).ok_or_else(|| invalid_escape(line, code))
}

fn hex4(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32, FsError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.chars().count() != 4 {
        return Err(FsError::Parse {
            line,
            reason: format!("truncated unicode escape \\u{digits}"),
        });
    }
    // from_str_radix alone would let a sign through, as in `\u+041`.
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FsError::Parse {
            line,
            reason: format!("invalid unicode escape \\u{digits}"),
        });
    }
    u32::from_str_radix(&digits, 16).map_err(|_| FsError::Parse {
        line,
        reason: format!("invalid unicode escape \\u{digits}"),
    })
}

fn invalid_escape(line: usize, code: u32) -> FsError {
    FsError::Parse {
        line,
        reason: format!("unpaired or invalid code unit {code:#06x}"),
    }
}
