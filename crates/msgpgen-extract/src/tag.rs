//! Go struct tags.
//!
//! A tag is a string literal attached to a field declaration, conventionally
//! a space-separated list of `key:"value"` pairs. Lookup follows Go's
//! `reflect.StructTag.Lookup`: scanning stops at the first malformed pair.

/// Decode the literal text of a tag as written in source.
///
/// Raw literals (`` `...` ``) are taken verbatim minus carriage returns;
/// interpreted literals (`"..."`) are unquoted. Returns `None` if the literal
/// is malformed.
pub fn literal_value(literal: &str) -> Option<String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
    {
        return Some(raw.chars().filter(|&c| c != '\r').collect());
    }
    if literal.starts_with('"') {
        return unquote(literal);
    }
    None
}

/// Value associated with `key` in a decoded tag string.
pub fn lookup(tag: &str, key: &str) -> Option<String> {
    let mut rest = tag;
    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }

        // Key: run of non-control, non-space bytes other than quote and colon.
        let name_len = rest
            .bytes()
            .take_while(|&b| b > b' ' && b != b':' && b != b'"' && b != 0x7f)
            .count();
        let after = &rest.as_bytes()[name_len..];
        if name_len == 0 || after.len() < 2 || after[0] != b':' || after[1] != b'"' {
            return None;
        }
        let name = &rest[..name_len];
        rest = &rest[name_len + 1..];

        // Quoted value, honoring backslash escapes.
        let bytes = rest.as_bytes();
        let mut i = 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        let quoted = &rest[..=i];
        rest = &rest[i + 1..];

        if name == key {
            return unquote(quoted);
        }
    }
}

/// Interpret a double-quoted Go string literal.
///
/// `\x` and octal escapes denote raw bytes, so the decoded bytes must form
/// valid UTF-8; otherwise the literal is treated as malformed.
pub fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => unescape(&mut chars, &mut out)?,
            c => push_char(&mut out, c),
        }
    }
    String::from_utf8(out).ok()
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn unescape(chars: &mut std::str::Chars<'_>, out: &mut Vec<u8>) -> Option<()> {
    let c = chars.next()?;
    let decoded = match c {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0b}',
        '\\' => '\\',
        '"' => '"',
        'u' => char::from_u32(hex_digits(chars, 4)?)?,
        'U' => char::from_u32(hex_digits(chars, 8)?)?,
        'x' => {
            out.push(u8::try_from(hex_digits(chars, 2)?).ok()?);
            return Some(());
        }
        '0'..='7' => {
            let mut value = c.to_digit(8)?;
            for _ in 0..2 {
                value = value * 8 + chars.next()?.to_digit(8)?;
            }
            out.push(u8::try_from(value).ok()?);
            return Some(());
        }
        _ => return None,
    };
    push_char(out, decoded);
    Some(())
}

fn hex_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
