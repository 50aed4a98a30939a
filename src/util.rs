// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use std::char;

/// tostr converts a byte slice to a string reference. It must only be used
/// on slices of json text that came in as a `&str` and that were cut at
/// ascii codepoints.
pub fn tostr(v: &[u8]) -> &str {
    // SAFETY: every slice taken by the scanners starts and ends at an ascii
    // codepoint of a utf8 validated string.
    unsafe { std::str::from_utf8_unchecked(v) }
}

fn into_string(out: Vec<u8>) -> String {
    String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

// unescape a json string, including its surrounding quotes.
pub fn unescape(json: &str) -> String {
    let json = json.as_bytes();
    if json.len() < 2 || json[0] != b'"' || json[json.len() - 1] != b'"' {
        return String::new();
    }
    let json = &json[1..json.len() - 1];
    let mut out = Vec::with_capacity(json.len());
    let mut i = 0;
    loop {
        if i == json.len() || json[i] < b' ' {
            break;
        } else if json[i] == b'\\' {
            i += 1;
            if i == json.len() {
                break;
            }
            match json[i] {
                b'"' => out.push(b'"'),
                b'\\' => out.push(b'\\'),
                b'/' => out.push(b'/'),
                b'b' => out.push(8),
                b'f' => out.push(12),
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'u' => {
                    if i + 5 > json.len() {
                        break;
                    }
                    let mut r =
                        u32::from_str_radix(tostr(&json[i + 1..i + 5]), 16).unwrap_or(0xFFFD);
                    i += 5;
                    if utf16_is_surrogate(r) {
                        // need another code
                        if json[i..].len() >= 6 && json[i] == b'\\' && json[i + 1] == b'u' {
                            r = match u32::from_str_radix(tostr(&json[i + 2..i + 6]), 16) {
                                Ok(r2) => utf16_decode(r, r2),
                                Err(_) => 0xFFFD,
                            };
                            i += 6
                        }
                    }
                    let ch = char::from_u32(r).unwrap_or(char::REPLACEMENT_CHARACTER);
                    out.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes());
                    continue;
                }
                _ => break,
            }
        } else {
            out.push(json[i]);
        }
        i += 1;
    }
    into_string(out)
}

fn utf16_is_surrogate(r: u32) -> bool {
    (0xd800..0xe000).contains(&r)
}

fn utf16_decode(r1: u32, r2: u32) -> u32 {
    if (0xd800..0xdc00).contains(&r1) && (0xdc00..0xe000).contains(&r2) {
        ((r1 - 0xd800) << 10 | (r2 - 0xdc00)) + 0x10000
    } else {
        0xFFFD
    }
}

pub fn extend_json_string(out: &mut Vec<u8>, s: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    out.push(b'"');
    for &ch in s {
        if ch >= b' ' && ch != b'\\' && ch != b'"' {
            out.push(ch);
            continue;
        }
        out.push(b'\\');
        match ch {
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            8 => out.push(b'b'),
            12 => out.push(b'f'),
            b'\n' => out.push(b'n'),
            b'\r' => out.push(b'r'),
            b'\t' => out.push(b't'),
            _ => {
                out.extend_from_slice(b"u00");
                out.push(HEX[(ch >> 4) as usize]);
                out.push(HEX[(ch & 0xF) as usize]);
            }
        }
    }
    out.push(b'"');
}

// escape a string into a quoted json string.
pub fn escape(s: &str) -> String {
    let mut out = Vec::with_capacity(s.len() + 2);
    extend_json_string(&mut out, s.as_bytes());
    into_string(out)
}

#[cfg(test)]
mod test {

    #[test]
    fn escape() {
        assert_eq!(super::escape("hello"), r#""hello""#);
        assert_eq!(super::escape("日本語"), r#""日本語""#);
        assert_eq!(
            super::escape("ad\"\\/\u{08}\u{0C}\n\r\t\u{00}sf"),
            r#""ad\"\\/\b\f\n\r\t\u0000sf""#
        );
        assert_eq!(super::escape("\u{1F}"), r#""\u001F""#);
    }

    #[test]
    fn unescape() {
        assert_eq!(super::unescape(r#""adsf"#), "");
        assert_eq!(super::unescape(r#""ad\sf""#), "ad");
        assert_eq!(
            super::unescape(r#""ad\"\\\/\b\f\n\r\tsf""#),
            "ad\"\\/\u{08}\u{0C}\n\r\tsf"
        );
        assert_eq!(super::unescape(r#""日本""#), "日本");
        assert_eq!(super::unescape(r#""😋""#), "😋");
        assert_eq!(super::unescape(r#""ad\uD83Dsf""#), "ad\u{FFFD}sf");
        assert_eq!(super::unescape(r#""ad\uD83D\u00FFsf""#), "ad\u{FFFD}sf");
    }

    #[test]
    fn escape_unescape() {
        for s in ["", "plain", "tab\there", "quote\"d", "back\\slash", "ünï"] {
            assert_eq!(super::unescape(&super::escape(s)), s);
        }
    }
}
