// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use crate::{Error, Result};

const SPACE: u8 = 1 << 1;
const STRING: u8 = 1 << 2;

// Bytes that end a run of plain string characters: control characters, the
// closing quote and the escape character.
static TABLE: [u8; 256] = {
    let mut table = [0; 256];
    table[b'\t' as usize] |= SPACE;
    table[b'\n' as usize] |= SPACE;
    table[b'\r' as usize] |= SPACE;
    table[b' ' as usize] |= SPACE;
    let mut ch = 0;
    while ch < 0x20 {
        table[ch] |= STRING;
        ch += 1;
    }
    table[b'"' as usize] |= STRING;
    table[b'\\' as usize] |= STRING;
    table
};

fn isspace(c: u8) -> bool {
    TABLE[c as usize] & SPACE == SPACE
}

/// Returns true if the input is a single valid json value, optionally
/// surrounded by whitespace.
pub fn valid(json: &[u8]) -> bool {
    check(json).is_ok()
}

/// Like `valid`, but reports where the input stopped being json.
///
/// The error carries the byte offset of the first rejected byte together
/// with its 1-based line and column.
pub fn validate(json: &[u8]) -> Result<()> {
    match check(json) {
        Ok(()) => Ok(()),
        Err(offset) => {
            let offset = offset.min(json.len());
            let head = &json[..offset];
            let line = head.iter().filter(|&&ch| ch == b'\n').count() + 1;
            let column = match head.iter().rposition(|&ch| ch == b'\n') {
                Some(nl) => offset - nl,
                None => offset + 1,
            };
            tracing::debug!(offset, line, column, "rejected json");
            Err(Error::Syntax {
                offset,
                line,
                column,
            })
        }
    }
}

// -> Err(offset of the first rejected byte)
fn check(json: &[u8]) -> std::result::Result<(), usize> {
    let (valid, mut i) = valid_any(json, 0);
    if !valid {
        return Err(i);
    }
    i = strip_ws(json, i);
    if i < json.len() {
        return Err(i);
    }
    Ok(())
}

fn valid_any(json: &[u8], i: usize) -> (bool, usize) {
    let i = strip_ws(json, i);
    if i == json.len() {
        return (false, i);
    }
    match json[i] {
        b'{' => valid_object(json, i),
        b'[' => valid_array(json, i),
        b'"' => valid_string(json, i),
        b't' => valid_literal(json, i, b"true"),
        b'f' => valid_literal(json, i, b"false"),
        b'n' => valid_literal(json, i, b"null"),
        b'-' | b'0'..=b'9' => valid_number(json, i),
        _ => (false, i),
    }
}

fn strip_ws(json: &[u8], mut i: usize) -> usize {
    while i < json.len() && isspace(json[i]) {
        i += 1;
    }
    i
}

fn valid_object(json: &[u8], mut i: usize) -> (bool, usize) {
    i = strip_ws(json, i + 1);
    if i == json.len() {
        return (false, i);
    }
    if json[i] == b'}' {
        return (true, i + 1);
    }
    loop {
        if json[i] != b'"' {
            return (false, i);
        }
        let (valid, next_i) = valid_string(json, i);
        if !valid {
            return (false, next_i);
        }
        i = strip_ws(json, next_i);
        if i == json.len() || json[i] != b':' {
            return (false, i);
        }
        let (valid, next_i) = valid_any(json, i + 1);
        if !valid {
            return (false, next_i);
        }
        i = strip_ws(json, next_i);
        if i == json.len() {
            return (false, i);
        }
        if json[i] == b'}' {
            return (true, i + 1);
        }
        if json[i] != b',' {
            return (false, i);
        }
        i = strip_ws(json, i + 1);
        if i == json.len() {
            return (false, i);
        }
    }
}

fn valid_array(json: &[u8], mut i: usize) -> (bool, usize) {
    i = strip_ws(json, i + 1);
    if i == json.len() {
        return (false, i);
    }
    if json[i] == b']' {
        return (true, i + 1);
    }
    loop {
        let (valid, next_i) = valid_any(json, i);
        if !valid {
            return (false, next_i);
        }
        i = strip_ws(json, next_i);
        if i == json.len() {
            return (false, i);
        }
        if json[i] == b']' {
            return (true, i + 1);
        }
        if json[i] != b',' {
            return (false, i);
        }
        i += 1;
    }
}

fn valid_string(json: &[u8], mut i: usize) -> (bool, usize) {
    i += 1;
    loop {
        while i < json.len() && TABLE[json[i] as usize] & STRING == 0 {
            i += 1;
        }
        if i == json.len() || json[i] < b' ' {
            return (false, i);
        }
        if json[i] == b'"' {
            return (true, i + 1);
        }
        // escape
        i += 1;
        if i == json.len() {
            return (false, i);
        }
        match json[i] {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {}
            b'u' => {
                for _ in 0..4 {
                    i += 1;
                    if i == json.len() || !json[i].is_ascii_hexdigit() {
                        return (false, i);
                    }
                }
            }
            _ => return (false, i),
        }
        i += 1;
    }
}

fn digits(json: &[u8], mut i: usize) -> usize {
    while i < json.len() && json[i].is_ascii_digit() {
        i += 1;
    }
    i
}

fn valid_number(json: &[u8], mut i: usize) -> (bool, usize) {
    // sign
    if json[i] == b'-' {
        i += 1;
    }
    // int
    if i == json.len() || !json[i].is_ascii_digit() {
        return (false, i);
    }
    if json[i] == b'0' {
        i += 1;
    } else {
        i = digits(json, i);
    }
    // frac
    if i < json.len() && json[i] == b'.' {
        i += 1;
        if i == json.len() || !json[i].is_ascii_digit() {
            return (false, i);
        }
        i = digits(json, i);
    }
    // exp
    if i < json.len() && (json[i] == b'e' || json[i] == b'E') {
        i += 1;
        if i < json.len() && (json[i] == b'+' || json[i] == b'-') {
            i += 1;
        }
        if i == json.len() || !json[i].is_ascii_digit() {
            return (false, i);
        }
        i = digits(json, i);
    }
    (true, i)
}

fn valid_literal(json: &[u8], i: usize, lit: &[u8]) -> (bool, usize) {
    if json[i..].starts_with(lit) {
        (true, i + lit.len())
    } else {
        (false, i)
    }
}
