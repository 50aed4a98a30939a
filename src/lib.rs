// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

mod error;
mod eval;
mod input;
mod selector;
/// Additional tools for working with JSON data.
pub mod tools;
mod util;
mod valid;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use util::{escape, tostr, unescape};

pub use error::{Error, Result};
pub use eval::{evaluate, Outcome};
pub use input::{read_input, InputMode};
pub use selector::Step;
pub use valid::{valid, validate};

type InfoBits = u32;

/// The kind of json `Value`.
#[derive(Copy, Clone, Debug, Eq)]
pub enum Kind {
    Null,
    False,
    Number,
    String,
    True,
    Array,
    Object,
}

impl PartialOrd for Kind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for Kind {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as i32).cmp(&(*other as i32))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::False | Kind::True => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        })
    }
}

// first eight bits are reserved for json-kind flags
const INFO_NULL: InfoBits = 1 << 1;
const INFO_FALSE: InfoBits = 1 << 2;
const INFO_NUMBER: InfoBits = 1 << 3;
const INFO_STRING: InfoBits = 1 << 4;
const INFO_TRUE: InfoBits = 1 << 5;
const INFO_OBJECT: InfoBits = 1 << 6;
const INFO_ARRAY: InfoBits = 1 << 7;
// string contains escape sequences
const INFO_ESC: InfoBits = 1 << 8;

static KINDMAP: [Kind; 256] = {
    let mut map = [Kind::Null; 256];
    map[INFO_NULL as usize] = Kind::Null;
    map[INFO_FALSE as usize] = Kind::False;
    map[INFO_NUMBER as usize] = Kind::Number;
    map[INFO_STRING as usize] = Kind::String;
    map[INFO_TRUE as usize] = Kind::True;
    map[INFO_OBJECT as usize] = Kind::Object;
    map[INFO_ARRAY as usize] = Kind::Array;
    map
};

/// Value is a view of one JSON value inside the input text.
///
/// Values borrow the text they were parsed from. Only unescaped strings and
/// characters picked out of a string carry their own allocation.
pub struct Value<'a> {
    slice: &'a str,
    owned: String,
    uescstr: String,
    info: InfoBits,
}

impl<'a> Default for Value<'a> {
    fn default() -> Self {
        Value {
            slice: "",
            owned: String::new(),
            uescstr: String::new(),
            info: 0,
        }
    }
}

impl<'a> fmt::Debug for Value<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("kind", &self.kind())
            .field("json", &self.json())
            .finish()
    }
}

/// Strings print their contents without quotes, every other kind prints
/// its JSON text.
impl<'a> fmt::Display for Value<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Kind::Null => f.write_str("null"),
            _ => f.write_str(self.str()),
        }
    }
}

fn json_from_slice<'a>(slice: &'a [u8], info: InfoBits) -> Value<'a> {
    let mut json = Value {
        slice: tostr(slice),
        owned: String::new(),
        uescstr: String::new(),
        info,
    };
    json_unescape_string(&mut json);
    json
}

fn json_from_owned<'a>(owned: String, info: InfoBits) -> Value<'a> {
    let mut json = Value {
        slice: "",
        owned,
        uescstr: String::new(),
        info,
    };
    json_unescape_string(&mut json);
    json
}

fn json_unescape_string(json: &mut Value) {
    if json.info & (INFO_STRING | INFO_ESC) == (INFO_STRING | INFO_ESC) {
        // Escaped string. We must unescape it into a new allocated string.
        json.uescstr = unescape(json.json());
    }
}

impl<'a> Value<'a> {
    pub fn exists(&self) -> bool {
        !self.json().is_empty()
    }

    pub fn kind(&self) -> Kind {
        KINDMAP[(self.info << 24 >> 24) as usize]
    }

    /// The raw JSON text of the value.
    pub fn json(&self) -> &str {
        if !self.owned.is_empty() {
            self.owned.as_str()
        } else {
            self.slice
        }
    }

    pub fn str(&self) -> &str {
        match self.kind() {
            Kind::True => "true",
            Kind::False => "false",
            Kind::Object | Kind::Array | Kind::Number => self.json(),
            Kind::String => {
                if self.info & INFO_ESC == INFO_ESC {
                    self.uescstr.as_ref()
                } else {
                    let raw = self.json().as_bytes();
                    tostr(&raw[1..raw.len() - 1])
                }
            }
            // Return an empty string for null. Use json() to return the
            // raw json.
            Kind::Null => "",
        }
    }

    /// Number of elements of an array, distinct member names of an object,
    /// or characters of a string. Other kinds have no length.
    pub fn len(&self) -> Option<usize> {
        match self.kind() {
            Kind::Array => {
                let mut count = 0;
                self.each(|_, _| {
                    count += 1;
                    true
                });
                Some(count)
            }
            Kind::Object => {
                let mut names = HashSet::new();
                self.each(|key, _| {
                    names.insert(key.str().to_owned());
                    true
                });
                Some(names.len())
            }
            Kind::String => Some(self.str().chars().count()),
            _ => None,
        }
    }

    /// Returns the value of the object member named `key`. When a name is
    /// repeated the last member wins.
    pub fn member(&self, key: &str) -> Option<Value<'a>> {
        if self.kind() != Kind::Object {
            return None;
        }
        let mut found = None;
        for_each(self.slice.as_bytes(), 0, Kind::Object, |name, value| {
            if name.str() == key {
                found = Some(value);
            }
            true
        });
        found
    }

    /// Returns the element at `index` of an array, or the character at
    /// `index` of a string as a new string value.
    pub fn element(&self, index: usize) -> Option<Value<'a>> {
        match self.kind() {
            Kind::Array => {
                let mut found = None;
                let mut at = 0;
                for_each(self.slice.as_bytes(), 0, Kind::Array, |_, value| {
                    if at == index {
                        found = Some(value);
                        return false;
                    }
                    at += 1;
                    true
                });
                found
            }
            Kind::String => {
                let ch = self.str().chars().nth(index)?;
                let raw = escape(ch.encode_utf8(&mut [0; 4]));
                let mut info = INFO_STRING;
                if raw.contains('\\') {
                    info |= INFO_ESC;
                }
                Some(json_from_owned(raw, info))
            }
            _ => None,
        }
    }

    /// Calls `iter` with each member of an object or each element of an
    /// array. Array elements are passed with an empty key. Iteration stops
    /// when `iter` returns false.
    pub fn each(&self, iter: impl FnMut(Value<'a>, Value<'a>) -> bool) {
        let kind = self.kind();
        if kind != Kind::Object && kind != Kind::Array {
            return;
        }
        for_each(self.slice.as_bytes(), 0, kind, iter);
    }
}

fn for_each<'a>(
    json: &'a [u8],
    mut i: usize,
    kind: Kind,
    mut iter: impl FnMut(Value<'a>, Value<'a>) -> bool,
) -> usize {
    if i == json.len() {
        return i;
    }
    // skip the opening bracket
    i += 1;
    let mut index = 0;
    let mut tmp_key = Value::default();
    while i < json.len() {
        if json[i] <= b' ' || json[i] == b',' || json[i] == b':' {
            i += 1;
            continue;
        }
        if json[i] == b'}' || json[i] == b']' {
            return i + 1;
        }
        let (res, next_i) = proc_value(json, i);
        i = next_i;
        if res.exists() {
            if kind == Kind::Object {
                if index % 2 == 0 {
                    tmp_key = res;
                } else {
                    let key = std::mem::take(&mut tmp_key);
                    if !iter(key, res) {
                        break;
                    }
                }
            } else if !iter(Value::default(), res) {
                break;
            }
            index += 1;
        }
    }
    i
}

const CHQUOTE: u8 = 1 << 1;
const CHOPEN: u8 = 1 << 2;
const CHCLOSE: u8 = 1 << 3;
const CHSTRTOK: u8 = 1 << 4;
const CHSQUASH: u8 = 1 << 5;

static CHTABLE: [u8; 256] = {
    let mut table = [0; 256];
    table[b'{' as usize] |= CHSQUASH | CHOPEN;
    table[b'[' as usize] |= CHSQUASH | CHOPEN;
    table[b'}' as usize] |= CHSQUASH | CHCLOSE;
    table[b']' as usize] |= CHSQUASH | CHCLOSE;
    table[b'"' as usize] |= CHSQUASH | CHQUOTE | CHSTRTOK;
    table[b'\\' as usize] |= CHSQUASH | CHSTRTOK;
    table
};

// -> (val, info, next_i)
fn scan_number(json: &[u8], mut i: usize) -> (&[u8], InfoBits, usize) {
    let s = i;
    i += 1;
    while i < json.len() {
        let ch = json[i];
        if !ch.is_ascii_digit() && !matches!(ch, b'.' | b'e' | b'E' | b'-' | b'+') {
            break;
        }
        i += 1;
    }
    (&json[s..i], 0, i)
}

// -> (val, info, next_i)
fn scan_string(json: &[u8], mut i: usize) -> (&[u8], InfoBits, usize) {
    let mut info = 0;
    let s = i;
    i += 1;
    while i < json.len() {
        let ch = json[i];
        if CHTABLE[ch as usize] & CHSTRTOK == 0 {
            i += 1;
            continue;
        }
        if ch == b'"' {
            i += 1;
            return (&json[s..i], info, i);
        }
        // must be an escape character '\'
        info |= INFO_ESC;
        i += 2;
    }
    (b"", 0, json.len())
}

// -> (val, next_i)
fn scan_squash(json: &[u8], mut i: usize) -> (&[u8], usize) {
    let s = i;
    i += 1;
    let mut depth = 1;
    while i < json.len() {
        let ch = json[i];
        let flags = CHTABLE[ch as usize];
        if flags & CHSQUASH == 0 {
            i += 1;
            continue;
        }
        if flags & CHQUOTE == CHQUOTE {
            i = scan_string(json, i).2;
            continue;
        }
        if flags & CHOPEN == CHOPEN {
            depth += 1;
        } else if flags & CHCLOSE == CHCLOSE {
            depth -= 1;
            if depth == 0 {
                i += 1;
                return (&json[s..i], i);
            }
        }
        i += 1;
    }
    (b"", json.len())
}

// Reads the value starting at json[i]. Returns an empty value when the
// text at i is not a value.
fn proc_value(json: &[u8], mut i: usize) -> (Value<'_>, usize) {
    match json[i] {
        b'"' => {
            let (val, info, next_i) = scan_string(json, i);
            (json_from_slice(val, info | INFO_STRING), next_i)
        }
        b'{' | b'[' => {
            let kind = if json[i] == b'{' {
                INFO_OBJECT
            } else {
                INFO_ARRAY
            };
            let (val, next_i) = scan_squash(json, i);
            (json_from_slice(val, kind), next_i)
        }
        b'-' | b'0'..=b'9' => {
            let (val, info, next_i) = scan_number(json, i);
            (json_from_slice(val, info | INFO_NUMBER), next_i)
        }
        b't' | b'f' | b'n' => {
            let s = i;
            let (n, kind) = match json[i] {
                b't' => (4, INFO_TRUE),
                b'f' => (5, INFO_FALSE),
                _ => (4, INFO_NULL),
            };
            if i + n > json.len() {
                return (Value::default(), json.len());
            }
            i += n;
            (json_from_slice(&json[s..i], kind), i)
        }
        // unknown character
        _ => (Value::default(), json.len()),
    }
}

/// Validates the json and returns the root value.
///
/// Leading and trailing whitespace is not part of the returned value.
///
/// ```json
///  {"name": {"first": "Tom"}, "children": ["Sara","Alex"]}
/// ```
///
/// ```text
///  parse(json)?.member("name")       >> {"first": "Tom"}
///  parse(json)?.member("children")   >> ["Sara","Alex"]
/// ```
pub fn parse(json: &str) -> Result<Value<'_>> {
    validate(json.as_bytes())?;
    let bytes = json.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] <= b' ' {
        i += 1;
    }
    // validate() rejects input with no value, so i is in range.
    let (root, _) = proc_value(bytes, i);
    tracing::debug!(kind = %root.kind(), bytes = root.json().len(), "parsed json");
    Ok(root)
}
