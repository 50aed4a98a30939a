// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use std::io::BufRead;

use crate::Result;

/// Where the json text ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// The whole stream is one document.
    Document,
    /// Only the first line is read, the rest of the stream is left alone.
    FirstLine,
}

/// Reads the json text from `reader`.
///
/// Input that is not utf8 is reported as an io error.
pub fn read_input<R: BufRead>(mut reader: R, mode: InputMode) -> Result<String> {
    let mut text = String::new();
    let n = match mode {
        InputMode::Document => reader.read_to_string(&mut text)?,
        InputMode::FirstLine => reader.read_line(&mut text)?,
    };
    tracing::debug!(?mode, bytes = n, "read input");
    Ok(text)
}

#[cfg(test)]
mod test {
    use super::{read_input, InputMode};
    use crate::Error;

    #[test]
    fn modes() {
        let input = "{\"a\":\n1}\nsecond line\n";
        let text = read_input(input.as_bytes(), InputMode::Document).unwrap();
        assert_eq!(text, input);
        let text = read_input(input.as_bytes(), InputMode::FirstLine).unwrap();
        assert_eq!(text, "{\"a\":\n");
        let text = read_input("no newline".as_bytes(), InputMode::FirstLine).unwrap();
        assert_eq!(text, "no newline");
        let text = read_input("".as_bytes(), InputMode::FirstLine).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn not_utf8() {
        let input: &[u8] = b"\"\xff\"";
        match read_input(input, InputMode::Document) {
            Err(Error::Io(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
