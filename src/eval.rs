// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use tracing::{debug, trace};

use crate::selector::resolve_index;
use crate::{Error, Result, Step, Value};

/// What a path evaluated to.
#[derive(Debug)]
pub enum Outcome<'a> {
    /// Every selector resolved. Holds the final cursor.
    Value(Value<'a>),
    /// A `--len` directive was reached.
    Len(usize),
    /// A key was missing or an index was out of range.
    NotFound,
}

/// Walks `args` from `root`, one step per argument.
///
/// Arguments are decoded as they are reached, so anything after a `--len`
/// or after the first selector that does not resolve is never looked at.
///
/// ```text
///  {"a":[1,2,3]}   a [1]     >> Value(2)
///  {"a":[1,2,3]}   a --len   >> Len(3)
///  {"a":[1,2,3]}   b         >> NotFound
///  {"a":[1,2,3]}   a [3]     >> NotFound
/// ```
pub fn evaluate<'a, I, S>(root: Value<'a>, args: I) -> Result<Outcome<'a>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cursor = root;
    for arg in args {
        let arg = arg.as_ref();
        let step = Step::parse(arg)?;
        trace!(?step, kind = %cursor.kind(), "step");
        let kind = cursor.kind();
        let next = match step {
            Step::Len => {
                let len = cursor.len().ok_or(Error::NoLength { kind })?;
                debug!(len, "length");
                return Ok(Outcome::Len(len));
            }
            Step::Index(index) => {
                let len = cursor.len().ok_or(Error::NoLength { kind })?;
                match resolve_index(index, len) {
                    Some(pos) => Some(
                        cursor
                            .element(pos)
                            .ok_or(Error::NotIndexable { kind })?,
                    ),
                    None => None,
                }
            }
            Step::Key(key) => cursor.member(key),
        };
        match next {
            Some(value) => cursor = value,
            None => {
                debug!(selector = arg, "path not found");
                return Ok(Outcome::NotFound);
            }
        }
    }
    debug!(kind = %cursor.kind(), "path resolved");
    Ok(Outcome::Value(cursor))
}
