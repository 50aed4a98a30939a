// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use std::num::IntErrorKind;

use crate::{Error, Result};

/// The directive that prints the length of the cursor.
pub const LEN: &str = "--len";

/// One decoded path argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step<'s> {
    /// `--len`: stop and report the length of the cursor.
    Len,
    /// `[N]`: move to the N-th element. Negative positions count from the
    /// end.
    Index(i64),
    /// Any other argument: move to the object member with this name.
    Key(&'s str),
}

impl<'s> Step<'s> {
    /// Decodes a single argument.
    ///
    /// An argument is an index when its first character is `[`. Whatever sits
    /// between that first character and the last one is read as the
    /// position, so `[3]` and `[ 3 ]` agree and `[3` reads as an empty
    /// position. Integers too large for an `i64` saturate, which leaves them
    /// out of range of any value.
    pub fn parse(arg: &'s str) -> Result<Step<'s>> {
        if arg == LEN {
            return Ok(Step::Len);
        }
        let Some(rest) = arg.strip_prefix('[') else {
            return Ok(Step::Key(arg));
        };
        let mut inner = rest.chars();
        inner.next_back();
        match inner.as_str().trim().parse::<i64>() {
            Ok(index) => Ok(Step::Index(index)),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Ok(Step::Index(i64::MAX)),
                IntErrorKind::NegOverflow => Ok(Step::Index(i64::MIN)),
                _ => Err(Error::BadIndex {
                    selector: arg.to_owned(),
                    source: err,
                }),
            },
        }
    }
}

/// Maps a possibly negative position onto `0..len`.
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let pos = if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)?
    } else {
        usize::try_from(index).ok()?
    };
    (pos < len).then_some(pos)
}

#[cfg(test)]
mod test {
    use super::{resolve_index, Step};
    use crate::Error;

    #[test]
    fn steps() {
        assert_eq!(Step::parse("--len").unwrap(), Step::Len);
        assert_eq!(Step::parse("name").unwrap(), Step::Key("name"));
        assert_eq!(Step::parse("").unwrap(), Step::Key(""));
        assert_eq!(Step::parse("--readstring").unwrap(), Step::Key("--readstring"));
        assert_eq!(Step::parse("a[0]").unwrap(), Step::Key("a[0]"));
        assert_eq!(Step::parse("[0]").unwrap(), Step::Index(0));
        assert_eq!(Step::parse("[12]").unwrap(), Step::Index(12));
        assert_eq!(Step::parse("[-1]").unwrap(), Step::Index(-1));
        assert_eq!(Step::parse("[+2]").unwrap(), Step::Index(2));
        assert_eq!(Step::parse("[ 3 ]").unwrap(), Step::Index(3));
        // the closing character is dropped whatever it is
        assert_eq!(Step::parse("[45").unwrap(), Step::Index(4));
        assert_eq!(Step::parse("[7é").unwrap(), Step::Index(7));
    }

    #[test]
    fn oversized_index() {
        let huge = Step::parse("[99999999999999999999]").unwrap();
        assert_eq!(huge, Step::Index(i64::MAX));
        assert_eq!(
            Step::parse("[9223372036854775808]").unwrap(),
            Step::Index(i64::MAX)
        );
        let tiny = Step::parse("[-99999999999999999999]").unwrap();
        assert_eq!(tiny, Step::Index(i64::MIN));
        for step in [huge, tiny] {
            match step {
                Step::Index(index) => assert_eq!(resolve_index(index, 1000), None),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn bad_index() {
        for arg in ["[", "[]", "[x]", "[1.5]", "[3"] {
            match Step::parse(arg) {
                Err(Error::BadIndex { selector, .. }) => assert_eq!(selector, arg),
                other => panic!("{}: unexpected {:?}", arg, other),
            }
        }
    }

    #[test]
    fn positions() {
        assert_eq!(resolve_index(0, 3), Some(0));
        assert_eq!(resolve_index(2, 3), Some(2));
        assert_eq!(resolve_index(3, 3), None);
        assert_eq!(resolve_index(0, 0), None);
        assert_eq!(resolve_index(-1, 3), Some(2));
        assert_eq!(resolve_index(-3, 3), Some(0));
        assert_eq!(resolve_index(-4, 3), None);
        assert_eq!(resolve_index(i64::MIN, 3), None);
        assert_eq!(resolve_index(i64::MAX, 3), None);
    }
}
