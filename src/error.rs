// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

use crate::Kind;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that stop an evaluation.
///
/// A path that does not resolve is not an error, see `Outcome::NotFound`.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a single valid json value.
    #[error("invalid json at line {line}, column {column}")]
    Syntax {
        offset: usize,
        line: usize,
        column: usize,
    },

    /// An index selector whose brackets do not hold an integer.
    #[error("invalid index selector {selector:?}")]
    BadIndex {
        selector: String,
        #[source]
        source: ParseIntError,
    },

    /// `--len` or an index selector applied to a value without a length.
    #[error("{kind} value has no length")]
    NoLength { kind: Kind },

    /// An index selector applied to an object.
    #[error("{kind} value cannot be indexed by position")]
    NotIndexable { kind: Kind },

    #[error(transparent)]
    Io(#[from] io::Error),
}
