// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

// String helpers shared by the value model, exposed for callers that build
// or read json strings themselves.

pub use super::util::{escape, unescape};
