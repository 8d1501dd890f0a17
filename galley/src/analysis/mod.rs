// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-paragraph text analysis: embedding levels, Arabic shaping and
//! glyph mirroring.

pub(crate) mod arabic;
pub(crate) mod bidi;
pub(crate) mod mirror;

pub use arabic::{DigitSet, DigitShaping};
pub use bidi::Direction;
