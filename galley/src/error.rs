// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors reported at the engine boundary.
///
/// These cover contract violations only. Recoverable problems inside a
/// paragraph (unknown control characters, shaping failures) are handled
/// locally and never surface here.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The typesetter was constructed without any input runs.
    #[error("run stream is empty")]
    EmptySource,
    /// A run carries a style the width collaborator cannot service.
    #[error("run {0} has an invalid style: font size must be finite and positive")]
    InvalidStyle(usize),
    /// `next_line` was asked for a width no line can be fitted to.
    #[error("line width must be finite and positive, got {0}")]
    InvalidWidth(f32),
}
