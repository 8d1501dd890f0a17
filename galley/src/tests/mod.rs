// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_line;
mod test_split;
mod utils;
