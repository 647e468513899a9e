// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod builder;
pub mod calls;
pub mod flags;
pub mod framing;
pub mod instruction;
pub mod leg;
pub mod offsets;
pub mod split;

pub use builder::{BuilderConfig, ExecutorBytecodeBuilder};
pub use split::SplitRouteBuilder;
