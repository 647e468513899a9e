// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod app;
pub mod common;
pub mod domain;
pub mod services;

pub use domain::error::AppError;
pub use domain::route::{Leg, LegCallTemplate, Route, RouteRequest, WrapUnwrapTemplates};
pub use services::bytecode::{BuilderConfig, ExecutorBytecodeBuilder, SplitRouteBuilder};
