// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Queries over scanned declarations.
//!
//! Each module answers one question a front end asks about the objects in a
//! project:
//!
//! - [`consumption`] - Are the app's id ranges about to run out?
//! - [`diagnostic_provider`] - Which declared ids need attention?
//!
//! Queries are pure functions over data the caller already holds. Fetching
//! consumption data from a back end is the caller's concern.

pub mod consumption;
pub mod diagnostic_provider;
mod diagnostics;

pub use diagnostics::{Diagnostic, Severity};
