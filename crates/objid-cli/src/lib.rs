// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Command implementations behind the `objid` binary.
//!
//! Kept as a library so the commands can be tested without spawning the
//! binary.

pub mod commands;
pub mod diagnostic;
