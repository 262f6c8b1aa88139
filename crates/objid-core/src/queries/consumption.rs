// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Id consumption against an app's id ranges.
//!
//! An app declares the ranges its object ids may come from. Consumption
//! data records, per object kind, the ids already handed out. When the
//! consumed count for a kind approaches the number of ids available, a
//! [`ConsumptionWarning`] is raised:
//!
//! - with 5 or fewer ids left, always
//! - at 95% consumption, when more than 5 are left
//! - never while more than 25 are left
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use objid_core::queries::consumption::{IdRange, check_remaining};
//!
//! let ranges = [IdRange::new(50100, 50109)];
//! let consumption = BTreeMap::from([("codeunit".to_string(), (50100..50106).collect::<Vec<_>>())]);
//!
//! let warnings = check_remaining(&ranges, &consumption);
//! assert_eq!(warnings[0].remaining, 4);
//! ```

use std::collections::BTreeMap;

use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// An inclusive range of ids an app may assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    /// First id in the range.
    pub from: u32,
    /// Last id in the range.
    pub to: u32,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IdRange {
    /// Creates a range without a description.
    #[must_use]
    pub const fn new(from: u32, to: u32) -> Self {
        Self {
            from,
            to,
            description: None,
        }
    }

    /// Returns `true` if `id` lies in the range.
    #[must_use]
    pub const fn contains(&self, id: u32) -> bool {
        self.from <= id && id <= self.to
    }

    /// Number of ids in the range; a reversed range still counts as one.
    #[must_use]
    pub const fn id_count(&self) -> u64 {
        self.to.saturating_sub(self.from) as u64 + 1
    }
}

/// A kind whose remaining ids are running low.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumptionWarning {
    /// Object kind the consumption was recorded under.
    pub kind: EcoString,
    /// Consumed ids that fall inside the app's ranges.
    pub consumed: u64,
    /// Ids still available.
    pub remaining: u64,
}

/// Returns `true` if `id` lies in any of `ranges`.
#[must_use]
pub fn in_any_range(ranges: &[IdRange], id: u32) -> bool {
    ranges.iter().any(|range| range.contains(id))
}

/// Total number of ids across `ranges`.
#[must_use]
pub fn available_ids(ranges: &[IdRange]) -> u64 {
    ranges.iter().map(IdRange::id_count).sum()
}

/// Consumed count at or above which a warning is raised.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    reason = "id counts are bounded by u32 ranges and fit in an f64 mantissa"
)]
pub fn warning_threshold(available: u64) -> f64 {
    let available = available as f64;
    (available * 0.95).min(available - 5.0).max(available - 25.0)
}

/// Checks every kind in `consumption` against the ids `ranges` make available.
///
/// Only consumed ids inside a range count. Warnings are sorted by kind. An
/// app without ranges has nothing to run out of and yields no warnings.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    reason = "consumed counts are bounded by the number of ids in u32 ranges"
)]
pub fn check_remaining(
    ranges: &[IdRange],
    consumption: &BTreeMap<String, Vec<u32>>,
) -> Vec<ConsumptionWarning> {
    if ranges.is_empty() {
        return Vec::new();
    }
    let available = available_ids(ranges);
    let threshold = warning_threshold(available);

    consumption
        .iter()
        .filter_map(|(kind, ids)| {
            let consumed = ids.iter().filter(|&&id| in_any_range(ranges, id)).count() as u64;
            (consumed as f64 >= threshold).then(|| ConsumptionWarning {
                kind: kind.as_str().into(),
                consumed,
                remaining: available.saturating_sub(consumed),
            })
        })
        .collect()
}
