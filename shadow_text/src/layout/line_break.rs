// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use alloc::vec::Vec;
use core::ops::Range;

use super::analysis::Cluster;

/// Slack for accumulated float error when comparing advances against the line width.
pub(crate) const WIDTH_EPSILON: f32 = 1e-3;

/// Why a line ended where it did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreakReason {
    /// End of a paragraph.
    #[default]
    None,
    /// At a break opportunity.
    Regular,
    /// Inside a word that was too long for the line.
    Emergency,
}

/// Splits a paragraph's clusters into lines no wider than `max_advance`.
///
/// Trailing whitespace hangs past the edge and never forces a break. A cluster that is
/// wider than the line on its own still gets a line of its own.
pub(crate) fn break_lines(
    clusters: &[Cluster],
    max_advance: f32,
) -> Vec<(Range<usize>, BreakReason)> {
    let mut lines = Vec::new();
    let mut start = 0;
    while start < clusters.len() {
        let mut x = 0.0;
        let mut last_opportunity = None;
        let mut end = clusters.len();
        let mut reason = BreakReason::None;
        for (ix, cluster) in clusters.iter().enumerate().skip(start) {
            if ix > start && cluster.break_before {
                last_opportunity = Some(ix);
            }
            if !cluster.whitespace
                && ix > start
                && x + cluster.advance > max_advance + WIDTH_EPSILON
            {
                (end, reason) = match last_opportunity {
                    Some(opportunity) => (opportunity, BreakReason::Regular),
                    None => (ix, BreakReason::Emergency),
                };
                break;
            }
            x += cluster.advance;
        }
        lines.push((start..end, reason));
        start = end;
    }
    lines
}

/// Width of `clusters` without trailing whitespace.
pub(crate) fn visible_width(clusters: &[Cluster]) -> f32 {
    let end = clusters
        .iter()
        .rposition(|c| !c.whitespace)
        .map_or(0, |ix| ix + 1);
    clusters[..end].iter().map(|c| c.advance).sum()
}
