// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Searching for the largest font scale whose layout fits its constraints.

use crate::builder::AttributedString;
use crate::config::clamp_font_scale;
use crate::layout::{LayoutMeasurer, LayoutResult, MeasureRequest};

/// Upper bound on candidate measurements after the full-size one.
pub const MAX_ITERATIONS: u32 = 16;

/// The search stops once the interval of candidate scales is narrower than this.
pub const SCALE_EPSILON: f32 = 0.001;

/// What the scale search settled on.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOutcome {
    /// The chosen layout.
    pub result: LayoutResult,
    /// Candidate measurements made after the full-size one.
    pub iterations: u32,
    /// The chosen layout fits; `false` only when even the floor does not.
    pub fits: bool,
}

/// Shrinks text by bisecting the font scale between a floor and 1.0.
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveFontScaler<'a> {
    measurer: LayoutMeasurer<'a>,
}

impl<'a> AdaptiveFontScaler<'a> {
    /// Creates a scaler that measures with `measurer`.
    pub fn new(measurer: LayoutMeasurer<'a>) -> Self {
        Self { measurer }
    }

    /// Finds the largest scale in `[floor, 1.0]` at which `string` fits.
    ///
    /// The scale in `request` is ignored. If the full-size layout already fits it is
    /// returned as is. If the layout at the floor does not fit either, the floor layout is
    /// returned with `fits` unset; it may be truncated.
    pub fn fit(
        &self,
        string: &AttributedString,
        request: &MeasureRequest,
        floor: f32,
    ) -> ScaleOutcome {
        let floor = clamp_font_scale(floor);
        let constraints = request.constraints;
        let full = self.measurer.measure(string, &request.at_scale(1.0));
        let full_fits = full.fits(constraints);
        if full_fits || floor >= 1.0 {
            return ScaleOutcome {
                result: full,
                iterations: 0,
                fits: full_fits,
            };
        }

        let at_floor = self.measurer.measure(string, &request.at_scale(floor));
        let mut iterations = 1;
        if !at_floor.fits(constraints) {
            log::debug!("text does not fit even at scale {floor}, keeping the floor layout");
            return ScaleOutcome {
                result: at_floor,
                iterations,
                fits: false,
            };
        }

        let (mut low, mut high) = (floor, 1.0_f32);
        let mut best = at_floor;
        while iterations < MAX_ITERATIONS && high - low > SCALE_EPSILON {
            let mid = (low + high) * 0.5;
            let candidate = self.measurer.measure(string, &request.at_scale(mid));
            iterations += 1;
            if candidate.fits(constraints) {
                low = mid;
                best = candidate;
            } else {
                high = mid;
            }
        }
        log::trace!("settled on scale {low} after {iterations} candidates");
        ScaleOutcome {
            result: best,
            iterations,
            fits: true,
        }
    }
}
