//! Generation parameters and their sanitizing rules.
//!
//! Out-of-range values are corrected to documented defaults with a logged
//! warning; construction never fails on bad tuning input.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::heightmap::CELLS_PER_UNIT;

/// Deepest recursion the eagerly built fractal tree accepts. The tree
/// arena grows O(4^detail) nodes, so this is a hard memory bound.
pub const MAX_PREBUILT_DETAIL: u32 = 8;
/// Deepest recursion for the on-the-fly fractal variants.
pub const MAX_RECURSION_DETAIL: u32 = 16;
/// Most noise octaves a map will sum; octave `d` allocates a
/// `(2^d + 1)²` lattice of floats.
pub const MAX_NOISE_DETAIL: u32 = 12;

/// Map-wide parameters shared by every generator kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapParams {
    /// Map width in map units of 64 cells. Default 4.
    pub width: u32,
    /// Map height in map units of 64 cells. Default 4.
    pub height: u32,
    /// Base terrain level the corner heights deviate around. Default 50.
    pub level: i32,
    /// Number of 3x3 blur passes over the finished map. Default 1.
    pub blur: u32,
    /// Master seed; `None` derives a fresh one from the system clock.
    pub seed: Option<u64>,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            level: 50,
            blur: 1,
            seed: None,
        }
    }
}

impl MapParams {
    /// Samples per row: one per cell corner, including the far border.
    pub fn sample_width(&self) -> u32 {
        self.width * CELLS_PER_UNIT + 1
    }

    /// Sample rows, including the far border.
    pub fn sample_height(&self) -> u32 {
        self.height * CELLS_PER_UNIT + 1
    }

    /// Outermost sample x coordinate (the right corner column).
    pub fn span_x(&self) -> f32 {
        (self.width * CELLS_PER_UNIT) as f32
    }

    /// Outermost sample y coordinate (the bottom corner row).
    pub fn span_y(&self) -> f32 {
        (self.height * CELLS_PER_UNIT) as f32
    }

    /// The master seed, falling back to a clock-derived one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Correct out-of-range values, warning about every correction.
    pub fn sanitized(mut self) -> Self {
        if self.width < 1 {
            warn!("map width {} is below 1 unit, using 1", self.width);
            self.width = 1;
        }
        if self.height < 1 {
            warn!("map height {} is below 1 unit, using 1", self.height);
            self.height = 1;
        }
        self
    }
}

/// Tuning for the fractal triangle-grid generators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalParams {
    /// Subdivision recursion depth. Default 6.
    pub detail: u32,
    /// Deviation scale in `[0, 1]`; larger values jag the terrain. Default 0.5.
    pub steepness: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            detail: 6,
            steepness: 0.5,
        }
    }
}

impl FractalParams {
    /// Correct out-of-range values against the variant's recursion
    /// bound, warning about every correction.
    pub fn sanitized(mut self, max_detail: u32) -> Self {
        if self.detail > max_detail {
            warn!(
                "fractal detail {} exceeds the supported depth, using {max_detail}",
                self.detail
            );
            self.detail = max_detail;
        }
        if !(0.0..=1.0).contains(&self.steepness) {
            warn!("steepness {} is outside [0, 1], using 0.5", self.steepness);
            self.steepness = 0.5;
        }
        self
    }
}

/// Tuning for the octave-noise generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    /// Number of octaves to sum. Default 6.
    pub detail: u32,
    /// Per-octave amplitude falloff in `[0, 1]`. Default 0.5.
    pub roughness: f32,
    /// Lowest height of the adjusted range. Default 0.
    pub bottom: i32,
    /// Highest height of the adjusted range. Default 255.
    pub peak: i32,
    /// Fraction of the map at or below sea level, in `[0, 1]`. Default 0.2.
    pub water: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            detail: 6,
            roughness: 0.5,
            bottom: 0,
            peak: 255,
            water: 0.2,
        }
    }
}

impl NoiseParams {
    /// Correct out-of-range values, warning about every correction.
    pub fn sanitized(mut self) -> Self {
        if self.detail > MAX_NOISE_DETAIL {
            warn!(
                "noise detail {} exceeds the supported octave count, using {MAX_NOISE_DETAIL}",
                self.detail
            );
            self.detail = MAX_NOISE_DETAIL;
        }
        if !(0.0..=1.0).contains(&self.roughness) {
            warn!("roughness {} is outside [0, 1], using 0.5", self.roughness);
            self.roughness = 0.5;
        }
        if !(0..=255).contains(&self.bottom) {
            warn!("bottom {} is outside [0, 255], using 0", self.bottom);
            self.bottom = 0;
        }
        if self.peak > 255 || self.peak < self.bottom {
            warn!(
                "peak {} is outside [{}, 255], using 255",
                self.peak, self.bottom
            );
            self.peak = 255;
        }
        if !(0.0..=1.0).contains(&self.water) {
            warn!("water fraction {} is outside [0, 1], using 0.2", self.water);
            self.water = 0.2;
        }
        self
    }
}

/// Seed derived from the system clock, for runs that want fresh terrain.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
