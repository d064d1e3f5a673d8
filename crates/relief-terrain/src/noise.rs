//! Multi-octave lattice value noise.
//!
//! Each octave doubles the lattice frequency and scales amplitude down by
//! `roughness^octave`; lattice values are drawn from the generator's owned
//! seeded source, so the whole field is a pure function of the master seed.

use relief_math::bilinear_hermite;
use tracing::debug;

use crate::heightmap::HeightField;
use crate::params::{MapParams, NoiseParams};
use crate::seed::SeededSource;

/// Octave-summed lattice value noise over the map rectangle.
pub struct OctaveNoise {
    map: MapParams,
    params: NoiseParams,
    seed: u64,
}

impl OctaveNoise {
    /// Generator over the sample grid of `map`, driven by `seed`.
    pub fn new(map: MapParams, params: NoiseParams, seed: u64) -> Self {
        Self { map, params, seed }
    }

    /// Fraction of the map the water remap stage should submerge.
    pub fn water_fraction(&self) -> f32 {
        self.params.water
    }

    /// Synthesize the raw float field: all octaves summed, range
    /// adjusted onto the configured bottom/peak, not yet quantized.
    /// Each call starts from a freshly seeded source, so repeated
    /// synthesis is as reproducible as a fresh generator.
    pub fn raw_field(&self) -> HeightField {
        let mut source = SeededSource::new(self.seed);
        let mut field = HeightField::new(self.map.sample_width(), self.map.sample_height());
        for octave in 0..self.params.detail {
            let frequency = 1u32 << octave;
            let amplitude = self.params.roughness.powi(octave as i32);
            debug!("octave {octave}: frequency {frequency}, amplitude {amplitude:.4}");
            let lattice = Lattice::draw(&mut source, frequency, amplitude);
            lattice.accumulate(&mut field);
        }
        adjust_field_range(&mut field, self.params.bottom as f32, self.params.peak as f32);
        field
    }
}

/// One octave's `(frequency + 1)²` lattice of independent random values.
struct Lattice {
    frequency: u32,
    values: Vec<f32>,
}

impl Lattice {
    /// Draw all lattice values, uniform in `[-amplitude, +amplitude]`.
    fn draw(source: &mut SeededSource, frequency: u32, amplitude: f32) -> Self {
        let side = (frequency + 1) as usize;
        let mut values = Vec::with_capacity(side * side);
        for _ in 0..side * side {
            values.push((source.unit() * 2.0 - 1.0) * amplitude);
        }
        Self { frequency, values }
    }

    fn value(&self, gx: u32, gy: u32) -> f32 {
        self.values[(gy * (self.frequency + 1) + gx) as usize]
    }

    /// Add this octave's Hermite-smoothed bilinear samples into the field.
    fn accumulate(&self, field: &mut HeightField) {
        let width = field.width();
        let height = field.height();
        // One lattice cell spans (width-1)/frequency samples; the far
        // border sample lands exactly on the last lattice line.
        let step_x = self.frequency as f32 / (width - 1) as f32;
        let step_y = self.frequency as f32 / (height - 1) as f32;
        for y in 0..height {
            let (cy, wy) = split_cell(y as f32 * step_y, self.frequency);
            for x in 0..width {
                let (cx, wx) = split_cell(x as f32 * step_x, self.frequency);
                let blended = bilinear_hermite(
                    self.value(cx, cy),
                    self.value(cx + 1, cy),
                    self.value(cx, cy + 1),
                    self.value(cx + 1, cy + 1),
                    wx,
                    wy,
                );
                field.add(x, y, blended);
            }
        }
    }
}

/// Split a lattice-space coordinate into cell index and intra-cell
/// fraction. The far border sits on the last lattice line and is kept
/// inside the last cell with fraction 1.
fn split_cell(g: f32, frequency: u32) -> (u32, f32) {
    let cell = (g as u32).min(frequency - 1);
    (cell, g - cell as f32)
}

/// Shift/scale the field per the noise range rules: negative minima are
/// shifted up to zero, the span is scaled by `peak / (max - min)` and
/// everything is lifted by `bottom`. A flat field pins to `bottom`.
pub(crate) fn adjust_field_range(field: &mut HeightField, bottom: f32, peak: f32) {
    let (min, max) = field.min_max();
    if max - min <= f32::EPSILON {
        debug!("flat noise field, pinning to bottom {bottom}");
        for sample in field.samples_mut() {
            *sample = bottom;
        }
        return;
    }
    let shift = if min < 0.0 { -min } else { 0.0 };
    let factor = peak / (max - min);
    debug!("noise range [{min:.3}, {max:.3}], shift {shift:.3}, factor {factor:.4}");
    for sample in field.samples_mut() {
        *sample = (*sample + shift) * factor + bottom;
    }
}
