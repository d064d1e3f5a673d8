//! Post-processing stages applied to a finished raw heightmap.
//!
//! Stage order is fixed by the generator: blur, then (noise terrain
//! only) water remap and height-band quantization. `adjust_min_max` is
//! a standalone normalization utility on the same buffer type.

use tracing::{debug, warn};

use crate::heightmap::{Heightmap, MAX_HEIGHT, MIN_HEIGHT};

/// Height at which the colorizer switches from water to land.
pub const SEA_LEVEL: u8 = 83;

/// Height bands collapsed into plateaus, ending in a terminator band so
/// the walk below can always look one band ahead.
const BANDS: [LevelBand; 2] = [
    LevelBand {
        start: 85,
        end: 255,
    },
    LevelBand {
        start: 255,
        end: 255,
    },
];

#[derive(Clone, Copy)]
struct LevelBand {
    start: u8,
    end: u8,
}

/// Run `passes` rounds of a 3x3 box filter over the interior samples.
///
/// Border samples are never touched, and each pass reads neighbors that
/// the same pass already wrote. Maps too small to have an interior are
/// returned unchanged.
pub fn blur(map: &mut Heightmap, passes: u32) {
    if map.width() < 3 || map.height() < 3 {
        return;
    }
    debug!(passes, "blurring heightmap");
    for _ in 0..passes {
        for y in 1..map.height() - 1 {
            for x in 1..map.width() - 1 {
                let mut sum: u32 = 0;
                for yy in y - 1..=y + 1 {
                    for xx in x - 1..=x + 1 {
                        sum += u32::from(map.get(xx, yy));
                    }
                }
                map.set(x, y, (sum / 9) as u8);
            }
        }
    }
}

/// Remap heights so the configured fraction of the map sits below the
/// sea level used by the colorizer.
///
/// The sample at the water-fraction rank becomes the water height `w`;
/// a quadratic through `(0, 0)`, `(w, 83)` and `(255, 255)` is then
/// applied to every sample, which moves the water line while keeping
/// the extremes pinned. A water height of 0 or 255 makes the system
/// singular; the remap is skipped with a warning in that case.
pub fn remap_water(map: &mut Heightmap, fraction: f32) {
    let mut sorted: Vec<u8> = map.samples().to_vec();
    sorted.sort_unstable();
    let total = sorted.len();
    if total == 0 {
        return;
    }
    let rank = ((total as f32 * fraction) as usize).min(total - 1);
    let water = f32::from(sorted[rank]);
    let denominator = water * water - MAX_HEIGHT * water;
    if denominator == 0.0 {
        warn!(water, "water level is degenerate, skipping remap");
        return;
    }
    let a = (f32::from(SEA_LEVEL) - water) / denominator;
    let b = (water * water - MAX_HEIGHT * f32::from(SEA_LEVEL)) / denominator;
    debug!(rank, water, a, b, "remapping water level");
    for sample in map.samples_mut() {
        let height = f32::from(*sample);
        let value = a * height * height + b * height;
        *sample = value.round().clamp(MIN_HEIGHT, MAX_HEIGHT) as u8;
    }
}

/// Collapse the configured height bands into flat plateaus.
///
/// Samples are walked in sorted order; passing a band's upper bound
/// adds that band's span to the running cutoff, which is subtracted
/// from every later sample so terrain above a collapsed band comes
/// down by the height the band removed. The configured band ends at
/// the peak, so no cutoff accumulates and the peak is preserved.
pub fn quantize_levels(map: &mut Heightmap) {
    let mut order: Vec<(u8, usize)> = map
        .samples()
        .iter()
        .copied()
        .enumerate()
        .map(|(pos, value)| (value, pos))
        .collect();
    order.sort_unstable();

    let mut band = 0;
    let mut cutoff: u32 = 0;
    for (value, pos) in order {
        let mut height = value;
        if height > BANDS[band].end && band + 1 < BANDS.len() {
            cutoff += u32::from(BANDS[band].end - BANDS[band].start);
            band += 1;
        }
        if height > BANDS[band].start && height < BANDS[band].end {
            height = BANDS[band].start;
        }
        map.samples_mut()[pos] = u32::from(height).saturating_sub(cutoff) as u8;
    }
    debug!(cutoff, "height bands collapsed");
}

/// Rescale the sample range onto `[bottom, peak]`.
///
/// A flat map has no range to scale and is set to `bottom` wholesale.
pub fn adjust_min_max(map: &mut Heightmap, bottom: u8, peak: u8) {
    let (min, max) = map.min_max();
    if min == max {
        for sample in map.samples_mut() {
            *sample = bottom;
        }
        return;
    }
    let factor = (f32::from(peak) - f32::from(bottom)) / (f32::from(max) - f32::from(min));
    for sample in map.samples_mut() {
        let value = (f32::from(*sample) - f32::from(min)) * factor + f32::from(bottom);
        *sample = value.round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from(width: u32, height: u32, samples: Vec<u8>) -> Heightmap {
        Heightmap::from_raw(width, height, samples).unwrap()
    }

    #[test]
    fn test_blur_zero_passes_is_a_noop() {
        let mut map = map_from(3, 3, vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        let original = map.clone();
        blur(&mut map, 0);
        assert_eq!(map, original);
    }

    #[test]
    fn test_blur_skips_maps_without_interior() {
        let mut map = map_from(2, 2, vec![10, 20, 30, 40]);
        let original = map.clone();
        blur(&mut map, 3);
        assert_eq!(map, original);
    }

    #[test]
    fn test_blur_averages_in_place() {
        // One bright sample in a dark field. The second interior sample
        // is averaged after its left neighbor was already rewritten, so
        // it sees 10, not 90.
        let mut map = map_from(4, 3, vec![0; 12]);
        map.set(1, 1, 90);
        blur(&mut map, 1);
        assert_eq!(map.get(1, 1), 10, "First interior sample averages the raw 90");
        assert_eq!(map.get(2, 1), 1, "Second interior sample sees the blurred 10");
    }

    #[test]
    fn test_blur_leaves_borders_untouched() {
        let mut map = map_from(3, 3, vec![200; 9]);
        map.set(1, 1, 20);
        blur(&mut map, 1);
        assert_eq!(map.get(0, 0), 200);
        assert_eq!(map.get(2, 0), 200);
        assert_eq!(map.get(0, 2), 200);
        assert_eq!(map.get(1, 0), 200);
        assert_eq!(map.get(1, 1), 180, "Interior should average to 1620 / 9");
    }

    #[test]
    fn test_remap_water_pins_anchor_points() {
        // 16 evenly spaced heights; the 0.25 rank lands on 68, which the
        // quadratic must carry to the sea level while 0 and 255 stay.
        let samples: Vec<u8> = (0..16).map(|i| i * 17).collect();
        let mut map = map_from(4, 4, samples);
        remap_water(&mut map, 0.25);
        assert_eq!(map.samples()[0], 0);
        assert_eq!(map.samples()[4], SEA_LEVEL);
        assert_eq!(map.samples()[15], 255);
    }

    #[test]
    fn test_remap_water_moves_the_configured_fraction_below_sea_level() {
        let samples: Vec<u8> = (0..16).map(|i| i * 17).collect();
        let mut map = map_from(4, 4, samples);
        remap_water(&mut map, 0.25);
        let below = map.samples().iter().filter(|&&s| s <= SEA_LEVEL).count();
        // Ranks 0..=4 sit at or below the remapped water height.
        assert_eq!(below, 5);
    }

    #[test]
    fn test_remap_water_skips_flat_water_level() {
        let mut map = map_from(3, 3, vec![0; 9]);
        let original = map.clone();
        remap_water(&mut map, 0.5);
        assert_eq!(map, original, "A water height of 0 must leave the map alone");
    }

    #[test]
    fn test_remap_water_skips_full_water_fraction_at_peak() {
        let mut map = map_from(3, 3, vec![0, 10, 20, 30, 40, 50, 60, 70, 255]);
        let original = map.clone();
        remap_water(&mut map, 1.0);
        assert_eq!(map, original, "A water height of 255 must leave the map alone");
    }

    #[test]
    fn test_quantize_levels_collapses_the_band() {
        let mut map = map_from(3, 3, vec![0, 50, 84, 85, 86, 120, 254, 255, 255]);
        quantize_levels(&mut map);
        assert_eq!(
            map.samples(),
            &[0, 50, 84, 85, 85, 85, 85, 255, 255],
            "Strict interior of the band flattens to its start; bounds stay"
        );
    }

    #[test]
    fn test_adjust_min_max_rescales_to_target() {
        let mut map = map_from(3, 1, vec![10, 60, 110]);
        adjust_min_max(&mut map, 0, 255);
        assert_eq!(map.samples(), &[0, 128, 255]);
    }

    #[test]
    fn test_adjust_min_max_is_idempotent() {
        let mut map = map_from(3, 3, vec![12, 40, 99, 0, 255, 31, 77, 200, 160]);
        adjust_min_max(&mut map, 20, 220);
        let once = map.clone();
        adjust_min_max(&mut map, 20, 220);
        assert_eq!(map, once);
    }

    #[test]
    fn test_adjust_min_max_flattens_degenerate_input() {
        let mut map = map_from(2, 2, vec![7; 4]);
        adjust_min_max(&mut map, 40, 200);
        assert_eq!(map.samples(), &[40; 4]);
    }
}
