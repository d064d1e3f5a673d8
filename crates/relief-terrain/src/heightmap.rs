//! Row-major elevation buffers.

/// Lowest representable terrain height.
pub const MIN_HEIGHT: f32 = 0.0;
/// Highest representable terrain height (the 8-bit raster ceiling).
pub const MAX_HEIGHT: f32 = 255.0;
/// Terrain cells per map unit along one axis.
pub const CELLS_PER_UNIT: u32 = 64;

/// Finished 8-bit heightmap: row-major samples, one per cell corner,
/// including the far border row and column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heightmap {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl Heightmap {
    /// Zero-filled heightmap with the given sample dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Rebuild a heightmap from raw row-major samples, or `None` when
    /// the buffer length does not match the dimensions.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Option<Self> {
        if samples.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            samples,
        })
    }

    /// Samples per row.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.samples[(y * self.width + x) as usize]
    }

    /// Overwrite the sample at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        self.samples[(y * self.width + x) as usize] = value;
    }

    /// Row-major view of all samples.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable row-major view of all samples.
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Smallest and largest sample in the map; `(0, 0)` for an empty map.
    pub fn min_max(&self) -> (u8, u8) {
        if self.samples.is_empty() {
            return (0, 0);
        }
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        for &sample in &self.samples {
            min = min.min(sample);
            max = max.max(sample);
        }
        (min, max)
    }
}

/// Float accumulation buffer used while a map is being synthesized.
#[derive(Clone, Debug)]
pub struct HeightField {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl HeightField {
    /// Zero-filled field with the given sample dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; (width as usize) * (height as usize)],
        }
    }

    /// Samples per row.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.samples[(y * self.width + x) as usize]
    }

    /// Add `delta` onto the sample at `(x, y)`.
    pub fn add(&mut self, x: u32, y: u32, delta: f32) {
        self.samples[(y * self.width + x) as usize] += delta;
    }

    /// Row-major view of all samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Mutable row-major view of all samples.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Smallest and largest sample; `(0.0, 0.0)` for an empty field.
    pub fn min_max(&self) -> (f32, f32) {
        if self.samples.is_empty() {
            return (0.0, 0.0);
        }
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &sample in &self.samples {
            min = min.min(sample);
            max = max.max(sample);
        }
        (min, max)
    }

    /// Clamp every sample to the representable height range and round
    /// into an 8-bit heightmap.
    pub fn quantize(&self) -> Heightmap {
        let samples = self
            .samples
            .iter()
            .map(|&value| value.clamp(MIN_HEIGHT, MAX_HEIGHT).round() as u8)
            .collect();
        Heightmap {
            width: self.width,
            height: self.height,
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_heightmap_is_zeroed() {
        let map = Heightmap::new(4, 3);
        assert_eq!(map.samples().len(), 12);
        assert!(map.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut map = Heightmap::new(5, 5);
        map.set(3, 2, 201);
        assert_eq!(map.get(3, 2), 201);
        assert_eq!(map.samples()[2 * 5 + 3], 201, "storage must be row-major");
    }

    #[test]
    fn test_min_max_scan() {
        let mut map = Heightmap::new(3, 3);
        map.set(0, 0, 12);
        map.set(2, 2, 240);
        assert_eq!(map.min_max(), (0, 240));
        for y in 0..3 {
            for x in 0..3 {
                map.set(x, y, 77);
            }
        }
        assert_eq!(map.min_max(), (77, 77));
    }

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        assert!(Heightmap::from_raw(4, 4, vec![0; 15]).is_none());
        assert!(Heightmap::from_raw(4, 4, vec![0; 16]).is_some());
    }

    #[test]
    fn test_quantize_clamps_and_rounds() {
        let mut field = HeightField::new(5, 1);
        field.samples_mut().copy_from_slice(&[-10.0, 0.4, 0.6, 254.9, 300.0]);
        let map = field.quantize();
        assert_eq!(map.samples(), &[0, 0, 1, 255, 255]);
    }

    #[test]
    fn test_field_add_accumulates() {
        let mut field = HeightField::new(2, 2);
        field.add(1, 0, 1.5);
        field.add(1, 0, 2.25);
        assert_eq!(field.get(1, 0), 3.75);
        assert_eq!(field.min_max(), (0.0, 3.75));
    }
}
