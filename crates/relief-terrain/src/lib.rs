//! Seeded terrain heightmap synthesis: octave lattice noise, fractal triangle
//! grids, and the post-processing pipeline that finishes a map.

mod generator;
mod heightmap;
mod noise;
mod params;
mod postprocess;
mod seed;

pub mod fractal;

pub use fractal::lazy::LazyGrid;
pub use fractal::prebuilt::PrebuiltGrid;
pub use fractal::smooth::{SmoothGrid, SmoothVertex};
pub use fractal::{CornerFrame, Vertex};
pub use generator::{Generator, GeneratorKind};
pub use heightmap::{CELLS_PER_UNIT, HeightField, Heightmap, MAX_HEIGHT, MIN_HEIGHT};
pub use noise::OctaveNoise;
pub use params::{
    FractalParams, MAX_NOISE_DETAIL, MAX_PREBUILT_DETAIL, MAX_RECURSION_DETAIL, MapParams,
    NoiseParams, clock_seed,
};
pub use postprocess::{SEA_LEVEL, adjust_min_max, blur, quantize_levels, remap_water};
pub use seed::{SeededSource, combine_seeds};
