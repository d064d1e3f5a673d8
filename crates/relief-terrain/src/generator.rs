//! Generator facade: a closed set of terrain algorithms behind one
//! synthesize operation.

use tracing::info;

use crate::fractal::lazy::LazyGrid;
use crate::fractal::prebuilt::PrebuiltGrid;
use crate::fractal::smooth::SmoothGrid;
use crate::heightmap::Heightmap;
use crate::noise::OctaveNoise;
use crate::params::{
    FractalParams, MAX_PREBUILT_DETAIL, MAX_RECURSION_DETAIL, MapParams, NoiseParams,
};
use crate::postprocess::{blur, quantize_levels, remap_water};

/// Which terrain algorithm a [`Generator`] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Multi-octave lattice noise with water and level post-processing.
    Noise,
    /// Triangle subdivision with the whole tree built up front.
    Prebuilt,
    /// Triangle subdivision evaluated on the fly per sample.
    Lazy,
    /// On-the-fly subdivision with Hermite-curved edges.
    Smooth,
}

enum Backend {
    Noise(OctaveNoise),
    Prebuilt(PrebuiltGrid),
    Lazy(LazyGrid),
    Smooth(SmoothGrid),
}

/// A configured terrain generator.
///
/// Construction sanitizes the parameters, resolves the master seed and
/// prepares the algorithm backend; [`Generator::synthesize`] produces
/// the finished heightmap with this variant's post-processing already
/// applied.
pub struct Generator {
    kind: GeneratorKind,
    map: MapParams,
    backend: Backend,
}

impl Generator {
    pub fn new(
        kind: GeneratorKind,
        map: MapParams,
        fractal: FractalParams,
        noise: NoiseParams,
    ) -> Self {
        let map = map.sanitized();
        let seed = map.resolve_seed();
        info!(
            ?kind,
            width = map.width,
            height = map.height,
            level = map.level,
            blur = map.blur,
            seed,
            "preparing terrain generator"
        );
        let backend = match kind {
            GeneratorKind::Noise => {
                let noise = noise.sanitized();
                info!(
                    detail = noise.detail,
                    roughness = noise.roughness,
                    bottom = noise.bottom,
                    peak = noise.peak,
                    water = noise.water,
                    "noise settings"
                );
                Backend::Noise(OctaveNoise::new(map, noise, seed))
            }
            GeneratorKind::Prebuilt => {
                let fractal = fractal.sanitized(MAX_PREBUILT_DETAIL);
                info!(
                    detail = fractal.detail,
                    steepness = fractal.steepness,
                    "subdivision settings"
                );
                Backend::Prebuilt(PrebuiltGrid::new(map, fractal, seed))
            }
            GeneratorKind::Lazy => {
                let fractal = fractal.sanitized(MAX_RECURSION_DETAIL);
                info!(
                    detail = fractal.detail,
                    steepness = fractal.steepness,
                    "subdivision settings"
                );
                Backend::Lazy(LazyGrid::new(map, fractal, seed))
            }
            GeneratorKind::Smooth => {
                let fractal = fractal.sanitized(MAX_RECURSION_DETAIL);
                info!(
                    detail = fractal.detail,
                    steepness = fractal.steepness,
                    "subdivision settings"
                );
                Backend::Smooth(SmoothGrid::new(map, fractal, seed))
            }
        };
        Self { kind, map, backend }
    }

    /// The algorithm variant this generator runs.
    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    /// Produce the finished heightmap.
    ///
    /// The noise variant is blurred, water-remapped and band-quantized;
    /// the subdivision variants are only blurred.
    pub fn synthesize(&mut self) -> Heightmap {
        let passes = self.map.blur;
        match &mut self.backend {
            Backend::Noise(noise) => {
                let mut map = noise.raw_field().quantize();
                blur(&mut map, passes);
                remap_water(&mut map, noise.water_fraction());
                quantize_levels(&mut map);
                map
            }
            Backend::Prebuilt(grid) => {
                let mut map = grid.rasterize();
                blur(&mut map, passes);
                map
            }
            Backend::Lazy(grid) => {
                let mut map = grid.rasterize();
                blur(&mut map, passes);
                map
            }
            Backend::Smooth(grid) => {
                let mut map = grid.rasterize();
                blur(&mut map, passes);
                map
            }
        }
    }
}
