//! On-the-fly subdivision: no tree is stored, every sample query walks
//! the recursion from the top-level triangle down.

use glam::Vec2;
use relief_math::SubTriangle;
use tracing::debug;

use crate::fractal::{
    CornerFrame, Vertex, bary_or_corner, child_triangle, leaf_height, split_triangle,
};
use crate::heightmap::{Heightmap, MAX_HEIGHT, MIN_HEIGHT};
use crate::params::{FractalParams, MapParams};
use crate::seed::SeededSource;

/// Fractal generator that recomputes the subdivision path for every
/// queried sample. Memory stays O(detail); repeated midpoints are
/// recomputed instead of cached, which seeded displacement makes safe.
pub struct LazyGrid {
    map: MapParams,
    params: FractalParams,
    frame: CornerFrame,
    source: SeededSource,
}

impl LazyGrid {
    /// Seed the corner frame; nothing else is precomputed.
    pub fn new(map: MapParams, params: FractalParams, seed: u64) -> Self {
        let mut source = SeededSource::new(seed);
        let frame = CornerFrame::new(&map, map.level as f32, params.steepness, &mut source);
        Self {
            map,
            params,
            frame,
            source,
        }
    }

    /// Height at one sample position.
    pub fn height_at(&mut self, point: Vec2) -> f32 {
        let top = if self.frame.in_upper(point) {
            self.frame.upper()
        } else {
            self.frame.lower()
        };
        self.height_in(top, point, self.params.detail)
    }

    fn height_in(&mut self, tri: [Vertex; 3], point: Vec2, depth: u32) -> f32 {
        if depth == 0 {
            return leaf_height(&tri, point);
        }
        let mids = split_triangle(&tri, self.params.steepness, &mut self.source);
        let bary = bary_or_corner(point, tri[0].pos, tri[1].pos, tri[2].pos);
        let child = child_triangle(&tri, &mids, SubTriangle::select(bary));
        self.height_in(child, point, depth - 1)
    }

    /// Rasterize the whole sample grid.
    pub fn rasterize(&mut self) -> Heightmap {
        debug!(detail = self.params.detail, "rasterizing subdivision on the fly");
        let mut map = Heightmap::new(self.map.sample_width(), self.map.sample_height());
        for y in 0..map.height() {
            for x in 0..map.width() {
                let height = self.height_at(Vec2::new(x as f32, y as f32));
                map.set(x, y, height.clamp(MIN_HEIGHT, MAX_HEIGHT).round() as u8);
            }
        }
        map
    }
}
