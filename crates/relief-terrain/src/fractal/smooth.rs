//! Normal-carrying subdivision: edges bend along cubic Hermite curves
//! before the seeded displacement is applied, which rounds off the
//! creases the plain variants leave at coarse detail.

use glam::{Vec2, Vec3};
use relief_math::{SubTriangle, hermite_point, surface_tangent};

use crate::fractal::{CornerFrame, Vertex, bary_or_corner};
use crate::heightmap::{Heightmap, MAX_HEIGHT, MIN_HEIGHT};
use crate::params::{FractalParams, MapParams};
use crate::seed::{SeededSource, combine_seeds};

/// A subdivision vertex carrying its surface normal. Positions are 3D
/// here: curved edges move through height as well as across the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothVertex {
    pub pos: Vec3,
    pub normal: Vec3,
    pub seed: u64,
}

/// Fractal generator whose edge midpoints ride Hermite curves bent by
/// the endpoint normals. Corner seeds and heights match the plain
/// variants; everything below the corners trades exact agreement for
/// smoother silhouettes.
pub struct SmoothGrid {
    map: MapParams,
    params: FractalParams,
    corners: [SmoothVertex; 4],
    source: SeededSource,
}

impl SmoothGrid {
    /// Seed the corner frame and derive each corner normal from the
    /// plane through its two rectangle neighbors.
    pub fn new(map: MapParams, params: FractalParams, seed: u64) -> Self {
        let mut source = SeededSource::new(seed);
        let frame = CornerFrame::new(&map, map.level as f32, params.steepness, &mut source);
        let (pa, pb, pc, pd) = (
            lift(&frame.a),
            lift(&frame.b),
            lift(&frame.c),
            lift(&frame.d),
        );
        let corners = [
            SmoothVertex {
                pos: pa,
                normal: corner_normal(pa, pb, pd),
                seed: frame.a.seed,
            },
            SmoothVertex {
                pos: pb,
                normal: corner_normal(pb, pc, pa),
                seed: frame.b.seed,
            },
            SmoothVertex {
                pos: pc,
                normal: corner_normal(pc, pd, pb),
                seed: frame.c.seed,
            },
            SmoothVertex {
                pos: pd,
                normal: corner_normal(pd, pa, pc),
                seed: frame.d.seed,
            },
        ];
        Self {
            map,
            params,
            corners,
            source,
        }
    }

    /// Height at one sample position.
    pub fn height_at(&mut self, point: Vec2) -> f32 {
        let top = if self.in_upper(point) {
            self.upper()
        } else {
            self.lower()
        };
        self.height_in(top, point, self.params.detail)
    }

    fn in_upper(&self, point: Vec2) -> bool {
        let [a, b, _, d] = self.corners;
        let bary = bary_or_corner(point, a.pos.truncate(), b.pos.truncate(), d.pos.truncate());
        bary.lambda + bary.mu <= 1.0
    }

    fn upper(&self) -> [SmoothVertex; 3] {
        [self.corners[0], self.corners[1], self.corners[3]]
    }

    fn lower(&self) -> [SmoothVertex; 3] {
        [self.corners[2], self.corners[3], self.corners[1]]
    }

    fn height_in(&mut self, tri: [SmoothVertex; 3], point: Vec2, depth: u32) -> f32 {
        let [a, b, c] = tri;
        let bary = bary_or_corner(
            point,
            a.pos.truncate(),
            b.pos.truncate(),
            c.pos.truncate(),
        );
        if depth == 0 {
            return a.pos.z + bary.lambda * (b.pos.z - a.pos.z) + bary.mu * (c.pos.z - a.pos.z);
        }
        let ab = self.split_edge(a, b);
        let ac = self.split_edge(a, c);
        let bc = self.split_edge(b, c);
        let child = match SubTriangle::select(bary) {
            SubTriangle::CornerA => [a, ab, ac],
            SubTriangle::CornerB => [ab, b, bc],
            SubTriangle::CornerC => [ac, bc, c],
            SubTriangle::Center => [ab, ac, bc],
        };
        self.height_in(child, point, depth - 1)
    }

    /// Curved midpoint of the edge `(v1, v2)`.
    ///
    /// Endpoints are ordered by seed first so both triangles sharing the
    /// edge bend it identically. The Hermite curve runs between the
    /// endpoints with tangents lying in each endpoint's tangent plane;
    /// its halfway point is then displaced like any plain midpoint, with
    /// the 3D chord length scaling the deviation bound. The midpoint
    /// normal averages the endpoint normals.
    fn split_edge(&mut self, v1: SmoothVertex, v2: SmoothVertex) -> SmoothVertex {
        let (lo, hi) = if v1.seed <= v2.seed { (v1, v2) } else { (v2, v1) };
        let seed = combine_seeds(lo.seed, hi.seed);
        let chord = hi.pos - lo.pos;
        let mid = match (
            surface_tangent(lo.normal, chord),
            surface_tangent(hi.normal, chord),
        ) {
            (Some(tangent_lo), Some(tangent_hi)) => {
                hermite_point(lo.pos, tangent_lo, hi.pos, tangent_hi, 0.5)
            }
            // A chord parallel to a normal has no usable tangent; fall
            // back to the straight midpoint.
            _ => (lo.pos + hi.pos) * 0.5,
        };
        let height =
            self.source
                .displaced_height(seed, mid.z, chord.length() * self.params.steepness);
        SmoothVertex {
            pos: Vec3::new(mid.x, mid.y, height),
            normal: (lo.normal + hi.normal).try_normalize().unwrap_or(Vec3::Z),
            seed,
        }
    }

    /// Rasterize the whole sample grid.
    pub fn rasterize(&mut self) -> Heightmap {
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

/// Lift a planar vertex into 3D with its height as z.
fn lift(v: &Vertex) -> Vec3 {
    Vec3::new(v.pos.x, v.pos.y, v.height)
}

/// Upward-oriented unit normal of the plane through `v` and its two
/// rectangle neighbors.
fn corner_normal(v: Vec3, n1: Vec3, n2: Vec3) -> Vec3 {
    let normal = (n1 - v).cross(n2 - v);
    let normal = if normal.z < 0.0 { -normal } else { normal };
    normal.try_normalize().unwrap_or(Vec3::Z)
}
