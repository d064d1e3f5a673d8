//! Seeded recursive triangle subdivision.
//!
//! The map rectangle splits into two top-level triangles; every subdivision
//! halves the edges, derives each midpoint seed commutatively from the edge
//! endpoints and displaces the midpoint height by a seeded deviation that
//! shrinks with the edge length. All variants share this contract; they
//! differ in when the tree is materialized and how midpoints are placed.

pub mod lazy;
pub mod prebuilt;
pub mod smooth;

use glam::Vec2;
use relief_math::{Barycentric, SubTriangle, barycentric};

use crate::heightmap::MAX_HEIGHT;
use crate::params::MapParams;
use crate::seed::{SeededSource, combine_seeds};

/// One subdivision vertex: grid position, height and governing seed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
    pub height: f32,
    pub seed: u64,
}

/// The four seeded rectangle corners spanning the sample grid:
/// `a` top-left, `b` top-right, `c` bottom-right, `d` bottom-left.
#[derive(Clone, Copy, Debug)]
pub struct CornerFrame {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
    pub d: Vertex,
}

impl CornerFrame {
    /// Draw the four corner seeds from the source and displace each
    /// corner height around `level`, with the full height range scaled
    /// by `steepness` as the deviation bound.
    pub fn new(map: &MapParams, level: f32, steepness: f32, source: &mut SeededSource) -> Self {
        let seeds = [
            source.next_seed(),
            source.next_seed(),
            source.next_seed(),
            source.next_seed(),
        ];
        let max_deviation = MAX_HEIGHT * steepness;
        let mut corner = |pos: Vec2, seed: u64| Vertex {
            pos,
            height: source.displaced_height(seed, level, max_deviation),
            seed,
        };
        Self {
            a: corner(Vec2::new(0.0, 0.0), seeds[0]),
            b: corner(Vec2::new(map.span_x(), 0.0), seeds[1]),
            c: corner(Vec2::new(map.span_x(), map.span_y()), seeds[2]),
            d: corner(Vec2::new(0.0, map.span_y()), seeds[3]),
        }
    }

    /// Whether the point belongs to the upper-left top-level triangle.
    pub fn in_upper(&self, point: Vec2) -> bool {
        let bary = bary_or_corner(point, self.a.pos, self.b.pos, self.d.pos);
        bary.lambda + bary.mu <= 1.0
    }

    /// The upper-left top-level triangle `(a, b, d)`.
    pub fn upper(&self) -> [Vertex; 3] {
        [self.a, self.b, self.d]
    }

    /// The lower-right top-level triangle `(c, d, b)`.
    pub fn lower(&self) -> [Vertex; 3] {
        [self.c, self.d, self.b]
    }
}

/// Barycentric coordinates, treating a degenerate triangle as its own
/// `a` corner. Cannot arise for sanitized map spans; kept as a guard.
pub(crate) fn bary_or_corner(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Barycentric {
    barycentric(p, a, b, c).unwrap_or(Barycentric {
        lambda: 0.0,
        mu: 0.0,
    })
}

/// Midpoint vertex of the edge `(v1, v2)`: straight positional midpoint,
/// commutative combined seed, height displaced around the endpoint
/// average with deviation bound `edge_length * steepness`.
pub fn split_edge(v1: &Vertex, v2: &Vertex, steepness: f32, source: &mut SeededSource) -> Vertex {
    let seed = combine_seeds(v1.seed, v2.seed);
    let edge_length = (v2.pos - v1.pos).length();
    let base = (v1.height + v2.height) * 0.5;
    Vertex {
        pos: (v1.pos + v2.pos) * 0.5,
        height: source.displaced_height(seed, base, edge_length * steepness),
        seed,
    }
}

/// The three edge midpoints of `tri`, in `(ab, ac, bc)` order.
pub fn split_triangle(
    tri: &[Vertex; 3],
    steepness: f32,
    source: &mut SeededSource,
) -> [Vertex; 3] {
    [
        split_edge(&tri[0], &tri[1], steepness, source),
        split_edge(&tri[0], &tri[2], steepness, source),
        split_edge(&tri[1], &tri[2], steepness, source),
    ]
}

/// The child of `tri` selected by `which`, given the parent's edge
/// midpoints in `(ab, ac, bc)` order.
pub fn child_triangle(tri: &[Vertex; 3], mids: &[Vertex; 3], which: SubTriangle) -> [Vertex; 3] {
    let [a, b, c] = *tri;
    let [ab, ac, bc] = *mids;
    match which {
        SubTriangle::CornerA => [a, ab, ac],
        SubTriangle::CornerB => [ab, b, bc],
        SubTriangle::CornerC => [ac, bc, c],
        SubTriangle::Center => [ab, ac, bc],
    }
}

/// Height of `point` inside leaf triangle `tri` by barycentric
/// interpolation of the corner heights.
pub fn leaf_height(tri: &[Vertex; 3], point: Vec2) -> f32 {
    let bary = bary_or_corner(point, tri[0].pos, tri[1].pos, tri[2].pos);
    tri[0].height
        + bary.lambda * (tri[1].height - tri[0].height)
        + bary.mu * (tri[2].height - tri[0].height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::MIN_HEIGHT;

    fn one_unit_map() -> MapParams {
        MapParams {
            width: 1,
            height: 1,
            seed: Some(77),
            ..MapParams::default()
        }
    }

    #[test]
    fn test_corner_frame_spans_the_grid() {
        let map = one_unit_map();
        let mut source = SeededSource::new(77);
        let frame = CornerFrame::new(&map, 50.0, 0.5, &mut source);
        assert_eq!(frame.a.pos, Vec2::new(0.0, 0.0));
        assert_eq!(frame.b.pos, Vec2::new(64.0, 0.0));
        assert_eq!(frame.c.pos, Vec2::new(64.0, 64.0));
        assert_eq!(frame.d.pos, Vec2::new(0.0, 64.0));
    }

    #[test]
    fn test_corner_frame_deterministic() {
        let map = one_unit_map();
        let mut first_source = SeededSource::new(123);
        let mut second_source = SeededSource::new(123);
        let first = CornerFrame::new(&map, 50.0, 0.5, &mut first_source);
        let second = CornerFrame::new(&map, 50.0, 0.5, &mut second_source);
        assert_eq!(first.a, second.a);
        assert_eq!(first.b, second.b);
        assert_eq!(first.c, second.c);
        assert_eq!(first.d, second.d);
    }

    #[test]
    fn test_corner_heights_stay_in_range() {
        let map = one_unit_map();
        for seed in 0..50 {
            let mut source = SeededSource::new(seed);
            let frame = CornerFrame::new(&map, 50.0, 1.0, &mut source);
            for vertex in [frame.a, frame.b, frame.c, frame.d] {
                assert!(
                    (MIN_HEIGHT..=MAX_HEIGHT).contains(&vertex.height),
                    "Corner height {} escaped the representable range",
                    vertex.height
                );
            }
        }
    }

    #[test]
    fn test_split_edge_is_symmetric() {
        let mut source = SeededSource::new(5);
        let v1 = Vertex {
            pos: Vec2::new(0.0, 0.0),
            height: 40.0,
            seed: 111,
        };
        let v2 = Vertex {
            pos: Vec2::new(64.0, 0.0),
            height: 90.0,
            seed: 222,
        };
        let forward = split_edge(&v1, &v2, 0.5, &mut source);
        let backward = split_edge(&v2, &v1, 0.5, &mut source);
        assert_eq!(
            forward, backward,
            "A shared edge must split identically from either side"
        );
    }

    #[test]
    fn test_split_edge_deviation_bound() {
        let mut source = SeededSource::new(9);
        let steepness = 0.5;
        for seed_pair in 0..100u64 {
            let v1 = Vertex {
                pos: Vec2::new(0.0, 0.0),
                height: 100.0,
                seed: seed_pair,
            };
            let v2 = Vertex {
                pos: Vec2::new(32.0, 0.0),
                height: 120.0,
                seed: seed_pair + 1000,
            };
            let mid = split_edge(&v1, &v2, steepness, &mut source);
            let base = 110.0;
            let bound = 32.0 * steepness * 0.5;
            assert!(
                (mid.height - base).abs() <= bound + 1e-4,
                "Midpoint height {} strayed more than ±{bound} from {base}",
                mid.height
            );
        }
    }

    #[test]
    fn test_split_edge_midpoint_position() {
        let mut source = SeededSource::new(1);
        let v1 = Vertex {
            pos: Vec2::new(10.0, 20.0),
            height: 0.0,
            seed: 1,
        };
        let v2 = Vertex {
            pos: Vec2::new(30.0, 60.0),
            height: 0.0,
            seed: 2,
        };
        let mid = split_edge(&v1, &v2, 0.5, &mut source);
        assert_eq!(mid.pos, Vec2::new(20.0, 40.0));
    }

    #[test]
    fn test_leaf_height_matches_corners() {
        let tri = [
            Vertex {
                pos: Vec2::new(0.0, 0.0),
                height: 10.0,
                seed: 0,
            },
            Vertex {
                pos: Vec2::new(64.0, 0.0),
                height: 200.0,
                seed: 0,
            },
            Vertex {
                pos: Vec2::new(0.0, 64.0),
                height: 90.0,
                seed: 0,
            },
        ];
        assert_eq!(leaf_height(&tri, Vec2::new(0.0, 0.0)), 10.0);
        assert_eq!(leaf_height(&tri, Vec2::new(64.0, 0.0)), 200.0);
        assert_eq!(leaf_height(&tri, Vec2::new(0.0, 64.0)), 90.0);
        // Edge midpoints are plain averages under barycentric interpolation.
        assert_eq!(leaf_height(&tri, Vec2::new(32.0, 0.0)), 105.0);
    }

    #[test]
    fn test_child_triangle_vertex_orders() {
        let tri = [
            Vertex {
                pos: Vec2::new(0.0, 0.0),
                height: 0.0,
                seed: 1,
            },
            Vertex {
                pos: Vec2::new(64.0, 0.0),
                height: 0.0,
                seed: 2,
            },
            Vertex {
                pos: Vec2::new(0.0, 64.0),
                height: 0.0,
                seed: 3,
            },
        ];
        let mut source = SeededSource::new(0);
        let mids = split_triangle(&tri, 0.5, &mut source);

        let corner_a = child_triangle(&tri, &mids, SubTriangle::CornerA);
        assert_eq!(corner_a[0], tri[0]);
        assert_eq!(corner_a[1], mids[0]);
        assert_eq!(corner_a[2], mids[1]);

        let center = child_triangle(&tri, &mids, SubTriangle::Center);
        assert_eq!(center, [mids[0], mids[1], mids[2]]);
    }

    #[test]
    fn test_top_level_classification_splits_on_the_diagonal() {
        let map = one_unit_map();
        let mut source = SeededSource::new(4);
        let frame = CornerFrame::new(&map, 50.0, 0.5, &mut source);
        assert!(frame.in_upper(Vec2::new(1.0, 1.0)));
        assert!(!frame.in_upper(Vec2::new(63.0, 63.0)));
        // Points exactly on the b-d diagonal stay with the upper triangle.
        assert!(frame.in_upper(Vec2::new(32.0, 32.0)));
    }
}
