//! Interpolation and barycentric primitives shared by the relief terrain generators.

mod barycentric;
mod interpolate;

pub use barycentric::{Barycentric, SubTriangle, barycentric};
pub use interpolate::{
    bilinear_hermite, hermite_blend, hermite_point, hermite_weight, lerp, surface_tangent,
};
