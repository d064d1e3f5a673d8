use glam::Vec3;

/// Hermite ease `w² * (3 - 2w)`.
///
/// Maps `[0, 1]` onto `[0, 1]` with zero slope at both ends, fixing
/// 0 → 0, 0.5 → 0.5 and 1 → 1. Blending lattice values with this
/// weight instead of the raw fraction removes the visible creases a
/// plain bilinear blend leaves along cell boundaries.
pub fn hermite_weight(w: f32) -> f32 {
    w * w * (3.0 - 2.0 * w)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation driven by a Hermite-eased weight.
pub fn hermite_blend(a: f32, b: f32, w: f32) -> f32 {
    lerp(a, b, hermite_weight(w))
}

/// Hermite-eased bilinear blend of a single lattice cell.
///
/// `v00`/`v10` are the top-left and top-right corners, `v01`/`v11`
/// the bottom pair; `wx` and `wy` are the fractional position inside
/// the cell, both in `[0, 1]`. Both axes are eased.
pub fn bilinear_hermite(v00: f32, v10: f32, v01: f32, v11: f32, wx: f32, wy: f32) -> f32 {
    let top = hermite_blend(v00, v10, wx);
    let bottom = hermite_blend(v01, v11, wx);
    hermite_blend(top, bottom, wy)
}

/// Point on the cubic Hermite curve from `a` to `b` at parameter `t`.
///
/// Both tangents point in the direction of travel (from `a` toward
/// `b`). With `ta == tb == b - a` the curve degenerates to the
/// straight chord.
pub fn hermite_point(a: Vec3, ta: Vec3, b: Vec3, tb: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    a * h00 + ta * h10 + b * h01 + tb * h11
}

/// Edge vector projected onto the tangent plane of `normal`, rescaled
/// to the length of `along`.
///
/// This is the travel direction a curved surface with that normal
/// imposes on an edge leaving the vertex. Returns `None` when the
/// edge is (near) parallel to the normal and the projection has no
/// usable direction.
pub fn surface_tangent(normal: Vec3, along: Vec3) -> Option<Vec3> {
    let side = along.cross(normal);
    if side.length_squared() <= f32::EPSILON {
        return None;
    }
    let dir = normal.cross(side.normalize());
    Some(dir * along.length())
}
