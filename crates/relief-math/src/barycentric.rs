use glam::Vec2;

/// Barycentric coordinates of a point relative to triangle corner `a`:
/// `p = a + lambda * (b - a) + mu * (c - a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barycentric {
    pub lambda: f32,
    pub mu: f32,
}

/// Coordinates of `p` in the frame of triangle `(a, b, c)`.
///
/// Returns `None` when the triangle is (near) degenerate, i.e. its
/// edge vectors are parallel and the perp-dot denominator vanishes.
pub fn barycentric(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Option<Barycentric> {
    let u = b - a;
    let v = c - a;
    let q = p - a;
    let det = u.perp_dot(v);
    if det.abs() <= f32::EPSILON {
        return None;
    }
    Some(Barycentric {
        lambda: q.perp_dot(v) / det,
        mu: u.perp_dot(q) / det,
    })
}

/// The four children of a subdivided triangle `(a, b, c)`.
///
/// Corner children sit on their parent corner, `Center` is the
/// inverted middle triangle spanned by the three edge midpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubTriangle {
    CornerA,
    CornerB,
    CornerC,
    Center,
}

impl SubTriangle {
    /// Pick the child triangle containing a barycentric position.
    ///
    /// The order of the checks is the tie-break contract: points on
    /// the `lambda + mu = 0.5` line belong to the corner-a child,
    /// points on the far midlines stay with the center child.
    pub fn select(bary: Barycentric) -> SubTriangle {
        if bary.lambda + bary.mu <= 0.5 {
            SubTriangle::CornerA
        } else if bary.lambda > 0.5 {
            SubTriangle::CornerB
        } else if bary.mu > 0.5 {
            SubTriangle::CornerC
        } else {
            SubTriangle::Center
        }
    }
}
