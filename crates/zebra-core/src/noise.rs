#![forbid(unsafe_code)]

//! 3D simplex noise primitive.
//!
//! The field is built on a single, fixed noise function: the Ashima Arts /
//! Ian McEwan 3D simplex noise commonly shipped as `glsl-noise/simplex/3d`,
//! evaluated in `f64`.
//!
//! # Algorithm
//!
//! - Skew the input onto the simplex lattice (`F3 = 1/3`, `G3 = 1/6`) and
//!   pick the four corners of the containing tetrahedron.
//! - Hash each corner with `permute(x) = mod289((34x + 1) * x)`.
//! - Map the hash onto a 7x7 ring of gradients on the octahedron and
//!   normalize with the Taylor inverse square root.
//! - Sum `max(0.6 - |d|^2, 0)^4 * dot(g, d)` over the corners and scale by 42.
//!
//! The gradient index math divides by 49 and 7 exactly. The GLSL source
//! multiplies by a truncated `1/7` instead, which is harmless in `f32` but in
//! `f64` lets integral hashes round down into a neighbouring ring cell and
//! produce values far outside `[-1, 1]`.
//!
//! Corner ordering breaks ties strictly on one axis pair, so lattice points
//! are continuous. The GLSL `step` chain accepts all three ties at once and
//! jumps there. The 0.6 kernel radius still leaves a small step (about 0.01)
//! on skewed cell faces such as half-integral diagonals, where one corner
//! is swapped for another that does not fully fade out. Only points lying
//! exactly on a face see it.
//!
//! # Determinism
//!
//! Pure function of its input; no tables, seeds or global state.

/// A deterministic, continuous 3D scalar noise function.
///
/// Implementations must return a bounded, finite value for every finite
/// input. The compositor treats this as a black box.
pub trait NoiseSource: Send + Sync {
    /// Sample the noise at `(x, y, z)`. Output is roughly in `[-1, 1]`.
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// The reference simplex noise primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Simplex3;

impl NoiseSource for Simplex3 {
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        simplex3(x, y, z)
    }
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64, f64) -> f64 + Send + Sync,
{
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self(x, y, z)
    }
}

const SKEW: f64 = 1.0 / 3.0;
const UNSKEW: f64 = 1.0 / 6.0;
const FALLOFF: f64 = 0.6;
const OUTPUT_SCALE: f64 = 42.0;

#[inline]
fn mod289(x: f64) -> f64 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: f64) -> f64 {
    mod289(((x * 34.0) + 1.0) * x)
}

#[inline]
fn taylor_inv_sqrt(r: f64) -> f64 {
    1.792_842_914_001_59 - 0.853_734_720_953_14 * r
}

/// GLSL `step(edge, x)`.
#[inline]
fn step(edge: f64, x: f64) -> f64 {
    if x < edge { 0.0 } else { 1.0 }
}

#[inline]
fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Evaluate 3D simplex noise at `(x, y, z)`.
///
/// Returns a value in `[-1, 1]`.
pub fn simplex3(x: f64, y: f64, z: f64) -> f64 {
    let v = [x, y, z];

    // First corner.
    let s = (x + y + z) * SKEW;
    let i = [(x + s).floor(), (y + s).floor(), (z + s).floor()];
    let t = (i[0] + i[1] + i[2]) * UNSKEW;
    let x0 = [v[0] - i[0] + t, v[1] - i[1] + t, v[2] - i[2] + t];

    // Other corners. Ties break x before y before z; the z-vs-x comparison
    // is strict so a point on the main diagonal still gets a proper
    // tetrahedron instead of collapsing onto the first corner.
    let g = [
        step(x0[1], x0[0]),
        step(x0[2], x0[1]),
        if x0[2] > x0[0] { 1.0 } else { 0.0 },
    ];
    let l = [1.0 - g[0], 1.0 - g[1], 1.0 - g[2]];
    let l_zxy = [l[2], l[0], l[1]];
    let i1 = [g[0].min(l_zxy[0]), g[1].min(l_zxy[1]), g[2].min(l_zxy[2])];
    let i2 = [g[0].max(l_zxy[0]), g[1].max(l_zxy[1]), g[2].max(l_zxy[2])];

    let x1 = [
        x0[0] - i1[0] + UNSKEW,
        x0[1] - i1[1] + UNSKEW,
        x0[2] - i1[2] + UNSKEW,
    ];
    let x2 = [
        x0[0] - i2[0] + SKEW,
        x0[1] - i2[1] + SKEW,
        x0[2] - i2[2] + SKEW,
    ];
    let x3 = [x0[0] - 0.5, x0[1] - 0.5, x0[2] - 0.5];

    // Permutations.
    let i = [mod289(i[0]), mod289(i[1]), mod289(i[2])];
    let mut p = [0.0f64; 4];
    let oz = [0.0, i1[2], i2[2], 1.0];
    let oy = [0.0, i1[1], i2[1], 1.0];
    let ox = [0.0, i1[0], i2[0], 1.0];
    for k in 0..4 {
        let h = permute(i[2] + oz[k]);
        let h = permute(h + i[1] + oy[k]);
        p[k] = permute(h + i[0] + ox[k]);
    }

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    let ns_x = 2.0 / 7.0;
    let ns_y = 0.5 / 7.0 - 1.0;
    let mut gx = [0.0f64; 4];
    let mut gy = [0.0f64; 4];
    let mut gz = [0.0f64; 4];
    for k in 0..4 {
        let j = p[k] - 49.0 * (p[k] / 49.0).floor();
        let col = (j / 7.0).floor();
        let row = (j - 7.0 * col).floor();
        let ax = col * ns_x + ns_y;
        let ay = row * ns_x + ns_y;
        let h = 1.0 - ax.abs() - ay.abs();
        // Fold the lower half of the octahedron back up.
        let sh = -step(h, 0.0);
        let sx = ax.floor() * 2.0 + 1.0;
        let sy = ay.floor() * 2.0 + 1.0;
        let gxk = ax + sx * sh;
        let gyk = ay + sy * sh;
        let norm = taylor_inv_sqrt(gxk * gxk + gyk * gyk + h * h);
        gx[k] = gxk * norm;
        gy[k] = gyk * norm;
        gz[k] = h * norm;
    }

    // Mix final noise value.
    let corners = [x0, x1, x2, x3];
    let mut sum = 0.0;
    for k in 0..4 {
        let d = corners[k];
        let m = (FALLOFF - dot3(d, d)).max(0.0);
        let m2 = m * m;
        sum += m2 * m2 * dot3([gx[k], gy[k], gz[k]], d);
    }
    OUTPUT_SCALE * sum
}
