use core::fmt;
use core::ops;

use bytemuck::{Pod, Zeroable};

use crate::vec::*;

// Matrices are stored column-major: `e[c][r]` is the entry at row `r`,
// column `c`, so the flattened layout puts entry (r, c) at `N*c + r`.

macro_rules! mat_impl {
    ($m: ident, $v: ident, $n: literal) => {

        #[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[repr(C)]
        pub struct $m {
            pub e: [[f32; $n]; $n],
        }

        impl Default for $m {
            #[inline]
            fn default() -> $m {
                $m::identity()
            }
        }

        impl $m {
            #[inline]
            pub fn zero() -> $m {
                $m { e: [[0.0; $n]; $n] }
            }

            #[inline]
            pub fn identity() -> $m {
                let mut m = $m::zero();
                for i in 0..$n {
                    m.e[i][i] = 1.0;
                }
                m
            }

            /// Builds a matrix from its flattened column-major values.
            #[inline]
            pub fn from_values(values: [f32; $n * $n]) -> $m {
                bytemuck::cast(values)
            }

            #[inline]
            pub fn values(&self) -> [f32; $n * $n] {
                bytemuck::cast(self.e)
            }

            #[inline]
            pub fn from_columns(v: &[$v; $n]) -> $m {
                $m { e: bytemuck::cast(*v) }
            }

            #[inline]
            pub fn to_columns(&self) -> [$v; $n] {
                bytemuck::cast(self.e)
            }

            #[inline]
            pub fn to_rows(&self) -> [$v; $n] {
                self.transpose().to_columns()
            }

            #[inline]
            pub fn transpose(&self) -> $m {
                let mut m = $m::zero();
                for c in 0..$n {
                    for r in 0..$n {
                        m.e[r][c] = self.e[c][r];
                    }
                }
                m
            }
        }

        impl ops::Index<(usize, usize)> for $m {
            type Output = f32;

            /// Indexed as `(row, column)`.
            #[inline]
            fn index(&self, (r, c): (usize, usize)) -> &f32 {
                &self.e[c][r]
            }
        }

        impl ops::Mul<$m> for $m {
            type Output = $m;

            #[inline]
            fn mul(self, rhs: $m) -> $m {
                let mut m = $m::zero();

                let a = self.to_rows();
                let b = rhs.to_columns();

                for c in 0..$n {
                    for r in 0..$n {
                        m.e[c][r] = $v::dot(a[r], b[c]);
                    }
                }
                m
            }
        }

        impl ops::Mul<$v> for $m {
            type Output = $v;

            #[inline]
            fn mul(self, rhs: $v) -> $v {
                let mut v = [0.0; $n];

                let a = self.to_rows();

                for i in 0..$n {
                    v[i] = a[i].dot(rhs);
                }
                $v::from_slice(&v)
            }
        }

        impl fmt::Display for $m {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let values: Vec<String> = self.values().iter().map(|&v| (v as f64).to_string()).collect();
                write!(f, "{}", values.join(","))
            }
        }
    }
}

mat_impl!(Mat4, Vec4, 4);
mat_impl!(Mat3, Vec3, 3);
mat_impl!(Mat2, Vec2, 2);

impl Mat2 {
    /// Arguments are named `m{row}{column}` and listed column by column.
    #[inline]
    pub fn new(m11: f32, m21: f32, m12: f32, m22: f32) -> Mat2 {
        Mat2::from_values([m11, m21, m12, m22])
    }
}

impl Mat3 {
    /// Arguments are named `m{row}{column}` and listed column by column.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        m11: f32, m21: f32, m31: f32,
        m12: f32, m22: f32, m32: f32,
        m13: f32, m23: f32, m33: f32,
    ) -> Mat3 {
        Mat3::from_values([
            m11, m21, m31,
            m12, m22, m32,
            m13, m23, m33,
        ])
    }
}

/// Sine and cosine of an angle in degrees. Evaluated in double precision
/// so that e.g. `cos(90)` rounds to a value far below f32 epsilon.
fn sin_cos_degrees(angle: f32) -> (f32, f32) {
    let radian = (angle as f64 / 180.0) * core::f64::consts::PI;
    (radian.sin() as f32, radian.cos() as f32)
}

impl Mat4 {
    /// Arguments are named `m{row}{column}` and listed column by column,
    /// so the last four are the translation column of an affine matrix.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        m11: f32, m21: f32, m31: f32, m41: f32,
        m12: f32, m22: f32, m32: f32, m42: f32,
        m13: f32, m23: f32, m33: f32, m43: f32,
        m14: f32, m24: f32, m34: f32, m44: f32,
    ) -> Mat4 {
        Mat4::from_values([
            m11, m21, m31, m41,
            m12, m22, m32, m42,
            m13, m23, m33, m43,
            m14, m24, m34, m44,
        ])
    }

    /// `self * other`. Not commutative.
    #[inline]
    pub fn mul_by_matrix(self, other: Mat4) -> Mat4 {
        self * other
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        let mut m = Mat4::identity();
        m.e[3][0..3].copy_from_slice(&[tx, ty, tz]);

        m
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
        let mut m = Mat4::identity();
        m.e[0][0] = sx;
        m.e[1][1] = sy;
        m.e[2][2] = sz;

        m
    }

    /// Rotation about the x axis, `angle` in degrees.
    pub fn rotation_x(angle: f32) -> Mat4 {
        let (sin, cos) = sin_cos_degrees(angle);

        Mat4::new(
            1.0,  0.0, 0.0, 0.0,
            0.0,  cos, sin, 0.0,
            0.0, -sin, cos, 0.0,
            0.0,  0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the y axis, `angle` in degrees.
    pub fn rotation_y(angle: f32) -> Mat4 {
        let (sin, cos) = sin_cos_degrees(angle);

        Mat4::new(
            cos, 0.0, -sin, 0.0,
            0.0, 1.0,  0.0, 0.0,
            sin, 0.0,  cos, 0.0,
            0.0, 0.0,  0.0, 1.0,
        )
    }

    /// Rotation about the z axis, `angle` in degrees.
    pub fn rotation_z(angle: f32) -> Mat4 {
        let (sin, cos) = sin_cos_degrees(angle);

        Mat4::new(
             cos, sin, 0.0, 0.0,
            -sin, cos, 0.0, 0.0,
             0.0, 0.0, 1.0, 0.0,
             0.0, 0.0, 0.0, 1.0,
        )
    }

    // The compose helpers below all post-multiply: `m.translate(..)` is
    // `m * translation(..)`, so the new step applies to vectors first.

    #[inline]
    pub fn translate(self, tx: f32, ty: f32, tz: f32) -> Mat4 {
        self * Mat4::translation(tx, ty, tz)
    }

    #[inline]
    pub fn scale(self, sx: f32, sy: f32, sz: f32) -> Mat4 {
        self * Mat4::scaling(sx, sy, sz)
    }

    #[inline]
    pub fn rotate_x(self, angle: f32) -> Mat4 {
        self * Mat4::rotation_x(angle)
    }

    #[inline]
    pub fn rotate_y(self, angle: f32) -> Mat4 {
        self * Mat4::rotation_y(angle)
    }

    #[inline]
    pub fn rotate_z(self, angle: f32) -> Mat4 {
        self * Mat4::rotation_z(angle)
    }

    /// 2x2 sub-determinants of the top two rows (`s`) and bottom two
    /// rows (`c`), shared by `determinant` and `inverse`.
    fn sub_determinants(&self) -> ([f32; 6], [f32; 6]) {
        let [a, e, i, m, b, f, j, n, c, g, k, o, d, h, l, p] = self.values();

        let upper = [
            a * f - b * e,
            a * g - c * e,
            a * h - d * e,
            b * g - c * f,
            b * h - d * f,
            c * h - d * g,
        ];
        let lower = [
            i * n - j * m,
            i * o - k * m,
            i * p - l * m,
            j * o - k * n,
            j * p - l * n,
            k * p - l * o,
        ];

        (upper, lower)
    }

    fn determinant_from(s: &[f32; 6], c: &[f32; 6]) -> f32 {
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    pub fn determinant(&self) -> f32 {
        let (s, c) = self.sub_determinants();
        Mat4::determinant_from(&s, &c)
    }

    /// Closed-form inverse via the adjugate. A singular matrix is not
    /// rejected: the result is filled with infinities or NaN.
    pub fn inverse(&self) -> Mat4 {
        let (s, cf) = self.sub_determinants();
        let det = Mat4::determinant_from(&s, &cf);
        if det == 0.0 {
            log::debug!("inverting singular matrix [{}]", self);
        }
        self.adjugate_over(&s, &cf, det)
    }

    /// Like `inverse`, but `None` when the determinant is zero or not finite.
    pub fn try_inverse(&self) -> Option<Mat4> {
        let (s, cf) = self.sub_determinants();
        let det = Mat4::determinant_from(&s, &cf);
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(self.adjugate_over(&s, &cf, det))
    }

    fn adjugate_over(&self, s: &[f32; 6], cf: &[f32; 6], det: f32) -> Mat4 {
        let [a, e, i, m, b, f, j, n, c, g, k, o, d, h, l, p] = self.values();
        let inv = 1.0 / det;

        Mat4::new(
            ( f * cf[5] - g * cf[4] + h * cf[3]) * inv,
            (-e * cf[5] + g * cf[2] - h * cf[1]) * inv,
            ( e * cf[4] - f * cf[2] + h * cf[0]) * inv,
            (-e * cf[3] + f * cf[1] - g * cf[0]) * inv,

            (-b * cf[5] + c * cf[4] - d * cf[3]) * inv,
            ( a * cf[5] - c * cf[2] + d * cf[1]) * inv,
            (-a * cf[4] + b * cf[2] - d * cf[0]) * inv,
            ( a * cf[3] - b * cf[1] + c * cf[0]) * inv,

            ( n * s[5] - o * s[4] + p * s[3]) * inv,
            (-m * s[5] + o * s[2] - p * s[1]) * inv,
            ( m * s[4] - n * s[2] + p * s[0]) * inv,
            (-m * s[3] + n * s[1] - o * s[0]) * inv,

            (-j * s[5] + k * s[4] - l * s[3]) * inv,
            ( i * s[5] - k * s[2] + l * s[1]) * inv,
            (-i * s[4] + j * s[2] - l * s[0]) * inv,
            ( i * s[3] - j * s[1] + k * s[0]) * inv,
        )
    }

    /// Transforms a point: promotes to `w = 1`, multiplies, then divides
    /// by the resulting `w`. No guard against `w == 0`.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let r = *self * p.extend(1.0);
        r.xyz() / r.w
    }

    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        rh::look_at(eye, target, up)
    }

    pub fn orthographic(options: &rh::no::OrthographicOptions) -> Mat4 {
        rh::no::orthographic(options)
    }

    pub fn frustum(options: &rh::no::FrustumOptions) -> Mat4 {
        rh::no::frustum(options)
    }

    pub fn perspective(options: &rh::no::PerspectiveOptions) -> Mat4 {
        rh::no::perspective(options)
    }
}


/// Right-handed matrices
pub mod rh {
    use super::Mat4;
    use crate::vec::Vec3;

    /// View matrix for a camera at `eye` looking at `target`. An `up` hint
    /// parallel to the view direction yields a singular matrix.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let z = (eye - target).normalized();
        let x = up.cross(z).normalized();
        let y = z.cross(x).normalized();

        if x == Vec3::default() {
            log::debug!("look_at: up hint {} is parallel to view direction {}", up, z);
        }

        Mat4::new(
            x.x, y.x, z.x, 0.0,
            x.y, y.y, z.y, 0.0,
            x.z, y.z, z.z, 0.0,
            -eye.dot(x), -eye.dot(y), -eye.dot(z), 1.0,
        )
    }

    // Negative one to one z
    pub mod no {
        use super::super::Mat4;

        /// Axis-aligned view volume in eye space.
        #[derive(Debug, Default, Copy, Clone, PartialEq)]
        pub struct ClipVolume {
            pub left: f32,
            pub right: f32,
            pub top: f32,
            pub bottom: f32,
            pub near: f32,
            pub far: f32,
        }

        pub type OrthographicOptions = ClipVolume;
        pub type FrustumOptions = ClipVolume;

        #[derive(Debug, Copy, Clone, PartialEq)]
        pub struct PerspectiveOptions {
            /// Vertical field of view, in radians.
            pub fov_y_radian: f32,
            pub aspect_ratio: f32,
            pub near: f32,
            pub far: f32,
        }

        pub fn orthographic(o: &OrthographicOptions) -> Mat4 {
            let w = o.right - o.left;
            let h = o.top - o.bottom;
            let d = o.far - o.near;

            Mat4::new(
                2.0 / w, 0.0, 0.0, 0.0,
                0.0, 2.0 / h, 0.0, 0.0,
                0.0, 0.0, -2.0 / d, 0.0,
                -(o.right + o.left) / w, -(o.top + o.bottom) / h, -(o.far + o.near) / d, 1.0,
            )
        }

        pub fn frustum(o: &FrustumOptions) -> Mat4 {
            let w = o.right - o.left;
            let h = o.top - o.bottom;
            let d = o.far - o.near;

            Mat4::new(
                2.0 * o.near / w, 0.0, 0.0, 0.0,
                0.0, 2.0 * o.near / h, 0.0, 0.0,
                (o.right + o.left) / w, (o.top + o.bottom) / h, -(o.far + o.near) / d, -1.0,
                0.0, 0.0, -2.0 * o.far * o.near / d, 0.0,
            )
        }

        /// Symmetric frustum from a vertical field of view.
        pub fn perspective(o: &PerspectiveOptions) -> Mat4 {
            let top = o.near * (o.fov_y_radian * 0.5).tan();
            let height = top * 2.0;
            let width = o.aspect_ratio * height;
            let left = -0.5 * width;

            frustum(&FrustumOptions {
                left,
                right: left + width,
                top,
                bottom: top - height,
                near: o.near,
                far: o.far,
            })
        }
    }
}
