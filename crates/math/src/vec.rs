use core::fmt;
use core::ops;

use bytemuck::{Pod, Zeroable};

use crate::mat::Mat4;

macro_rules! vec_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: ops::$trait::$func(self.$e, rhs.$e), )* }
            }
        }
    }
}

macro_rules! vec_assign_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            #[inline]
            fn $func(&mut self, rhs: $v) {
                $( ops::$trait::$func(&mut self.$e, rhs.$e); )*
            }
        }
    }
}

macro_rules! scalar_op_impl {
    ($trait: ident, $func: ident, $assign_trait: ident, $assign_func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<f32> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: f32) -> $v {
                $v { $( $e: ops::$trait::$func(self.$e, rhs), )* }
            }
        }

        impl ops::$assign_trait<f32> for $v {
            #[inline]
            fn $assign_func(&mut self, rhs: f32) {
                $( ops::$assign_trait::$assign_func(&mut self.$e, rhs); )*
            }
        }
    }
}

macro_rules! vec_impl {
    ($v: ident, $n: literal, $($e: ident),*) => {

        #[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[repr(C)]
        pub struct $v {
            $( pub $e: f32, )*
        }

        impl $v {
            #[inline]
            pub fn new($( $e: f32, )*) -> $v {
                $v { $( $e, )* }
            }

            #[inline]
            pub fn from_slice(a: &[f32; $n]) -> $v {
                bytemuck::cast(*a)
            }

            #[inline]
            pub fn to_slice(self) -> [f32; $n] {
                bytemuck::cast(self)
            }

            #[inline]
            pub fn dot(self, b: $v) -> f32 {
                // Adding -0.0 is a nop in IEEE 754, so the trailing term
                // folds away while keeping the sum expression uniform.
                $( self.$e * b.$e + )* (-0.0)
            }

            #[inline]
            pub fn magnitude_squared(self) -> f32 {
                $v::dot(self, self)
            }

            /// Euclidean norm. Squares are summed in f64 so that finite
            /// components near the f32 range limits do not overflow or
            /// underflow to 0.
            #[inline]
            pub fn magnitude(self) -> f32 {
                $v::magnitude_f64(self) as f32
            }

            #[inline]
            fn magnitude_f64(self) -> f64 {
                let sum: f64 = $( (self.$e as f64) * (self.$e as f64) + )* 0.0;
                sum.sqrt()
            }

            /// Unit vector in the same direction. The zero vector is
            /// returned unchanged instead of turning into NaNs.
            #[inline]
            pub fn normalized(self) -> $v {
                let m = self.magnitude_f64();
                if m == 0.0 {
                    return self;
                }
                $v { $( $e: (self.$e as f64 / m) as f32, )* }
            }
        }

        impl From<[f32; $n]> for $v {
            #[inline]
            fn from(a: [f32; $n]) -> $v {
                $v::from_slice(&a)
            }
        }

        impl ops::Index<usize> for $v {
            type Output = f32;

            #[inline]
            fn index(&self, i: usize) -> &f32 {
                &bytemuck::cast_ref::<$v, [f32; $n]>(self)[i]
            }
        }

        impl ops::IndexMut<usize> for $v {
            #[inline]
            fn index_mut(&mut self, i: usize) -> &mut f32 {
                &mut bytemuck::cast_mut::<$v, [f32; $n]>(self)[i]
            }
        }

        impl ops::Neg for $v {
            type Output = $v;

            #[inline]
            fn neg(self) -> $v {
                $v { $( $e: -self.$e, )* }
            }
        }

        impl ops::Mul<$v> for f32 {
            type Output = $v;

            #[inline]
            fn mul(self, rhs: $v) -> $v {
                rhs * self
            }
        }

        impl fmt::Display for $v {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let components: Vec<String> = self.to_slice().iter()
                    .map(|c| match f.precision() {
                        Some(prec) => format!("{:.prec$}", c, prec = prec),
                        None => format!("{}", c),
                    })
                    .collect();
                write!(f, "Vector{}({})", $n, components.join(", "))
            }
        }

        vec_op_impl!(Add, add, $v, $($e),*);
        vec_op_impl!(Sub, sub, $v, $($e),*);
        vec_op_impl!(Mul, mul, $v, $($e),*);
        vec_op_impl!(Div, div, $v, $($e),*);

        vec_assign_op_impl!(AddAssign, add_assign, $v, $($e),*);
        vec_assign_op_impl!(SubAssign, sub_assign, $v, $($e),*);
        vec_assign_op_impl!(MulAssign, mul_assign, $v, $($e),*);
        vec_assign_op_impl!(DivAssign, div_assign, $v, $($e),*);

        scalar_op_impl!(Mul, mul, MulAssign, mul_assign, $v, $($e),*);
        scalar_op_impl!(Div, div, DivAssign, div_assign, $v, $($e),*);
    }
}

vec_impl!(Vec2, 2, x, y);
vec_impl!(Vec3, 3, x, y, z);
vec_impl!(Vec4, 4, x, y, z, w);

impl Vec3 {
    #[inline]
    pub fn cross(self, b: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * b.z - self.z * b.y,
            y: self.z * b.x - self.x * b.z,
            z: self.x * b.y - self.y * b.x,
        }
    }

    #[inline]
    pub fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Homogeneous promotion; `w = 1.0` for points, `0.0` for directions.
    #[inline]
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Vec4 {
    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// `m * self`, treating `self` as a column vector.
    #[inline]
    pub fn mul_by_matrix(self, m: &Mat4) -> Vec4 {
        *m * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);

        assert_eq!(a + b, Vec2::new(4.0, 6.0));
        assert_eq!(a - b, Vec2::new(-2.0, -2.0));
        assert_eq!(a * 5.0, Vec2::new(5.0, 10.0));
        assert_eq!(5.0 * a, Vec2::new(5.0, 10.0));
        assert_eq!(a.dot(b), 11.0);
    }

    #[test]
    fn vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a - b, Vec3::new(-3.0, -3.0, -3.0));
        assert_eq!(a * 5.0, Vec3::new(5.0, 10.0, 15.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn vec4_arithmetic() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(5.0, 6.0, 7.0, 8.0);

        assert_eq!(a + b, Vec4::new(6.0, 8.0, 10.0, 12.0));
        assert_eq!(a - b, Vec4::new(-4.0, -4.0, -4.0, -4.0));
        assert_eq!(a * 5.0, Vec4::new(5.0, 10.0, 15.0, 20.0));
        assert_eq!(a.dot(b), 70.0);
    }

    #[test]
    fn dot_commutes_and_cross_anticommutes() {
        let pairs = [
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)),
            (Vec3::new(-0.5, 8.0, 2.25), Vec3::new(3.0, -1.0, 0.0)),
            (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
        ];

        for (a, b) in pairs {
            assert_eq!(a.dot(b), b.dot(a));
            assert_eq!(a.cross(b), -b.cross(a));
        }

        let pairs2 = [
            (Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)),
            (Vec2::new(-0.75, 1e3), Vec2::new(6.5, -0.125)),
        ];
        for (a, b) in pairs2 {
            assert_eq!(a.dot(b), b.dot(a));
        }

        let pairs4 = [
            (Vec4::new(1.0, 2.0, 3.0, 4.0), Vec4::new(5.0, 6.0, 7.0, 8.0)),
            (Vec4::new(0.1, -3.0, 2.5, 0.0), Vec4::new(-7.0, 0.5, 1.25, 9.0)),
        ];
        for (a, b) in pairs4 {
            assert_eq!(a.dot(b), b.dot(a));
        }
    }

    #[test]
    fn normalized_extreme_magnitudes() {
        let big = Vec3::new(1e20, 0.0, 0.0);
        assert!(((big.magnitude() - 1e20) / 1e20).abs() < 1e-6);
        assert!(approx_eq(big.normalized().magnitude(), 1.0));
        assert_eq!(big.normalized(), Vec3::new(1.0, 0.0, 0.0));

        let tiny = Vec3::new(1e-30, 0.0, 0.0);
        assert!(((tiny.magnitude() - 1e-30) / 1e-30).abs() < 1e-6);
        assert!(approx_eq(tiny.normalized().magnitude(), 1.0));
        assert_eq!(tiny.normalized(), Vec3::new(1.0, 0.0, 0.0));

        let mixed = Vec4::new(3e25, -4e25, 0.0, 0.0).normalized();
        assert!(approx_eq(mixed.magnitude(), 1.0));
        assert!(approx_eq(mixed.x, 0.6));
    }

    #[test]
    fn normalized_has_unit_magnitude() {
        assert_eq!(Vec2::new(0.0, 10.0).normalized(), Vec2::new(0.0, 1.0));
        assert_eq!(Vec3::new(0.0, 10.0, 0.0).normalized(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(Vec4::new(0.0, 10.0, 0.0, 0.0).normalized(), Vec4::new(0.0, 1.0, 0.0, 0.0));

        let v = Vec3::new(3.0, -4.0, 12.0).normalized();
        assert!(approx_eq(v.magnitude(), 1.0));
        assert!(approx_eq(v.x, 3.0 / 13.0));
    }

    #[test]
    fn zero_vector_normalizes_to_itself() {
        assert_eq!(Vec2::default().normalized(), Vec2::default());
        assert_eq!(Vec3::default().normalized(), Vec3::default());
        assert_eq!(Vec4::default().normalized(), Vec4::default());
    }

    #[test]
    fn narrowing_views_copy_components() {
        let v3 = Vec3::new(1.0, 2.0, 3.0);
        let mut xy = v3.xy();
        xy.x = 9.0;
        assert_eq!(xy, Vec2::new(9.0, 2.0));
        assert_eq!(v3.x, 1.0);

        let v4 = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v4.xyz(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v3.extend(1.0), Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn components_are_mutable_in_place() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        v.y = 20.0;
        v[3] = 40.0;

        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 20.0);
        assert_eq!(v.w, 40.0);

        v += Vec4::new(1.0, 1.0, 1.0, 1.0);
        v *= 2.0;
        assert_eq!(v, Vec4::new(4.0, 42.0, 8.0, 82.0));
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let v = Vec2::new(1.0, 2.0);
        let _component: f32 = v[2];
    }

    #[test]
    fn mul_by_matrix() {
        let v = Vec4::new(4.0, 3.0, 2.0, 1.0);

        assert_eq!(v.mul_by_matrix(&Mat4::translation(1.0, 2.0, 3.0)), Vec4::new(5.0, 5.0, 5.0, 1.0));
        assert_eq!(v.mul_by_matrix(&Mat4::scaling(1.0, 2.0, 3.0)), Vec4::new(4.0, 6.0, 6.0, 1.0));

        let r = v.mul_by_matrix(&Mat4::rotation_x(90.0));
        assert!(approx_eq(r.x, 4.0));
        assert!(approx_eq(r.y, -2.0));
        assert!(approx_eq(r.z, 3.0));
        assert!(approx_eq(r.w, 1.0));
    }

    #[test]
    fn nan_components_propagate() {
        let v = Vec3::new(f32::NAN, 1.0, 0.0);
        assert!(v.magnitude().is_nan());
        assert!((v + Vec3::new(1.0, 1.0, 1.0)).x.is_nan());
    }

    #[test]
    fn display() {
        assert_eq!(Vec2::new(1.0, 2.0).to_string(), "Vector2(1, 2)");
        assert_eq!(Vec3::new(1.5, -2.0, 0.25).to_string(), "Vector3(1.5, -2, 0.25)");
        assert_eq!(format!("{:.2}", Vec4::new(1.0, 2.0, 3.0, 4.0)), "Vector4(1.00, 2.00, 3.00, 4.00)");
    }
}
