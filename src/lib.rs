//! Fixed-size vectors, 4x4 matrix algebra with view and projection
//! builders, and a position/rotation/scale `Transform` on top.

pub use math;
pub use scene;

pub use math::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};
pub use scene::Transform;
