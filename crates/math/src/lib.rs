pub mod vec;
pub mod mat;

pub use vec::{Vec2, Vec3, Vec4};
pub use mat::{Mat2, Mat3, Mat4};
pub use mat::rh::no::{ClipVolume, FrustumOptions, OrthographicOptions, PerspectiveOptions};
