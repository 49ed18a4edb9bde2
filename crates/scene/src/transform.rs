use math::{
    vec::Vec3,
    mat::Mat4,
};

/// Position, per-axis rotation in degrees, and scale of an object.
///
/// The matrix is derived on every call to [`Transform::matrix`] and never
/// cached, so it always reflects the current fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::new(0., 0., 0.),
            rotation: Vec3::new(0., 0., 0.),
            scale: Vec3::new(1., 1., 1.),
        }
    }
}

impl Transform {
    pub fn new() -> Transform {
        Transform::default()
    }

    // Vec3 is Copy, so the setters store the caller's components, never
    // a handle to the caller's vector.

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// `scaling * rotate_x * rotate_y * rotate_z * translate`, built by
    /// post-multiplication. Applied to a column vector, translation happens
    /// first and scaling last.
    pub fn matrix(&self) -> Mat4 {
        Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
            .rotate_x(self.rotation.x)
            .rotate_y(self.rotation.y)
            .rotate_z(self.rotation.z)
            .translate(self.position.x, self.position.y, self.position.z)
    }

    /// Transforms `point` by `matrix` with a perspective divide.
    pub fn mul_vector_and_matrix(matrix: &Mat4, point: Vec3) -> Vec3 {
        matrix.transform_point(point)
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        Transform::mul_vector_and_matrix(&self.matrix(), point)
    }
}
