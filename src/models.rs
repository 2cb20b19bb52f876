//! Geometric model types.

use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};

/// Rigid transform in 3D (rotation + translation) mapping the first point
/// set onto the second.
#[derive(Clone, Debug)]
pub struct RigidTransform {
    pub rotation: UnitQuaternion<f64>,
    pub translation: Translation3<f64>,
}

impl RigidTransform {
    pub fn new(rotation: UnitQuaternion<f64>, translation: Translation3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Build from a rotation matrix and a translation vector.
    pub fn from_rt(r: Matrix3<f64>, t: Vector3<f64>) -> Self {
        let rot = Rotation3::from_matrix_unchecked(r);
        let quat = UnitQuaternion::from_rotation_matrix(&rot);
        Self::new(quat, Translation3::from(t))
    }

    /// Identity transform.
    pub fn identity() -> Self {
        Self::new(UnitQuaternion::identity(), Translation3::identity())
    }

    /// Apply the transform to a point.
    pub fn apply(&self, p: &Point3<f64>) -> Point3<f64> {
        self.rotation.transform_point(p) + self.translation.vector
    }

    /// Flat parameter vector: the 3x3 linear map in row-major order followed
    /// by the offset, twelve numbers in total. The length is fixed by the
    /// problem dimensionality and never varies between calls.
    pub fn parameters(&self) -> [f64; 12] {
        let rot = self.rotation.to_rotation_matrix();
        let m = rot.matrix();
        let t = &self.translation.vector;
        [
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
            t.x,
            t.y,
            t.z,
        ]
    }

    /// Rebuild a transform from the flat encoding produced by
    /// [`parameters`](Self::parameters).
    pub fn from_parameters(p: &[f64; 12]) -> Self {
        let r = Matrix3::new(p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7], p[8]);
        Self::from_rt(r, Vector3::new(p[9], p[10], p[11]))
    }

    /// Homogeneous 4x4 matrix form.
    pub fn to_matrix4(&self) -> Matrix4<f64> {
        let mut m = self.rotation.to_homogeneous();
        m[(0, 3)] = self.translation.vector.x;
        m[(1, 3)] = self.translation.vector.y;
        m[(2, 3)] = self.translation.vector.z;
        m
    }
}
