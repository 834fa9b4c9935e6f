//! Pose values and their composition onto node transforms.
//!
//! A [`Pose`] is a position plus a unit orientation. Composing a pose onto a
//! transform and composing its inverse afterwards restores the transform's
//! position and rotation (up to floating point error), which is what session
//! calibration relies on to undo itself.

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::scene::transform::Transform;

/// Position + orientation (unit quaternion, scalar last).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PoseRepr", into = "PoseRepr")]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Extracts the translation and rotation of a world matrix.
    ///
    /// Scale is discarded.
    #[must_use]
    pub fn from_matrix(matrix: &Affine3A) -> Self {
        let (_, rotation, position) = matrix.to_scale_rotation_translation();
        Self { position, rotation }
    }

    /// `position += pose.position`, then `rotation = rotation * pose.rotation`.
    pub fn apply(&self, transform: &mut Transform) {
        transform.position += self.position;
        transform.rotation *= self.rotation;
    }

    /// Undoes [`Pose::apply`]: conjugate rotation first, then the negated
    /// position.
    pub fn apply_inverse(&self, transform: &mut Transform) {
        transform.rotation *= self.rotation.conjugate();
        transform.position += -self.position;
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ============================================================================
// JSON representation
// ============================================================================

#[derive(Serialize, Deserialize)]
struct Vector3Repr {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Serialize, Deserialize)]
struct Vector4Repr {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

/// `{"position": {x, y, z}, "rotation": {x, y, z, w}}`
#[derive(Serialize, Deserialize)]
struct PoseRepr {
    position: Vector3Repr,
    rotation: Vector4Repr,
}

impl From<PoseRepr> for Pose {
    fn from(repr: PoseRepr) -> Self {
        let p = repr.position;
        let r = repr.rotation;
        let mut rotation = Quat::from_xyzw(r.x, r.y, r.z, r.w);
        // Poses written by other tools are not always unit length.
        let length_squared = rotation.length_squared();
        if length_squared.is_finite() && length_squared > 0.0 {
            rotation = rotation.normalize();
        }
        Self {
            position: Vec3::new(p.x, p.y, p.z),
            rotation,
        }
    }
}

impl From<Pose> for PoseRepr {
    fn from(pose: Pose) -> Self {
        Self {
            position: Vector3Repr {
                x: pose.position.x,
                y: pose.position.y,
                z: pose.position.z,
            },
            rotation: Vector4Repr {
                x: pose.rotation.x,
                y: pose.rotation.y,
                z: pose.rotation.z,
                w: pose.rotation.w,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_json_uses_named_components() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let json = serde_json::to_value(pose).unwrap();
        assert_eq!(json["position"]["y"], 2.0);
        assert_eq!(json["rotation"]["w"], 1.0);

        let back: Pose = serde_json::from_value(json).unwrap();
        assert_eq!(back, pose);
    }

    #[test]
    fn zero_rotation_is_left_for_validation() {
        let json = r#"{
            "position": { "x": 0, "y": 0, "z": 0 },
            "rotation": { "x": 0, "y": 0, "z": 0, "w": 0 }
        }"#;
        let pose: Pose = serde_json::from_str(json).unwrap();
        assert_eq!(pose.rotation, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
    }
}
