use glam::{Affine3A, Quat, Vec3};

/// Transform component
///
/// Position, rotation and scale (TRS) of a node plus the cached local/world
/// matrices. The local matrix is only rebuilt when one of the public
/// properties changed since the last update.
#[derive(Debug, Clone)]
pub struct Transform {
    // === Public properties ===
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    // === Matrix cache ===
    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    // === Dirty checking ===
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    // ========================================================================
    // Matrix update (shadow state check)
    // ========================================================================

    /// Rebuilds the local matrix if any TRS component changed.
    ///
    /// Returns whether the matrix was rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    pub fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    // ========================================================================
    // Local-space helpers
    // ========================================================================

    /// Moves along `axis` expressed in this transform's local frame.
    ///
    /// `axis` is expected to be normalized.
    pub fn translate_on_axis(&mut self, axis: Vec3, distance: f32) {
        self.position += self.rotation * (axis * distance);
    }

    pub fn translate_x(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::X, distance);
    }

    pub fn translate_y(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::Y, distance);
    }

    pub fn translate_z(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::Z, distance);
    }

    /// Rotates about `axis` expressed in this transform's local frame.
    pub fn rotate_on_axis(&mut self, axis: Vec3, angle: f32) {
        self.rotation *= Quat::from_axis_angle(axis, angle);
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.rotate_on_axis(Vec3::Y, angle);
    }

    /// LookAt transform.
    ///
    /// `target` and `up` are in the parent's coordinate frame.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();

        if forward.cross(up).length_squared() < 1e-4 {
            return;
        }

        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = glam::Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
    }

    /// Back to position zero, no rotation, unit scale.
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.rotation = Quat::IDENTITY;
        self.scale = Vec3::ONE;
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
