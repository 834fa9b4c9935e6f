//! Session Calibration
//!
//! When an immersive session starts, the user space container is moved so
//! the virtual origin lines up with where the headset was when the recording
//! was calibrated. Ending the session undoes every step in reverse order,
//! leaving the container at identity and the camera where it was.

use std::f32::consts::PI;

use crate::scene::{NodeHandle, Pose, Scene};

/// Fixed offsets of the physical rig, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigOffsets {
    /// Eye height above the floor.
    pub height: f32,
    /// Distance from the capture origin to the viewing position.
    pub depth: f32,
}

impl Default for RigOffsets {
    fn default() -> Self {
        Self {
            height: 1.5,
            depth: 1.5,
        }
    }
}

/// Where the camera lived before the session took it over.
#[derive(Debug, Clone, Copy, Default)]
enum CameraHome {
    #[default]
    Detached,
    Root,
    Parent(NodeHandle),
}

#[derive(Debug, Clone, Default)]
pub struct SessionCalibration {
    offsets: RigOffsets,
    /// Device pose recorded during calibration (`headsetPose`).
    recorded_pose: Option<Pose>,

    active: bool,
    pose_applied: bool,
    camera_home: CameraHome,
}

impl SessionCalibration {
    #[must_use]
    pub fn new(recorded_pose: Option<Pose>) -> Self {
        Self {
            recorded_pose,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_offsets(mut self, offsets: RigOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    #[must_use]
    pub fn recorded_pose(&self) -> Option<&Pose> {
        self.recorded_pose.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn offsets(&self) -> RigOffsets {
        self.offsets
    }

    /// Session start: identity, rig offsets, then the recorded pose.
    ///
    /// The camera is parented to the user space container for the duration of
    /// the session.
    pub fn begin(&mut self, scene: &mut Scene, user_space: NodeHandle, camera: NodeHandle) {
        if self.active {
            log::warn!("Immersive session already calibrated; ignoring start.");
            return;
        }
        let Some(transform) = scene.transform_mut(user_space) else {
            log::error!("User space node not found; cannot calibrate session.");
            return;
        };

        transform.reset();
        transform.translate_y(self.offsets.height);

        self.camera_home = match scene.get_node(camera).and_then(|n| n.parent()) {
            Some(parent) => CameraHome::Parent(parent),
            None if scene.root_nodes.contains(&camera) => CameraHome::Root,
            None => CameraHome::Detached,
        };
        scene.attach(camera, user_space);

        let Some(transform) = scene.transform_mut(user_space) else {
            return;
        };
        transform.translate_z(-self.offsets.depth);
        transform.rotate_y(PI);

        if let Some(pose) = &self.recorded_pose {
            log::debug!("Initialising headset with pose: {pose:?}");
            pose.apply(transform);
            self.pose_applied = true;
        }

        self.active = true;
        log::info!("Entered XR mode.");
    }

    /// Session end: exactly reverses [`begin`](Self::begin), then resets the
    /// container to identity.
    pub fn end(&mut self, scene: &mut Scene, user_space: NodeHandle, camera: NodeHandle) {
        if !self.active {
            log::warn!("No calibrated immersive session to end.");
            return;
        }
        let Some(transform) = scene.transform_mut(user_space) else {
            log::error!("User space node not found; cannot undo calibration.");
            return;
        };

        if self.pose_applied {
            if let Some(pose) = &self.recorded_pose {
                pose.apply_inverse(transform);
            }
            self.pose_applied = false;
        }

        transform.rotate_y(-PI);
        transform.translate_z(self.offsets.depth);

        match std::mem::take(&mut self.camera_home) {
            CameraHome::Parent(parent) => scene.attach(camera, parent),
            CameraHome::Root => scene.attach_to_root(camera),
            CameraHome::Detached => scene.detach(camera),
        }

        if let Some(transform) = scene.transform_mut(user_space) {
            transform.translate_y(-self.offsets.height);
            transform.reset();
        }

        self.active = false;
        log::info!("Exited XR mode.");
    }
}
