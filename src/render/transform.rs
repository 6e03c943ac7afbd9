//! Transform Pipeline
//!
//! Owns every matrix the viewer uses. The camera is fixed: view and
//! projection are computed once at startup and `view_projection` is their
//! cached product — it must never be re-derived inside the frame loop. Only
//! the model matrix changes per frame, driven by a frame counter that maps
//! to one degree of rotation per frame.

use glam::{Mat4, Vec3};

/// Camera eye position.
pub const EYE: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Camera up vector. Inverted (negative Y) to match the vertically-flipped
/// coordinate convention of the source assets; must stay inverted.
pub const UP: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// Vertical field of view, degrees.
pub const FOV_Y_DEGREES: f32 = 75.0;
/// Near clip plane.
pub const Z_NEAR: f32 = 0.1;
/// Far clip plane.
pub const Z_FAR: f32 = 100.0;

/// Model rotation axis. Not a unit vector as written; the rotation is about
/// its direction (the unit axis is taken at the call site).
pub const ROTATION_AXIS: Vec3 = Vec3::new(0.0, 1.0, 1.0);

/// The rotation angle repeats after this many frames.
pub const ROTATION_PERIOD_FRAMES: u64 = 360;

/// Per-session transform state, owned by the render loop.
///
/// `view`, `projection` and `view_projection` are fixed after construction
/// (aside from aspect changes on resize); `model`, `mvp` and `frame` advance
/// once per frame.
#[derive(Debug, Clone)]
pub struct TransformState {
    /// Per-frame model rotation.
    pub model: Mat4,
    /// Fixed look-at view matrix.
    pub view: Mat4,
    /// Fixed perspective projection.
    pub projection: Mat4,
    /// Cached `projection * view`, computed once.
    pub view_projection: Mat4,
    /// Per-frame `view_projection * model`.
    pub mvp: Mat4,
    /// Frame counter; unbounded, consumed mod [`ROTATION_PERIOD_FRAMES`].
    pub frame: u64,
}

impl TransformState {
    /// Builds the fixed camera matrices for the given surface aspect ratio.
    #[must_use]
    pub fn new(aspect: f32) -> Self {
        let view = Mat4::look_at_rh(EYE, Vec3::ZERO, UP);
        let projection =
            Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
        let view_projection = projection * view;

        Self {
            model: Mat4::IDENTITY,
            view,
            projection,
            view_projection,
            mvp: view_projection,
            frame: 0,
        }
    }

    /// Rotation angle in radians for a given frame: (frame mod 360) degrees.
    #[must_use]
    pub fn rotation_radians(frame: u64) -> f32 {
        ((frame % ROTATION_PERIOD_FRAMES) as f32).to_radians()
    }

    /// Advances one frame: recomputes the model matrix from the counter,
    /// refreshes `mvp`, then increments the counter. Returns the new `mvp`.
    pub fn advance(&mut self) -> Mat4 {
        let angle = Self::rotation_radians(self.frame);
        self.model = Mat4::from_axis_angle(ROTATION_AXIS.normalize(), angle);
        self.mvp = self.view_projection * self.model;
        self.frame += 1;
        self.mvp
    }

    /// Rebuilds the projection (and the cached view-projection product) for
    /// a new aspect ratio. Called on resize, never from the frame loop.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection =
            Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
        self.view_projection = self.projection * self.view;
    }
}
