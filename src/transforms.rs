//! Scene transform state: model, view and projection matrices plus the
//! drag-tracking state machine.
//!
//! This is the renderer's only real state machine and it is deliberately free
//! of GPU types so it can be exercised without a device. View and projection
//! are recomputed on [`resize`](SceneTransforms::resize) only; the model
//! matrix is rebuilt either by the autonomous spin in
//! [`update`](SceneTransforms::update) or by
//! [`tracking_update`](SceneTransforms::tracking_update) while a drag is
//! active, never by both in the same call.

use cgmath::{Deg, Matrix, Matrix4, Point3, Rad, SquareMatrix, Vector3};

/// Speed of the autonomous spin.
pub const DEGREES_PER_SECOND: f32 = 45.0;

/// Vertical field of view of the scene camera.
pub const FOV_Y: Deg<f32> = Deg(70.0);
pub const Z_NEAR: f32 = 0.01;
pub const Z_FAR: f32 = 100.0;

/// Remaps the OpenGL-convention clip cube produced by cgmath (z in -1..1)
/// to wgpu's depth range (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Uniform block consumed by the vertex shader.
///
/// All three matrices are stored transposed because the shader multiplies
/// vectors from the left. The camera position is carried alongside for the
/// specular term in the fragment stage.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

impl TransformUniform {
    pub fn new() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        Self {
            model: identity,
            view: identity,
            projection: identity,
            camera_pos: [0.0; 4],
        }
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform state machine: autonomous Y-axis spin, overridden by an absolute
/// horizontal drag mapping while tracking is active.
#[derive(Debug)]
pub struct SceneTransforms {
    uniform: TransformUniform,
    tracking: bool,
    output_width: f32,
    output_height: f32,
}

impl SceneTransforms {
    pub fn new() -> Self {
        Self {
            uniform: TransformUniform::new(),
            tracking: false,
            output_width: 1.0,
            output_height: 1.0,
        }
    }

    /// Recompute view and projection for a new output size and display
    /// orientation. The projection is a right-handed 70° perspective composed
    /// with the depth-range remap and the orientation correction; the view is
    /// a fixed look-at slightly above and in front of the cube.
    pub fn resize(&mut self, width: u32, height: u32, orientation: Matrix4<f32>) {
        self.output_width = width.max(1) as f32;
        self.output_height = height.max(1) as f32;
        let aspect = self.output_width / self.output_height;

        let perspective = cgmath::perspective(FOV_Y, aspect, Z_NEAR, Z_FAR);
        let projection = orientation * OPENGL_TO_WGPU_MATRIX * perspective;
        self.uniform.projection = projection.transpose().into();

        let eye = Point3::new(0.0, 0.7, 1.5);
        let target = Point3::new(0.0, -0.1, 0.0);
        let view = Matrix4::look_at_rh(eye, target, Vector3::unit_y());
        self.uniform.view = view.transpose().into();

        self.uniform.camera_pos = [eye.x, eye.y, eye.z, 0.0];
    }

    /// Advance the autonomous spin to the angle implied by the total elapsed
    /// time. Suspended entirely while a drag is being tracked.
    pub fn update(&mut self, total_seconds: f64) {
        if self.tracking {
            return;
        }
        let total_rotation = total_seconds * f64::from(DEGREES_PER_SECOND.to_radians());
        let radians = (total_rotation % std::f64::consts::TAU) as f32;
        self.rotate(radians);
    }

    pub fn start_tracking(&mut self) {
        self.tracking = true;
    }

    /// Absolute mapping of horizontal position to rotation angle: dragging
    /// across the full output width sweeps two full turns. No momentum, no
    /// smoothing.
    pub fn tracking_update(&mut self, position_x: f32) {
        if self.tracking {
            let radians = std::f32::consts::TAU * 2.0 * position_x / self.output_width;
            self.rotate(radians);
        }
    }

    pub fn stop_tracking(&mut self) {
        self.tracking = false;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn output_size(&self) -> (f32, f32) {
        (self.output_width, self.output_height)
    }

    pub fn uniform(&self) -> &TransformUniform {
        &self.uniform
    }

    fn rotate(&mut self, radians: f32) {
        self.uniform.model = Matrix4::from_angle_y(Rad(radians)).transpose().into();
    }
}

impl Default for SceneTransforms {
    fn default() -> Self {
        Self::new()
    }
}
