use std::f32::consts::{PI, TAU};

use spincrate::transforms::{SceneTransforms, Z_FAR, Z_NEAR};
use spincrate::{Deg, Matrix, Matrix4, Rad, SquareMatrix, Vector4};

const EPS: f32 = 1e-4;

fn resized(width: u32, height: u32) -> SceneTransforms {
    let mut transforms = SceneTransforms::new();
    transforms.resize(width, height, Matrix4::identity());
    transforms
}

fn expected_model(radians: f32) -> [[f32; 4]; 4] {
    Matrix4::from_angle_y(Rad(radians)).transpose().into()
}

fn assert_matrix_eq(actual: [[f32; 4]; 4], expected: [[f32; 4]; 4]) {
    for (column_a, column_e) in actual.iter().zip(expected.iter()) {
        for (a, e) in column_a.iter().zip(column_e.iter()) {
            assert!((a - e).abs() < EPS, "matrix element {a} != {e}");
        }
    }
}

/// Undo the shader-convention transpose to get the plain projection matrix.
fn projection(transforms: &SceneTransforms) -> Matrix4<f32> {
    Matrix4::from(transforms.uniform().projection).transpose()
}

fn view(transforms: &SceneTransforms) -> Matrix4<f32> {
    Matrix4::from(transforms.uniform().view).transpose()
}

#[test]
fn autonomous_rotation_runs_at_45_degrees_per_second() {
    let mut transforms = resized(800, 600);

    transforms.update(0.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(0.0));

    transforms.update(2.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(PI / 2.0));

    transforms.update(4.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(PI));

    // One full period: 8 s at 45°/s wraps back to the start.
    transforms.update(8.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(0.0));
}

#[test]
fn tracking_maps_the_full_width_to_two_turns() {
    let mut transforms = resized(800, 600);
    transforms.start_tracking();

    transforms.tracking_update(0.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(0.0));

    transforms.tracking_update(200.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(PI));

    transforms.tracking_update(400.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(TAU));
    assert_matrix_eq(transforms.uniform().model, expected_model(0.0));

    transforms.tracking_update(800.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(0.0));
}

#[test]
fn tracking_uses_the_current_output_width() {
    let mut transforms = resized(400, 300);
    transforms.start_tracking();

    transforms.tracking_update(100.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(PI));
}

#[test]
fn update_is_suspended_while_tracking() {
    let mut transforms = resized(800, 600);

    transforms.start_tracking();
    transforms.tracking_update(200.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(PI));

    // Only tracking_update may move the model while a drag is active.
    transforms.update(2.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(PI));

    transforms.stop_tracking();
    transforms.update(2.0);
    assert_matrix_eq(transforms.uniform().model, expected_model(PI / 2.0));
}

#[test]
fn tracking_update_is_ignored_without_an_active_gesture() {
    let mut transforms = resized(800, 600);
    let before = transforms.uniform().model;

    transforms.tracking_update(200.0);
    assert_matrix_eq(transforms.uniform().model, before);
}

#[test]
fn is_tracking_reflects_the_gesture() {
    let mut transforms = resized(800, 600);
    assert!(!transforms.is_tracking());
    transforms.start_tracking();
    assert!(transforms.is_tracking());
    transforms.stop_tracking();
    assert!(!transforms.is_tracking());
}

#[test]
fn projection_encodes_a_70_degree_fov_and_the_window_aspect() {
    for (width, height) in [(800u32, 600u32), (1024, 256), (333, 777)] {
        let transforms = resized(width, height);
        let projection = projection(&transforms);

        let aspect = width as f32 / height as f32;
        let y_scale = 1.0 / (35.0f32.to_radians()).tan();
        assert!((projection[1][1] - y_scale).abs() < EPS);
        assert!((projection[0][0] * aspect - projection[1][1]).abs() < EPS);
    }
}

#[test]
fn projection_maps_near_and_far_onto_the_wgpu_depth_range() {
    let transforms = resized(800, 600);
    let projection = projection(&transforms);

    let near = projection * Vector4::new(0.0, 0.0, -Z_NEAR, 1.0);
    assert!((near.z / near.w).abs() < 1e-3);

    let far = projection * Vector4::new(0.0, 0.0, -Z_FAR, 1.0);
    assert!((far.z / far.w - 1.0).abs() < 1e-3);
}

#[test]
fn projection_composes_the_orientation_transform() {
    let upright = projection(&resized(800, 600));

    let mut rotated = SceneTransforms::new();
    rotated.resize(800, 600, Matrix4::from_angle_z(Deg(90.0)));
    let rotated = projection(&rotated);

    let expected = Matrix4::from_angle_z(Deg(90.0)) * upright;
    assert_matrix_eq(rotated.into(), expected.into());
}

#[test]
fn view_looks_from_the_fixed_eye_towards_the_target() {
    let transforms = resized(800, 600);
    assert_eq!(transforms.uniform().camera_pos, [0.0, 0.7, 1.5, 0.0]);

    let view = view(&transforms);

    // The eye maps to the view-space origin.
    let eye = view * Vector4::new(0.0, 0.7, 1.5, 1.0);
    assert!(eye.x.abs() < EPS && eye.y.abs() < EPS && eye.z.abs() < EPS);

    // The target sits straight ahead, down the negative z axis.
    let target = view * Vector4::new(0.0, -0.1, 0.0, 1.0);
    assert!(target.x.abs() < EPS);
    assert!(target.y.abs() < EPS);
    assert!(target.z < 0.0);
}

#[test]
fn view_and_projection_survive_model_updates() {
    let mut transforms = resized(800, 600);
    let view_before = transforms.uniform().view;
    let projection_before = transforms.uniform().projection;

    transforms.update(3.0);
    transforms.start_tracking();
    transforms.tracking_update(123.0);
    transforms.stop_tracking();

    assert_matrix_eq(transforms.uniform().view, view_before);
    assert_matrix_eq(transforms.uniform().projection, projection_before);
}
