use spincrate::cube::{CUBE_INDICES, CUBE_VERTICES, Vertex};
use spincrate::{InnerSpace, Vector3};

fn position(index: u16) -> Vector3<f32> {
    Vector3::from(CUBE_VERTICES[index as usize].position)
}

#[test]
fn mesh_has_eight_corners_and_twelve_triangles() {
    assert_eq!(CUBE_VERTICES.len(), 8);
    assert_eq!(CUBE_INDICES.len(), 36);
    assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
}

#[test]
fn vertex_layout_matches_the_shader_inputs() {
    let layout = Vertex::desc();
    assert_eq!(layout.array_stride, 44);
    assert_eq!(layout.attributes.len(), 4);

    let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
    assert_eq!(offsets, vec![0, 12, 24, 36]);

    let locations: Vec<u32> = layout.attributes.iter().map(|a| a.shader_location).collect();
    assert_eq!(locations, vec![0, 1, 2, 3]);
}

#[test]
fn triangles_wind_counter_clockwise_seen_from_outside() {
    // The cube is centered at the origin, so a triangle faces outwards exactly
    // when its winding normal points away from the origin.
    for triangle in CUBE_INDICES.chunks(3) {
        let a = position(triangle[0]);
        let b = position(triangle[1]);
        let c = position(triangle[2]);

        let winding_normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(
            winding_normal.dot(centroid) > 0.0,
            "triangle {triangle:?} faces inwards"
        );
    }
}

#[test]
fn each_face_is_covered_by_two_triangles() {
    let axes = [
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, -1.0),
        Vector3::new(0.0, 0.0, 1.0),
    ];
    let mut per_face = [0usize; 6];

    for triangle in CUBE_INDICES.chunks(3) {
        let a = position(triangle[0]);
        let b = position(triangle[1]);
        let c = position(triangle[2]);
        let normal = (b - a).cross(c - a).normalize();

        let face = axes
            .iter()
            .position(|axis| (normal - axis).magnitude() < 1e-6)
            .unwrap_or_else(|| panic!("triangle {triangle:?} is not axis-aligned"));
        per_face[face] += 1;
    }

    assert_eq!(per_face, [2; 6]);
}

#[test]
fn corner_normals_are_unit_diagonals() {
    for vertex in &CUBE_VERTICES {
        let normal = Vector3::from(vertex.normal);
        assert!((normal.magnitude() - 1.0).abs() < 1e-3);

        // Each normal points into the same octant as its corner.
        let corner = Vector3::from(vertex.position);
        assert!(normal.x.signum() == corner.x.signum());
        assert!(normal.y.signum() == corner.y.signum());
        assert!(normal.z.signum() == corner.z.signum());
    }
}

#[test]
fn uvs_stay_inside_the_texture() {
    for vertex in &CUBE_VERTICES {
        assert!((0.0..=1.0).contains(&vertex.uv[0]));
        assert!((0.0..=1.0).contains(&vertex.uv[1]));
    }
}
