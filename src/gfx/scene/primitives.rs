//! # Primitive Shapes
//!
//! Fixed geometry used by the lessons. All shapes have outward normals and
//! texture coordinates with the origin at the top-left corner.

use cgmath::Vector3;

use super::vertex::Vertex3D;

/// Positions of the ten cubes drawn by the camera and lighting lessons
pub const CUBE_POSITIONS: [Vector3<f32>; 10] = [
    Vector3::new(0.0, 0.0, 0.0),
    Vector3::new(2.0, 5.0, -15.0),
    Vector3::new(-1.5, -2.2, -2.5),
    Vector3::new(-3.8, -2.0, -12.3),
    Vector3::new(2.4, -0.4, -3.5),
    Vector3::new(-1.7, 3.0, -7.5),
    Vector3::new(1.3, -2.0, -2.5),
    Vector3::new(1.5, 2.0, -2.5),
    Vector3::new(1.5, 0.2, -1.5),
    Vector3::new(-1.3, 1.0, -1.5),
];

/// Single triangle in clip-space-sized coordinates
pub fn triangle() -> (Vec<Vertex3D>, Vec<u32>) {
    let normal = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex3D::new([-0.5, -0.5, 0.0], normal, [0.0, 1.0]),
        Vertex3D::new([0.5, -0.5, 0.0], normal, [1.0, 1.0]),
        Vertex3D::new([0.0, 0.5, 0.0], normal, [0.5, 0.0]),
    ];
    (vertices, vec![0, 1, 2])
}

/// Unit quad in the XY plane facing +Z
pub fn quad() -> (Vec<Vertex3D>, Vec<u32>) {
    let normal = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex3D::new([0.5, 0.5, 0.0], normal, [1.0, 0.0]),
        Vertex3D::new([0.5, -0.5, 0.0], normal, [1.0, 1.0]),
        Vertex3D::new([-0.5, -0.5, 0.0], normal, [0.0, 1.0]),
        Vertex3D::new([-0.5, 0.5, 0.0], normal, [0.0, 0.0]),
    ];
    (vertices, vec![0, 3, 1, 1, 3, 2])
}

/// Unit cube centered at the origin, four vertices per face
pub fn cube() -> (Vec<Vertex3D>, Vec<u32>) {
    // (normal, corners in counter-clockwise order seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [0.5, -0.5, 0.5],
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        ),
    ];
    let tex_coords = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.into_iter().zip(tex_coords) {
            vertices.push(Vertex3D::new(corner, normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    super::mesh::calculate_tangents(&mut vertices, &indices);
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_cube_generation() {
        let (vertices, indices) = cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_cube_winding_matches_normals() {
        let (vertices, indices) = cube();
        for triangle in indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vector3::from(vertices[triangle[k] as usize].position));
            let face = (b - a).cross(c - a).normalize();
            let normal = Vector3::from(vertices[triangle[0] as usize].normal);
            assert!((face - normal).magnitude() < 1e-6);
        }
    }

    #[test]
    fn test_quad_winding_faces_viewer() {
        let (vertices, indices) = quad();
        for triangle in indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vector3::from(vertices[triangle[k] as usize].position));
            assert!((b - a).cross(c - a).z > 0.0);
        }
    }
}
