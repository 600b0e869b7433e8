use std::{fmt, ops::Range, rc::Rc};

use cgmath::{InnerSpace, Vector2, Vector3};
use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use crate::gfx::resources::TextureResource;

/// Semantic role of a texture attached to a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Normal,
    Height,
}

impl TextureKind {
    /// Prefix of the sampler slot name for this kind
    pub fn slot_prefix(self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
            TextureKind::Normal => "texture_normal",
            TextureKind::Height => "texture_height",
        }
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot_prefix())
    }
}

/// A texture attached to a mesh, shared through the model's texture cache
#[derive(Clone)]
pub struct MeshTexture {
    pub kind: TextureKind,
    /// Path as written in the source material
    pub path: String,
    pub texture: Rc<TextureResource>,
}

/// Names every texture `<kind><n>`, counting each kind from 1 in declaration order
pub fn texture_slot_names(kinds: impl IntoIterator<Item = TextureKind>) -> Vec<String> {
    let (mut diffuse, mut specular, mut normal, mut height) = (0u32, 0u32, 0u32, 0u32);
    kinds
        .into_iter()
        .map(|kind| {
            let counter = match kind {
                TextureKind::Diffuse => &mut diffuse,
                TextureKind::Specular => &mut specular,
                TextureKind::Normal => &mut normal,
                TextureKind::Height => &mut height,
            };
            *counter += 1;
            format!("{}{}", kind.slot_prefix(), counter)
        })
        .collect()
}

struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

pub struct Mesh {
    pub name: String,
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    textures: Vec<MeshTexture>,
    buffers: Option<MeshBuffers>,
    index_count: u32,
}

impl Mesh {
    pub fn new(
        name: &str,
        vertices: Vec<Vertex3D>,
        indices: Vec<u32>,
        textures: Vec<MeshTexture>,
    ) -> Self {
        let index_count = indices.len() as u32;
        Self {
            name: name.to_string(),
            vertices,
            indices,
            textures,
            buffers: None,
            index_count,
        }
    }

    pub fn textures(&self) -> &[MeshTexture] {
        &self.textures
    }

    /// Slot name for each texture, in the same order as [`Mesh::textures`]
    pub fn texture_slots(&self) -> Vec<String> {
        texture_slot_names(self.textures.iter().map(|t| t.kind))
    }

    /// The texture bound to the named slot, e.g. `texture_diffuse1`
    pub fn texture_in_slot(&self, slot: &str) -> Option<&MeshTexture> {
        self.texture_slots()
            .iter()
            .position(|name| name == slot)
            .map(|index| &self.textures[index])
    }

    /// Creates the vertex and index buffers
    pub fn upload(&mut self, device: &wgpu::Device) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Vertex Buffer: {}", self.name)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Index Buffer: {}", self.name)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.buffers = Some(MeshBuffers {
            vertex_buffer,
            index_buffer,
        });
    }
}

/// Area-weighted vertex normals from triangle faces
pub fn calculate_face_normals(vertices: &mut [Vertex3D], indices: &[u32]) {
    let mut sums = vec![Vector3::new(0.0f32, 0.0, 0.0); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        let v0 = Vector3::from(vertices[i0].position);
        let v1 = Vector3::from(vertices[i1].position);
        let v2 = Vector3::from(vertices[i2].position);

        let face_normal = (v1 - v0).cross(v2 - v0);
        for index in [i0, i1, i2] {
            sums[index] += face_normal;
        }
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        if sum.magnitude2() > 0.0 {
            vertex.normal = sum.normalize().into();
        }
    }
}

/// Per-vertex tangent and bitangent from positions and texture coordinates
///
/// Triangles with degenerate UVs are skipped.
pub fn calculate_tangents(vertices: &mut [Vertex3D], indices: &[u32]) {
    let zero = Vector3::new(0.0f32, 0.0, 0.0);
    let mut tangents = vec![zero; vertices.len()];
    let mut bitangents = vec![zero; vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        let p0 = Vector3::from(vertices[i0].position);
        let edge1 = Vector3::from(vertices[i1].position) - p0;
        let edge2 = Vector3::from(vertices[i2].position) - p0;

        let uv0 = Vector2::from(vertices[i0].tex_coords);
        let duv1 = Vector2::from(vertices[i1].tex_coords) - uv0;
        let duv2 = Vector2::from(vertices[i2].tex_coords) - uv0;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < f32::EPSILON {
            continue;
        }
        let r = 1.0 / det;
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) * r;
        let bitangent = (edge2 * duv1.x - edge1 * duv2.x) * r;

        for index in [i0, i1, i2] {
            tangents[index] += tangent;
            bitangents[index] += bitangent;
        }
    }

    for ((vertex, tangent), bitangent) in vertices.iter_mut().zip(tangents).zip(bitangents) {
        if tangent.magnitude2() > 0.0 {
            vertex.tangent = tangent.normalize().into();
        }
        if bitangent.magnitude2() > 0.0 {
            vertex.bitangent = bitangent.normalize().into();
        }
    }
}

pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        // not uploaded yet
        let Some(buffers) = &mesh.buffers else {
            return;
        };
        self.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
        self.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TextureKind::*;

    #[test]
    fn test_slot_names_count_per_kind() {
        let names = texture_slot_names([Diffuse, Specular, Diffuse, Normal, Height, Specular]);
        assert_eq!(
            names,
            [
                "texture_diffuse1",
                "texture_specular1",
                "texture_diffuse2",
                "texture_normal1",
                "texture_height1",
                "texture_specular2",
            ]
        );
    }

    #[test]
    fn test_first_texture_gets_a_slot() {
        assert_eq!(texture_slot_names([Specular]), ["texture_specular1"]);
        assert!(texture_slot_names([]).is_empty());
    }

    #[test]
    fn test_face_normals_of_flat_quad() {
        let mut vertices = vec![
            Vertex3D::new([0.0, 0.0, 0.0], [0.0; 3], [0.0, 0.0]),
            Vertex3D::new([1.0, 0.0, 0.0], [0.0; 3], [1.0, 0.0]),
            Vertex3D::new([1.0, 1.0, 0.0], [0.0; 3], [1.0, 1.0]),
            Vertex3D::new([0.0, 1.0, 0.0], [0.0; 3], [0.0, 1.0]),
        ];
        let indices = [0, 1, 2, 2, 3, 0];
        calculate_face_normals(&mut vertices, &indices);
        for vertex in &vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }

        calculate_tangents(&mut vertices, &indices);
        for vertex in &vertices {
            assert_eq!(vertex.tangent, [1.0, 0.0, 0.0]);
            assert_eq!(vertex.bitangent, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_unreferenced_vertex_keeps_normal() {
        let mut vertices = vec![Vertex3D::new([5.0, 5.0, 5.0], [0.0, 1.0, 0.0], [0.0; 2]); 4];
        vertices[1].position = [1.0, 0.0, 0.0];
        vertices[2].position = [0.0, 0.0, -1.0];
        vertices[0].position = [0.0, 0.0, 0.0];
        calculate_face_normals(&mut vertices, &[0, 1, 2]);
        assert_eq!(vertices[3].normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[0].normal, [0.0, 1.0, 0.0]);
    }
}
