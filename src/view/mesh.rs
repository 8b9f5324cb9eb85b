use bytemuck::{Pod, Zeroable};
use std::f32::consts::TAU;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn upload(&self, device: &wgpu::Device, label: &str) -> MeshBuffer {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vertices")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} indices")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }

    /// Horizontal fan facing +Y (or -Y when `up` is false) at height `y`.
    fn push_cap(&mut self, radius: f32, y: f32, segments: u32, up: bool) {
        let normal = if up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
        let center = self.vertices.len() as u32;
        self.vertices.push(Vertex { pos: [0.0, y, 0.0], normal });
        for i in 0..segments {
            let (s, c) = (i as f32 / segments as f32 * TAU).sin_cos();
            self.vertices.push(Vertex { pos: [radius * c, y, radius * s], normal });
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = center + 1 + (i + 1) % segments;
            // counter-clockwise seen from the side the normal points to
            if up {
                self.indices.extend_from_slice(&[center, b, a]);
            } else {
                self.indices.extend_from_slice(&[center, a, b]);
            }
        }
    }
}

/// Closed cylinder centered on the origin, axis along Y.
pub fn create_cylinder_mesh(radius: f32, height: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut mesh = Mesh::default();

    // side wall: one bottom/top vertex pair per segment edge, outward normals
    for i in 0..=segments {
        let (s, c) = (i as f32 / segments as f32 * TAU).sin_cos();
        let normal = [c, 0.0, s];
        mesh.vertices.push(Vertex { pos: [radius * c, -half, radius * s], normal });
        mesh.vertices.push(Vertex { pos: [radius * c, half, radius * s], normal });
    }
    for i in 0..segments {
        let bottom = i * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        mesh.indices.extend_from_slice(&[bottom, top, next_bottom, next_bottom, top, next_top]);
    }

    mesh.push_cap(radius, half, segments, true);
    mesh.push_cap(radius, -half, segments, false);
    mesh
}

/// Flat disc in the XZ plane facing +Y.
pub fn create_disc_mesh(radius: f32, segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.push_cap(radius, 0.0, segments.max(3), true);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Every triangle's winding normal must agree with its vertex normals.
    fn assert_outward(mesh: &Mesh) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let pa = Vec3::from(a.pos);
            let face = (Vec3::from(b.pos) - pa).cross(Vec3::from(c.pos) - pa);
            let shading = Vec3::from(a.normal) + Vec3::from(b.normal) + Vec3::from(c.normal);
            assert!(face.dot(shading) > 0.0, "triangle {tri:?} winds inward");
        }
    }

    #[test]
    fn cylinder_counts_and_bounds() {
        let mesh = create_cylinder_mesh(2.0, 0.2, 32);
        // 33 side pairs + 2 caps of (center + 32)
        assert_eq!(mesh.vertices.len(), 33 * 2 + 2 * 33);
        assert_eq!(mesh.indices.len(), 32 * 6 + 2 * 32 * 3);
        for v in &mesh.vertices {
            assert!(v.pos[1].abs() <= 0.1 + f32::EPSILON);
            assert!((v.pos[0] * v.pos[0] + v.pos[2] * v.pos[2]).sqrt() <= 2.0 + 1e-5);
        }
        assert_outward(&mesh);
    }

    #[test]
    fn disc_faces_up() {
        let mesh = create_disc_mesh(1.0, 16);
        assert_eq!(mesh.indices.len(), 16 * 3);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0] && v.pos[1] == 0.0));
        assert_outward(&mesh);
    }

    #[test]
    fn degenerate_segment_counts_are_raised() {
        assert_eq!(create_disc_mesh(1.0, 0).indices.len(), 9);
    }
}
