//! CPU-side records written into the gizmo vertex buffers.
//!
//! Records are `Pod` so a slice of them uploads with a single
//! `bytemuck::cast_slice`, with no conversion pass.

use crate::Color;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One gizmo vertex: homogeneous position followed by RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GizmoVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl GizmoVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

    /// A vertex at `position` with `w = 1`.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            color: color.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }

    pub fn color(&self) -> Color {
        Color::from(self.color)
    }

    /// Layout shared by the line and triangle pipelines.
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A line segment record: two vertices drawn as a line list.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GizmoLine {
    pub start: GizmoVertex,
    pub end: GizmoVertex,
}

impl GizmoLine {
    pub fn new(start: Vec3, end: Vec3, start_color: Color, end_color: Color) -> Self {
        Self {
            start: GizmoVertex::new(start, start_color),
            end: GizmoVertex::new(end, end_color),
        }
    }

    pub fn length(&self) -> f32 {
        self.start.position().distance(self.end.position())
    }
}

/// A triangle record: three vertices of one color drawn as a triangle list.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GizmoTriangle {
    pub vertices: [GizmoVertex; 3],
}

impl GizmoTriangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, color: Color) -> Self {
        Self {
            vertices: [
                GizmoVertex::new(a, color),
                GizmoVertex::new(b, color),
                GizmoVertex::new(c, color),
            ],
        }
    }

    /// Unnormalised face normal following the vertex winding.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices.map(|v| v.position());
        (b - a).cross(c - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sizes_match_vertex_stride() {
        assert_eq!(std::mem::size_of::<GizmoVertex>(), 32);
        assert_eq!(std::mem::size_of::<GizmoLine>(), 64);
        assert_eq!(std::mem::size_of::<GizmoTriangle>(), 96);
        assert_eq!(GizmoVertex::buffer_layout().array_stride, 32);
    }

    #[test]
    fn test_vertex_is_homogeneous() {
        let vertex = GizmoVertex::new(Vec3::new(1.0, 2.0, 3.0), Color::RED);
        assert_eq!(vertex.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(vertex.color(), Color::RED);
    }

    #[test]
    fn test_line_bytes_are_vertex_pairs() {
        let line = GizmoLine::new(Vec3::ZERO, Vec3::X, Color::WHITE, Color::BLUE);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&line));

        assert_eq!(&floats[0..4], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(&floats[12..16], &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(line.length(), 1.0);
    }
}
