//! Fixed-capacity accumulation of gizmo lines and triangles.

use crate::{Color, GizmoLine, GizmoTriangle};
use glam::{Mat4, Vec3};

/// Default line capacity of a [`GizmoBatch`].
pub const DEFAULT_MAX_LINES: usize = 16384;
/// Default triangle capacity of a [`GizmoBatch`].
pub const DEFAULT_MAX_TRIANGLES: usize = 16384;

/// CPU-side storage for one frame of debug geometry.
///
/// Both record arrays are allocated once at their full capacity. Once a
/// capacity is reached further primitives of that kind are dropped until the
/// next [`clear`](Self::clear); nothing grows and nothing errors. Drops are
/// counted ([`dropped_lines`](Self::dropped_lines)) and the first one after a
/// clear is logged.
///
/// Shape builders (`add_box`, `add_sphere`, ...) live in [`crate::shapes`] and
/// decompose into [`add_line`](Self::add_line) and
/// [`add_triangle`](Self::add_triangle), so they obey the same policy.
#[derive(Debug, Clone)]
pub struct GizmoBatch {
    lines: Vec<GizmoLine>,
    triangles: Vec<GizmoTriangle>,
    max_lines: usize,
    max_triangles: usize,
    dropped_lines: usize,
    dropped_triangles: usize,
}

impl GizmoBatch {
    pub fn new(max_lines: usize, max_triangles: usize) -> Self {
        tracing::debug!(max_lines, max_triangles, "Allocating gizmo batch");
        Self {
            lines: Vec::with_capacity(max_lines),
            triangles: Vec::with_capacity(max_triangles),
            max_lines,
            max_triangles,
            dropped_lines: 0,
            dropped_triangles: 0,
        }
    }

    /// Reset both counts to zero. Allocated storage is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.triangles.clear();
        self.dropped_lines = 0;
        self.dropped_triangles = 0;
    }

    /// Append a line with a color per endpoint.
    pub fn add_line(&mut self, start: Vec3, end: Vec3, start_color: Color, end_color: Color) {
        if self.lines.len() >= self.max_lines {
            if self.dropped_lines == 0 {
                tracing::warn!(
                    max_lines = self.max_lines,
                    "Gizmo line capacity reached, dropping lines until the next clear"
                );
            }
            self.dropped_lines += 1;
            return;
        }

        self.lines.push(GizmoLine::new(start, end, start_color, end_color));
    }

    /// Append a line of a single color.
    #[inline]
    pub fn add_line_solid(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.add_line(start, end, color, color);
    }

    /// Append a triangle of a single color.
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Color) {
        if self.triangles.len() >= self.max_triangles {
            if self.dropped_triangles == 0 {
                tracing::warn!(
                    max_triangles = self.max_triangles,
                    "Gizmo triangle capacity reached, dropping triangles until the next clear"
                );
            }
            self.dropped_triangles += 1;
            return;
        }

        self.triangles.push(GizmoTriangle::new(a, b, c, color));
    }

    /// Draw the three basis axes of `transform` from its translation,
    /// red for X, green for Y and blue for Z, each `scale` units long.
    pub fn add_transform_axes(&mut self, transform: &Mat4, scale: f32) {
        let origin = transform.w_axis.truncate();
        let axes = [
            (transform.x_axis.truncate(), Color::RED),
            (transform.y_axis.truncate(), Color::GREEN),
            (transform.z_axis.truncate(), Color::BLUE),
        ];

        for (axis, color) in axes {
            self.add_line_solid(origin, origin + axis * scale, color);
        }
    }

    pub fn lines(&self) -> &[GizmoLine] {
        &self.lines
    }

    pub fn triangles(&self) -> &[GizmoTriangle] {
        &self.triangles
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn max_triangles(&self) -> usize {
        self.max_triangles
    }

    /// Lines rejected since the last clear.
    pub fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }

    /// Triangles rejected since the last clear.
    pub fn dropped_triangles(&self) -> usize {
        self.dropped_triangles
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }
}

impl Default for GizmoBatch {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES, DEFAULT_MAX_TRIANGLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_capacity_drops_overflow() {
        let mut batch = GizmoBatch::new(3, 1);
        for i in 0..3 {
            batch.add_line_solid(Vec3::ZERO, Vec3::splat(i as f32), Color::WHITE);
        }
        assert_eq!(batch.line_count(), 3);

        batch.add_line_solid(Vec3::ZERO, Vec3::ONE, Color::RED);
        batch.add_line_solid(Vec3::ZERO, Vec3::ONE, Color::RED);

        assert_eq!(batch.line_count(), 3);
        assert_eq!(batch.dropped_lines(), 2);
        assert!(batch.lines().iter().all(|line| line.start.color() == Color::WHITE));
    }

    #[test]
    fn test_triangle_capacity_drops_overflow() {
        let mut batch = GizmoBatch::new(0, 2);
        for _ in 0..5 {
            batch.add_triangle(Vec3::ZERO, Vec3::X, Vec3::Y, Color::GREEN);
        }

        assert_eq!(batch.triangle_count(), 2);
        assert_eq!(batch.dropped_triangles(), 3);
        assert_eq!(batch.line_count(), 0);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut batch = GizmoBatch::new(2, 2);
        let line_storage = batch.lines.capacity();

        for _ in 0..4 {
            batch.add_line_solid(Vec3::ZERO, Vec3::X, Color::WHITE);
            batch.add_triangle(Vec3::ZERO, Vec3::X, Vec3::Y, Color::WHITE);
        }
        batch.clear();

        assert!(batch.is_empty());
        assert_eq!(batch.dropped_lines(), 0);
        assert_eq!(batch.lines.capacity(), line_storage);

        batch.add_line_solid(Vec3::ZERO, Vec3::Y, Color::WHITE);
        batch.add_line_solid(Vec3::ZERO, Vec3::Z, Color::WHITE);
        assert_eq!(batch.line_count(), 2);
    }

    #[test]
    fn test_line_keeps_endpoint_colors() {
        let mut batch = GizmoBatch::default();
        batch.add_line(Vec3::ZERO, Vec3::ONE, Color::RED, Color::BLUE);

        let line = batch.lines()[0];
        assert_eq!(line.start.color(), Color::RED);
        assert_eq!(line.end.color(), Color::BLUE);
        assert_eq!(line.end.position(), Vec3::ONE);
    }

    #[test]
    fn test_transform_axes_identity() {
        let mut batch = GizmoBatch::default();
        batch.add_transform_axes(&Mat4::IDENTITY, 1.0);

        let expected = [
            (Vec3::X, Color::RED),
            (Vec3::Y, Color::GREEN),
            (Vec3::Z, Color::BLUE),
        ];
        assert_eq!(batch.line_count(), 3);
        for (line, (end, color)) in batch.lines().iter().zip(expected) {
            assert_eq!(line.start.position(), Vec3::ZERO);
            assert_eq!(line.end.position(), end);
            assert_eq!(line.length(), 1.0);
            assert_eq!(line.start.color(), color);
            assert_eq!(line.end.color(), color);
        }
    }

    #[test]
    fn test_transform_axes_translated_and_scaled() {
        let mut batch = GizmoBatch::default();
        let transform = Mat4::from_translation(Vec3::new(5.0, 0.0, -2.0));
        batch.add_transform_axes(&transform, 2.0);

        let x_axis = batch.lines()[0];
        assert_eq!(x_axis.start.position(), Vec3::new(5.0, 0.0, -2.0));
        assert_eq!(x_axis.end.position(), Vec3::new(7.0, 0.0, -2.0));
    }
}
