//! Procedural gizmo shapes.
//!
//! Each shape is a small value type describing the shape (center, size,
//! segment counts, local transform) with builder-style setters. The
//! `GizmoBatch::add_*` methods decompose a shape into lines and triangles;
//! the shape's own point accessors (`corners`, `triangle_points`,
//! `fan_points`, `grid_points`) return the same generated positions for
//! reuse elsewhere, e.g. as collision hulls.
//!
//! Local transforms are applied to directions only (`w = 0`): they rotate
//! and scale the shape about its center, and any translation they carry is
//! ignored. Edges are white unless the shape says otherwise.

use crate::{Color, GizmoBatch};
use gizmo_core::profiling::profile_scope;
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// An oriented box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoBox {
    pub center: Vec3,
    /// Full edge lengths along the local X, Y and Z axes.
    pub dimensions: Vec3,
    pub filled: bool,
    pub fill_color: Color,
    pub transform: Mat4,
}

impl GizmoBox {
    pub fn new(center: Vec3, dimensions: Vec3) -> Self {
        Self {
            center,
            dimensions,
            filled: false,
            fill_color: Color::WHITE,
            transform: Mat4::IDENTITY,
        }
    }

    /// Also emit the six faces in `color`.
    pub fn filled(mut self, color: Color) -> Self {
        self.filled = true;
        self.fill_color = color;
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// The eight corners: the `-y` ring first, then the `+y` ring, each
    /// ordered `(-x,-z) (-x,+z) (+x,+z) (+x,-z)`.
    pub fn corners(&self) -> [Vec3; 8] {
        let half = self.dimensions * 0.5;
        let x = self.transform.transform_vector3(Vec3::new(half.x, 0.0, 0.0));
        let y = self.transform.transform_vector3(Vec3::new(0.0, half.y, 0.0));
        let z = self.transform.transform_vector3(Vec3::new(0.0, 0.0, half.z));
        let c = self.center;

        [
            c - x - z - y,
            c - x + z - y,
            c + x + z - y,
            c + x - z - y,
            c - x - z + y,
            c - x + z + y,
            c + x + z + y,
            c + x - z + y,
        ]
    }
}

/// Corner index pairs for the twelve box edges.
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Corner index triples for the twelve box face triangles, two per face.
const BOX_FACES: [[usize; 3]; 12] = [
    // -y
    [2, 1, 0],
    [3, 2, 0],
    // +y
    [5, 6, 4],
    [6, 7, 4],
    // -z
    [4, 3, 0],
    [7, 3, 4],
    // +z
    [1, 2, 5],
    [2, 6, 5],
    // -x
    [0, 1, 4],
    [1, 5, 4],
    // +x
    [2, 3, 7],
    [6, 2, 7],
];

/// A capped cylinder around the local Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoCylinder {
    pub center: Vec3,
    pub radius: f32,
    pub half_length: f32,
    pub segments: u32,
    pub filled: bool,
    pub fill_color: Color,
    pub transform: Mat4,
}

/// The points of one angular slice of a cylinder.
#[derive(Debug, Clone, Copy)]
struct CylinderSlice {
    top_center: Vec3,
    top_start: Vec3,
    top_end: Vec3,
    bottom_center: Vec3,
    bottom_start: Vec3,
    bottom_end: Vec3,
}

impl CylinderSlice {
    /// Top cap, bottom cap, then the two side triangles.
    fn triangles(&self) -> [[Vec3; 3]; 4] {
        [
            [self.top_center, self.top_start, self.top_end],
            [self.bottom_center, self.bottom_end, self.bottom_start],
            [self.top_end, self.top_start, self.bottom_start],
            [self.bottom_start, self.bottom_end, self.top_end],
        ]
    }
}

impl GizmoCylinder {
    pub fn new(center: Vec3, radius: f32, half_length: f32, segments: u32) -> Self {
        Self {
            center,
            radius,
            half_length,
            segments,
            filled: false,
            fill_color: Color::WHITE,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.filled = true;
        self.fill_color = color;
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    fn point(&self, local: Vec3) -> Vec3 {
        self.center + self.transform.transform_vector3(local)
    }

    fn rim(&self, angle: f32, y: f32) -> Vec3 {
        self.point(Vec3::new(angle.sin() * self.radius, y, angle.cos() * self.radius))
    }

    fn slices(&self) -> impl Iterator<Item = CylinderSlice> + '_ {
        let step = TAU / self.segments as f32;
        let h = self.half_length;

        (0..self.segments).map(move |i| {
            let start = i as f32 * step;
            let end = (i + 1) as f32 * step;
            CylinderSlice {
                top_center: self.point(Vec3::new(0.0, h, 0.0)),
                top_start: self.rim(start, h),
                top_end: self.rim(end, h),
                bottom_center: self.point(Vec3::new(0.0, -h, 0.0)),
                bottom_start: self.rim(start, -h),
                bottom_end: self.rim(end, -h),
            }
        })
    }

    /// The filled triangle list as points: twelve per segment, in the
    /// order `add_cylinder` emits them.
    pub fn triangle_points(&self) -> Vec<Vec3> {
        self.slices()
            .flat_map(|slice| slice.triangles().into_iter().flatten())
            .collect()
    }
}

/// A circle in the local XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoCircle {
    pub center: Vec3,
    pub radius: f32,
    pub segments: u32,
    pub filled: bool,
    pub fill_color: Color,
    /// Rim color, used when the circle is not filled.
    pub color: Color,
    pub transform: Mat4,
}

impl GizmoCircle {
    pub fn new(center: Vec3, radius: f32, segments: u32) -> Self {
        Self {
            center,
            radius,
            segments,
            filled: false,
            fill_color: Color::WHITE,
            color: Color::WHITE,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.filled = true;
        self.fill_color = color;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// Rim points, starting at local `(0, 0, radius)`. The last point
    /// closes the loop onto the first.
    fn rim(&self) -> impl Iterator<Item = Vec3> + '_ {
        let step = TAU / self.segments as f32;
        (0..=self.segments).map(move |i| {
            let angle = i as f32 * step;
            let local = Vec3::new(angle.sin() * self.radius, 0.0, angle.cos() * self.radius);
            self.center + self.transform.transform_vector3(local)
        })
    }

    fn edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.rim().zip(self.rim().skip(1))
    }

    /// Fan triangles as points: `center, rim_i, rim_i+1` per segment.
    pub fn fan_points(&self) -> Vec<Vec3> {
        self.edges()
            .flat_map(|(start, end)| [self.center, start, end])
            .collect()
    }
}

/// A latitude/longitude sphere, optionally restricted to a band or wedge.
///
/// Angles are in degrees. Longitude defaults to `0..360`, latitude to
/// `-90..90`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoSphere {
    pub center: Vec3,
    pub radius: f32,
    pub rows: u32,
    pub columns: u32,
    pub fill_color: Color,
    pub transform: Option<Mat4>,
    pub longitude_min: f32,
    pub longitude_max: f32,
    pub latitude_min: f32,
    pub latitude_max: f32,
}

impl GizmoSphere {
    pub fn new(center: Vec3, radius: f32, rows: u32, columns: u32) -> Self {
        Self {
            center,
            radius,
            rows,
            columns,
            fill_color: Color::WHITE,
            transform: None,
            longitude_min: 0.0,
            longitude_max: 360.0,
            latitude_min: -90.0,
            latitude_max: 90.0,
        }
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_longitude(mut self, min: f32, max: f32) -> Self {
        self.longitude_min = min;
        self.longitude_max = max;
        self
    }

    pub fn with_latitude(mut self, min: f32, max: f32) -> Self {
        self.latitude_min = min;
        self.latitude_max = max;
        self
    }

    /// Whether the longitude range wraps all the way around.
    pub fn is_full_longitude(&self) -> bool {
        self.longitude_max - self.longitude_min >= 360.0
    }

    /// The sampled grid, row by row with `columns` points per row, for
    /// `rows + 1` rows.
    ///
    /// Column `columns` is sampled too and written over column 0, so a full
    /// sphere closes its seam. For a partial longitude range column 0 ends
    /// up holding the `longitude_max` edge, which is why faces in column 0
    /// are skipped when filling.
    pub fn grid_points(&self) -> Vec<Vec3> {
        if self.rows == 0 || self.columns == 0 {
            return Vec::new();
        }

        let rows = self.rows as usize;
        let columns = self.columns as usize;
        let latitude_range = (self.latitude_max - self.latitude_min).to_radians();
        let longitude_range = (self.longitude_max - self.longitude_min).to_radians();

        let mut points = vec![Vec3::ZERO; (rows + 1) * columns];
        for row in 0..=rows {
            let latitude =
                row as f32 / rows as f32 * latitude_range + self.latitude_min.to_radians();
            let y = self.radius * latitude.sin();
            let z = self.radius * latitude.cos();

            for column in 0..=columns {
                let theta = column as f32 / columns as f32 * longitude_range
                    + self.longitude_min.to_radians();
                let mut point = Vec3::new(-z * theta.sin(), y, -z * theta.cos());
                if let Some(transform) = &self.transform {
                    point = transform.transform_vector3(point);
                }
                points[row * columns + column % columns] = self.center + point;
            }
        }

        points
    }
}

impl GizmoBatch {
    /// Add a box: twelve white edges, plus twelve triangles when filled.
    ///
    /// Returns the corners (see [`GizmoBox::corners`]).
    pub fn add_box(&mut self, shape: &GizmoBox) -> [Vec3; 8] {
        profile_scope!("gizmo_add_box");

        let corners = shape.corners();
        for (a, b) in BOX_EDGES {
            self.add_line_solid(corners[a], corners[b], Color::WHITE);
        }

        if shape.filled {
            for [a, b, c] in BOX_FACES {
                self.add_triangle(corners[a], corners[b], corners[c], shape.fill_color);
            }
        }

        corners
    }

    /// Add a cylinder: per segment three white edges (top rim, side, bottom
    /// rim), plus four triangles when filled.
    pub fn add_cylinder(&mut self, shape: &GizmoCylinder) {
        profile_scope!("gizmo_add_cylinder");

        if shape.segments == 0 {
            return;
        }

        for slice in shape.slices() {
            if shape.filled {
                for [a, b, c] in slice.triangles() {
                    self.add_triangle(a, b, c, shape.fill_color);
                }
            }

            self.add_line_solid(slice.top_start, slice.top_end, Color::WHITE);
            self.add_line_solid(slice.top_start, slice.bottom_start, Color::WHITE);
            self.add_line_solid(slice.bottom_start, slice.bottom_end, Color::WHITE);
        }
    }

    /// Add a circle: one rim line per segment, or when filled two
    /// triangles per segment (one of each winding) fanned from the center.
    pub fn add_circle(&mut self, shape: &GizmoCircle) {
        profile_scope!("gizmo_add_circle");

        if shape.segments == 0 {
            return;
        }

        for (start, end) in shape.edges() {
            if shape.filled {
                self.add_triangle(shape.center, start, end, shape.fill_color);
                self.add_triangle(end, start, shape.center, shape.fill_color);
            } else {
                self.add_line_solid(start, end, shape.color);
            }
        }
    }

    /// Add a sphere: per grid face a white meridian line, a white parallel
    /// line and two fill triangles. With a partial longitude range, faces
    /// in column 0 get only the meridian so the open wedge is not bridged.
    pub fn add_sphere(&mut self, shape: &GizmoSphere) {
        profile_scope!("gizmo_add_sphere");

        let points = shape.grid_points();
        if points.is_empty() {
            return;
        }

        let columns = shape.columns as usize;
        let full_longitude = shape.is_full_longitude();

        for face in 0..shape.rows as usize * columns {
            let mut next = face + 1;
            if next % columns == 0 {
                next -= columns;
            }

            self.add_line_solid(points[face], points[face + columns], Color::WHITE);

            if face % columns == 0 && !full_longitude {
                continue;
            }

            self.add_line_solid(points[next + columns], points[face + columns], Color::WHITE);
            self.add_triangle(
                points[next + columns],
                points[face],
                points[next],
                shape.fill_color,
            );
            self.add_triangle(
                points[next + columns],
                points[face + columns],
                points[face],
                shape.fill_color,
            );
        }
    }
}
