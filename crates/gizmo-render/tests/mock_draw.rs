//! Gizmos drawn against the recording mock backend.

use gizmo_render::*;
use gizmo_test_utils::{MockRenderContext, MockRenderPass, PassCall, RenderCall};
use glam::{Mat4, Vec3};
use std::sync::Arc;

fn mock_gizmos(descriptor: GizmosDescriptor) -> (Arc<MockRenderContext>, Gizmos) {
    let mock = Arc::new(MockRenderContext::new());
    let gizmos = Gizmos::new(mock.clone(), descriptor);
    mock.clear_calls();
    (mock, gizmos)
}

#[test]
fn test_create_allocates_capacity_sized_buffers() {
    let mock = Arc::new(MockRenderContext::new());
    let _gizmos = Gizmos::new(
        mock.clone(),
        GizmosDescriptor::new().max_lines(32).max_triangles(8),
    );

    let vertex_buffer_sizes: Vec<u64> = mock
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            RenderCall::CreateBuffer { size, usage, .. }
                if usage.contains(wgpu::BufferUsages::VERTEX) =>
            {
                Some(size)
            }
            _ => None,
        })
        .collect();

    assert_eq!(vertex_buffer_sizes, vec![32 * 64, 8 * 96]);
    assert_eq!(mock.count_render_pipeline_creates(), 2);
}

#[test]
fn test_draw_uploads_and_draws_both_kinds() {
    let (mock, mut gizmos) = mock_gizmos(GizmosDescriptor::default());

    gizmos.add_box(&GizmoBox::new(Vec3::ZERO, Vec3::ONE).filled(Color::YELLOW));
    gizmos.add_transform_axes(&Mat4::IDENTITY, 1.0);

    let mut pass = MockRenderPass::new();
    gizmos.draw(&mut pass, Mat4::IDENTITY);

    // Uniform, lines, triangles.
    assert_eq!(mock.count_buffer_writes(), 3);
    assert_eq!(pass.draws(), vec![0..30, 0..36]);

    let vertex_ranges: Vec<_> = pass
        .calls()
        .iter()
        .filter_map(|call| match call {
            PassCall::SetVertexBuffer { range, .. } => Some(range.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(vertex_ranges, vec![0..15 * 64, 0..12 * 96]);
}

#[test]
fn test_draw_skips_empty_kinds() {
    let (mock, mut gizmos) = mock_gizmos(GizmosDescriptor::default());

    gizmos.add_circle(&GizmoCircle::new(Vec3::ZERO, 1.0, 8).filled(Color::GREEN));

    let mut pass = MockRenderPass::new();
    gizmos.draw(&mut pass, Mat4::IDENTITY);

    assert_eq!(pass.draws(), vec![0..48]);
    assert_eq!(mock.count_buffer_writes(), 2);
}

#[test]
fn test_draw_nothing_after_clear() {
    let (mock, mut gizmos) = mock_gizmos(GizmosDescriptor::default());

    gizmos.add_sphere(&GizmoSphere::new(Vec3::ZERO, 1.0, 4, 8));
    gizmos.clear();

    let mut pass = MockRenderPass::new();
    gizmos.draw(&mut pass, Mat4::IDENTITY);

    assert_eq!(pass.count_draws(), 0);
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_overflow_draws_only_capacity() {
    let (_mock, mut gizmos) = mock_gizmos(GizmosDescriptor::new().max_lines(5).max_triangles(0));

    for i in 0..20 {
        gizmos.add_line_solid(Vec3::ZERO, Vec3::splat(i as f32), Color::WHITE);
        gizmos.add_triangle(Vec3::ZERO, Vec3::X, Vec3::Y, Color::WHITE);
    }
    assert_eq!(gizmos.dropped_lines(), 15);
    assert_eq!(gizmos.dropped_triangles(), 20);

    let mut pass = MockRenderPass::new();
    gizmos.draw(&mut pass, Mat4::IDENTITY);
    assert_eq!(pass.draws(), vec![0..10]);
}

#[test]
fn test_each_frame_draw_uploads_again() {
    let (mock, mut gizmos) = mock_gizmos(GizmosDescriptor::default());
    gizmos.add_line(Vec3::ZERO, Vec3::X, Color::RED, Color::BLUE);

    // One draw per submission, with the batch kept between frames.
    let mut first_frame = MockRenderPass::new();
    gizmos.draw(&mut first_frame, Mat4::IDENTITY);
    let mut second_frame = MockRenderPass::new();
    gizmos.draw(&mut second_frame, Mat4::from_scale(Vec3::splat(2.0)));

    assert_eq!(first_frame.calls(), second_frame.calls());
    assert_eq!(mock.count_buffer_writes(), 4);
    assert_eq!(gizmos.batch().line_count(), 1);
}

#[test]
fn test_capacity_above_device_limit_is_clamped() {
    let limit_lines = 100;
    let mock = Arc::new(MockRenderContext::new().with_max_buffer_size(64 * limit_lines));
    let mut gizmos = Gizmos::new(
        mock.clone(),
        GizmosDescriptor::new().max_lines(limit_lines as usize + 1),
    );

    assert_eq!(gizmos.renderer().max_lines(), 100);
    assert_eq!(gizmos.max_lines(), 100);
    assert!(mock.calls().iter().all(|call| match call {
        RenderCall::CreateBuffer { size, .. } => *size <= 64 * limit_lines,
        _ => true,
    }));

    for _ in 0..101 {
        gizmos.add_line_solid(Vec3::ZERO, Vec3::X, Color::WHITE);
    }
    assert_eq!(gizmos.line_count(), 100);
    assert_eq!(gizmos.dropped_lines(), 1);

    let mut pass = MockRenderPass::new();
    gizmos.draw(&mut pass, Mat4::IDENTITY);
    assert_eq!(pass.draws(), vec![0..200]);
}

#[test]
fn test_destroy_consumes() {
    let (_mock, gizmos) = mock_gizmos(GizmosDescriptor::new().label("Scene Gizmos"));
    assert_eq!(gizmos.renderer().max_lines(), DEFAULT_MAX_LINES);
    gizmos.destroy();
}
