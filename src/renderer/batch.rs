//! CPU-side draw list: rectangles as triangles, text as overlay items
//!
//! Vertices are kept in screen pixels; the pipeline maps them to clip space
//! at upload time.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::shell::{Color, Renderer, TextAnchor};
use crate::sim::Rect;

/// 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Text queued for the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
    pub anchor: TextAnchor,
    pub color: Color,
    pub font_size: f32,
}

/// One frame's worth of geometry and text
#[derive(Debug, Default)]
pub struct RectBatch {
    vertices: Vec<Vertex>,
    texts: Vec<TextItem>,
}

impl RectBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.texts.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.texts.is_empty()
    }
}

impl Renderer for RectBatch {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let min = rect.position().as_vec2();
        let max = min + rect.size().as_vec2();

        // Two triangles: top-left, bottom-left, top-right / top-right, bottom-left, bottom-right
        self.vertices.extend_from_slice(&[
            Vertex::new(min.x, min.y, color),
            Vertex::new(min.x, max.y, color),
            Vertex::new(max.x, min.y, color),
            Vertex::new(max.x, min.y, color),
            Vertex::new(min.x, max.y, color),
            Vertex::new(max.x, max.y, color),
        ]);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, anchor: TextAnchor, color: Color, font_size: f32) {
        self.texts.push(TextItem {
            text: text.to_string(),
            pos,
            anchor,
            color,
            font_size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::colors;

    #[test]
    fn test_rect_becomes_two_triangles() {
        let mut batch = RectBatch::new();
        batch.draw_rect(Rect::new(10, 20, 30, 40), colors::RED);

        let v = batch.vertices();
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[5].position, [40.0, 60.0]);
        assert!(v.iter().all(|v| v.color == colors::RED));

        // Every corner is present
        for corner in [[10.0, 20.0], [40.0, 20.0], [10.0, 60.0], [40.0, 60.0]] {
            assert!(v.iter().any(|v| v.position == corner));
        }
    }

    #[test]
    fn test_text_and_clear() {
        let mut batch = RectBatch::new();
        batch.draw_text("SCORE: 3", Vec2::new(10.0, 10.0), TextAnchor::TopLeft, colors::BLACK, 55.0);
        assert_eq!(batch.texts().len(), 1);
        assert_eq!(batch.texts()[0].text, "SCORE: 3");

        batch.clear();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
