//! WebGPU rendering module
//!
//! The shell draws into a [`RectBatch`]; [`RenderState`] uploads its
//! rectangles each frame. Text is left to the platform overlay.

pub mod batch;
pub mod pipeline;

pub use batch::{RectBatch, TextItem, Vertex};
pub use pipeline::{RenderState, screen_to_ndc};
