//! Rendering module
//!
//! The scene is drawn against the [`Surface`] trait in canvas coordinates;
//! [`VertexBatch`] tessellates those calls for the WebGPU triangle pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Surface, VertexBatch, draw};
pub use vertex::{Color, Vertex};
