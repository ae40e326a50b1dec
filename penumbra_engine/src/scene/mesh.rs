/// GPU geometry of one drawable.
///
/// A mesh references a vertex buffer and optionally an index buffer.
/// Non-indexed meshes are drawn with `vertex_count` vertices.

use std::sync::Arc;
use crate::graphics_device::{Buffer, IndexType};

struct IndexData {
    buffer: Arc<dyn Buffer>,
    count: u32,
    index_type: IndexType,
}

pub struct Mesh {
    label: String,
    vertex_buffer: Arc<dyn Buffer>,
    vertex_count: u32,
    indices: Option<IndexData>,
}

impl Mesh {
    pub fn new(label: &str, vertex_buffer: Arc<dyn Buffer>, vertex_count: u32) -> Self {
        Self {
            label: label.to_string(),
            vertex_buffer,
            vertex_count,
            indices: None,
        }
    }

    /// Draw through an index buffer instead of sequential vertices
    pub fn with_indices(mut self, buffer: Arc<dyn Buffer>, count: u32, index_type: IndexType) -> Self {
        self.indices = Some(IndexData { buffer, count, index_type });
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertex_buffer(&self) -> &Arc<dyn Buffer> {
        &self.vertex_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Index buffer, index count and index type, if indexed
    pub fn index_buffer(&self) -> Option<(&Arc<dyn Buffer>, u32, IndexType)> {
        self.indices.as_ref().map(|i| (&i.buffer, i.count, i.index_type))
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }
}
