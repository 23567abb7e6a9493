//! Vertex welding
//!
//! Corners that use the same source vertex share one output vertex when
//! their UVs agree within [`UV_EPSILON`]. Each source vertex keeps its
//! candidates in creation order and the first match wins, so results are
//! reproducible for a given corner order even when several candidates are
//! within tolerance.

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::types::{OutputVertex, UV_EPSILON};
use crate::source::Uv;

/// De-duplicates corners into output vertices for one submesh
#[derive(Debug, Default)]
pub struct VertexWelder {
    /// Source vertex -> output vertex indices, in creation order
    candidates: HashMap<u32, SmallVec<[u32; 2]>>,
    vertices: Vec<OutputVertex>,
}

impl VertexWelder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a corner to an output vertex index, creating a vertex if no candidate matches
    pub fn weld(&mut self, source: u32, uvs: &[Uv]) -> u32 {
        let candidates = self.candidates.entry(source).or_default();

        if let Some(&index) = candidates
            .iter()
            .find(|&&index| uvs_match(&self.vertices[index as usize].uvs, uvs))
        {
            tracing::trace!(source, index, ?uvs, "welded corner");
            return index;
        }

        let index = self.vertices.len() as u32;
        candidates.push(index);
        self.vertices.push(OutputVertex {
            source,
            uvs: SmallVec::from_slice(uvs),
        });
        tracing::trace!(source, index, ?uvs, "new vertex");
        index
    }

    /// Number of output vertices created so far
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[OutputVertex] {
        &self.vertices
    }

    /// Output vertices in creation order
    pub fn into_vertices(self) -> Vec<OutputVertex> {
        self.vertices
    }
}

/// Whether two UV lists are equal within [`UV_EPSILON`] per component.
///
/// Lists with different channel counts never match.
pub fn uvs_match(a: &[Uv], b: &[Uv]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(a, b)| {
            (a[0] - b[0]).abs() <= UV_EPSILON && (a[1] - b[1]).abs() <= UV_EPSILON
        })
}
