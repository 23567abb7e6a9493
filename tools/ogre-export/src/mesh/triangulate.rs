//! Face triangulation
//!
//! Triangles pass through unchanged. Quads are always split along the
//! 0-2 diagonal, with no shortest-diagonal heuristic.

use crate::error::{ExportError, Result};

const TRIANGLE: [[usize; 3]; 1] = [[0, 1, 2]];
const QUAD: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

/// Corner-slot triples for a face with `arity` corners.
///
/// Returns indices into the face's own corner list, winding preserved.
/// `face` is only used to report [`ExportError::UnsupportedFaceArity`].
pub fn triangulate(face: usize, arity: usize) -> Result<&'static [[usize; 3]]> {
    match arity {
        3 => Ok(&TRIANGLE),
        4 => Ok(&QUAD),
        _ => Err(ExportError::UnsupportedFaceArity { face, arity }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_passthrough() {
        assert_eq!(triangulate(0, 3).unwrap(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_quad_fixed_split() {
        let corners = ['A', 'B', 'C', 'D'];
        let triangles: Vec<[char; 3]> = triangulate(0, 4)
            .unwrap()
            .iter()
            .map(|t| t.map(|slot| corners[slot]))
            .collect();
        assert_eq!(triangles, vec![['A', 'B', 'C'], ['A', 'C', 'D']]);
    }

    #[test]
    fn test_other_arities_rejected() {
        for arity in [0, 1, 2, 5, 8] {
            match triangulate(7, arity) {
                Err(ExportError::UnsupportedFaceArity { face, arity: got }) => {
                    assert_eq!(face, 7);
                    assert_eq!(got, arity);
                }
                other => panic!("arity {arity}: expected UnsupportedFaceArity, got {other:?}"),
            }
        }
    }
}
