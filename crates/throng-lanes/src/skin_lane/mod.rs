// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Skinning computations: chunk partitioning for chunked binding and the
//! attribute layout of a skin cluster's weight list.

use ahash::AHashMap;
use throng_core::description::Influence;

/// The vertices of a mesh driven mostly by one deformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Index of the deformer in the geometry's deformer list.
    pub deformer: usize,
    /// Name of the deformer.
    pub name: String,
    /// Vertex indices, ascending.
    pub vertices: Vec<usize>,
}

/// Splits the vertices of a mesh by their dominant deformer.
///
/// A vertex belongs to the deformer with its highest weight; ties go to the
/// influence listed first. Vertices without influences, and influences naming
/// a deformer outside `deformers`, are left out. Chunks are ordered by
/// deformer index.
pub fn partition_chunks(weights: &[Vec<Influence>], deformers: &[String]) -> Vec<Chunk> {
    let mut by_deformer: AHashMap<usize, Vec<usize>> = AHashMap::new();

    for (vertex, influences) in weights.iter().enumerate() {
        let dominant = influences
            .iter()
            .filter(|i| i.deformer < deformers.len())
            .fold(None::<&Influence>, |best, i| match best {
                Some(b) if b.weight >= i.weight => Some(b),
                _ => Some(i),
            });
        match dominant {
            Some(influence) => by_deformer.entry(influence.deformer).or_default().push(vertex),
            None => log::debug!("Vertex {vertex} has no usable influence, left out of chunks"),
        }
    }

    let mut chunks: Vec<Chunk> = by_deformer
        .into_iter()
        .map(|(deformer, vertices)| Chunk {
            deformer,
            name: deformers[deformer].clone(),
            vertices,
        })
        .collect();
    chunks.sort_by_key(|chunk| chunk.deformer);
    chunks
}

/// Returns the attribute path of one weight of a skin cluster.
pub fn weight_attribute(vertex: usize, deformer: usize) -> String {
    format!("weightList[{vertex}].weights[{deformer}]")
}

/// Lists every `(attribute, weight)` pair of a weight table, vertex by vertex.
pub fn weight_list_entries(weights: &[Vec<Influence>]) -> impl Iterator<Item = (String, f32)> + '_ {
    weights.iter().enumerate().flat_map(|(vertex, influences)| {
        influences
            .iter()
            .map(move |i| (weight_attribute(vertex, i.deformer), i.weight))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inf(deformer: usize, weight: f32) -> Influence {
        Influence { deformer, weight }
    }

    fn deformers() -> Vec<String> {
        vec!["hips".into(), "spine".into(), "head".into()]
    }

    #[test]
    fn test_vertices_go_to_dominant_deformer() {
        let weights = vec![
            vec![inf(0, 0.9), inf(1, 0.1)],
            vec![inf(0, 0.2), inf(1, 0.8)],
            vec![inf(2, 1.0)],
            vec![inf(1, 0.5), inf(0, 0.5)],
        ];
        let chunks = partition_chunks(&weights, &deformers());

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].name, "hips");
        assert_eq!(chunks[0].vertices, vec![0]);
        assert_eq!(chunks[1].name, "spine");
        assert_eq!(chunks[1].vertices, vec![1, 3], "Ties go to the first influence");
        assert_eq!(chunks[2].vertices, vec![2]);
    }

    #[test]
    fn test_unusable_vertices_are_left_out() {
        let weights = vec![vec![], vec![inf(7, 1.0)], vec![inf(1, 1.0)]];
        let chunks = partition_chunks(&weights, &deformers());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].vertices, vec![2]);
    }

    #[test]
    fn test_weight_list_entries() {
        let weights = vec![vec![inf(0, 1.0)], vec![inf(0, 0.25), inf(2, 0.75)]];
        let entries: Vec<_> = weight_list_entries(&weights).collect();
        assert_eq!(
            entries,
            vec![
                ("weightList[0].weights[0]".to_string(), 1.0),
                ("weightList[1].weights[0]".to_string(), 0.25),
                ("weightList[1].weights[2]".to_string(), 0.75),
            ]
        );
    }
}
