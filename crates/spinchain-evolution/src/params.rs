//! Where block angles come from.

use spinchain_ir::{ParameterExpression, ParameterVector};

/// Supplier of per-block angles, consulted once per block in schedule order.
#[derive(Debug, Clone)]
pub enum ParameterSource {
    /// Numeric angles, the same vector for every block of a parity.
    Bound {
        /// Index 0 for even layers, 1 for odd.
        per_parity: [Vec<f64>; 2],
    },
    /// A fresh placeholder vector per block.
    Free {
        /// One vector per block, tagged `θ0`, `θ1`, ….
        vectors: Vec<ParameterVector>,
        /// Next vector to hand out.
        cursor: usize,
    },
}

impl ParameterSource {
    /// Numeric source repeating `angles` on every block.
    pub fn bound(angles: Vec<f64>) -> Self {
        ParameterSource::Bound {
            per_parity: [angles.clone(), angles],
        }
    }

    /// Symbolic source with `num_blocks` vectors of `len` elements each.
    pub fn free(num_blocks: usize, len: u32) -> Self {
        ParameterSource::Free {
            vectors: (0..num_blocks)
                .map(|k| ParameterVector::new(format!("θ{k}"), len))
                .collect(),
            cursor: 0,
        }
    }

    /// Angles for the next block of a layer with the given parity, or `None`
    /// once a free source is exhausted.
    pub fn next_block(&mut self, parity: u32) -> Option<Vec<ParameterExpression>> {
        match self {
            ParameterSource::Bound { per_parity } => {
                let angles = &per_parity[(parity % 2) as usize];
                Some(angles.iter().copied().map(ParameterExpression::constant).collect())
            }
            ParameterSource::Free { vectors, cursor } => {
                let vector = vectors.get(*cursor)?;
                *cursor += 1;
                Some(vector.params())
            }
        }
    }

    /// Placeholder vectors, empty for a bound source.
    pub fn vectors(&self) -> &[ParameterVector] {
        match self {
            ParameterSource::Bound { .. } => &[],
            ParameterSource::Free { vectors, .. } => vectors,
        }
    }

    /// Consume the source, keeping its placeholder vectors.
    pub fn into_vectors(self) -> Vec<ParameterVector> {
        match self {
            ParameterSource::Bound { .. } => vec![],
            ParameterSource::Free { vectors, .. } => vectors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_source_repeats() {
        let mut source = ParameterSource::bound(vec![0.5, 1.5]);
        for parity in [0, 1, 0, 1] {
            let block = source.next_block(parity).unwrap();
            let values: Vec<_> = block.iter().map(|p| p.as_f64().unwrap()).collect();
            assert_eq!(values, vec![0.5, 1.5]);
        }
        assert!(source.vectors().is_empty());
    }

    #[test]
    fn test_free_source_hands_out_fresh_vectors() {
        let mut source = ParameterSource::free(2, 3);
        let first = source.next_block(0).unwrap();
        let second = source.next_block(1).unwrap();
        assert_eq!(first[0].to_string(), "θ0[0]");
        assert_eq!(second[2].to_string(), "θ1[2]");
        assert!(source.next_block(0).is_none());
        assert_eq!(source.vectors().len(), 2);
    }
}
