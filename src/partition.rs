//! Splitting an array into equally sized, contiguous blocks.

use crate::error::SumError;

/// Everything one worker needs to sum its block.
///
/// `min_idx` and `max_idx` are both inclusive.
#[derive(Debug, Clone, Copy)]
pub struct BlockDescriptor<'a> {
    pub array: &'a [i32],
    pub block_size: usize,
    pub min_idx: usize,
    pub max_idx: usize,
    pub num_blocks: usize,
    pub stride: usize,
    pub block_id: usize,
}

impl<'a> BlockDescriptor<'a> {
    /// Number of non-empty passes. Passes at or beyond `block_size` would
    /// start past `max_idx`, so they are skipped.
    pub fn passes(&self) -> usize {
        self.stride.min(self.block_size)
    }

    /// Indices in the order a worker visits them: `stride` interleaved
    /// passes over `min_idx..=max_idx`, pass `p` starting at `min_idx + p`.
    pub fn traversal(&self) -> impl Iterator<Item = usize> + 'a {
        let (min_idx, max_idx, stride) = (self.min_idx, self.max_idx, self.stride);
        (0..self.passes()).flat_map(move |phase| (min_idx + phase..=max_idx).step_by(stride))
    }
}

/// Result of partitioning: one descriptor per block.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    pub blocks: Vec<BlockDescriptor<'a>>,
    pub block_size: usize,
    size: usize,
}

impl<'a> Partition<'a> {
    /// Number of trailing elements that fall outside every block.
    pub fn excluded(&self) -> usize {
        self.size - self.covered()
    }

    /// Number of elements summed across all blocks.
    pub fn covered(&self) -> usize {
        self.block_size * self.blocks.len()
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }
}

/// Partition `array` into `num_blocks` blocks of `array.len() / num_blocks`
/// elements each.
///
/// The remainder `array.len() % num_blocks` elements at the end are left out
/// of every block; see [`Partition::excluded`].
pub fn partition(array: &[i32], num_blocks: usize, stride: usize) -> Result<Partition<'_>, SumError> {
    if num_blocks == 0 {
        return Err(SumError::ZeroBlocks);
    }
    if stride == 0 {
        return Err(SumError::ZeroStride);
    }

    let size = array.len();
    if size == 0 {
        return Err(SumError::EmptyArray { num_blocks });
    }
    if num_blocks > size {
        return Err(SumError::TooManyBlocks { num_blocks, size });
    }

    let block_size = size / num_blocks;
    let blocks = (0..num_blocks)
        .map(|block_id| {
            let min_idx = block_id * block_size;
            BlockDescriptor {
                array,
                block_size,
                min_idx,
                max_idx: min_idx + block_size - 1,
                num_blocks,
                stride,
                block_id,
            }
        })
        .collect();

    Ok(Partition {
        blocks,
        block_size,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(p: &Partition<'_>) -> Vec<(usize, usize)> {
        p.blocks.iter().map(|b| (b.min_idx, b.max_idx)).collect()
    }

    #[test]
    fn test_even_split() {
        let array = [0; 8];
        let p = partition(&array, 2, 1).unwrap();

        assert_eq!(p.block_size, 4);
        assert_eq!(ranges(&p), vec![(0, 3), (4, 7)]);
        assert_eq!(p.excluded(), 0);
    }

    #[test]
    fn test_remainder_is_dropped() {
        let array = [0; 10];
        let p = partition(&array, 3, 1).unwrap();

        assert_eq!(p.block_size, 3);
        assert_eq!(ranges(&p), vec![(0, 2), (3, 5), (6, 8)]);
        assert_eq!(p.covered(), 9);
        assert_eq!(p.excluded(), 1);
    }

    #[test]
    fn test_descriptor_fields() {
        let array = [0; 12];
        let p = partition(&array, 3, 5).unwrap();

        for (i, block) in p.blocks.iter().enumerate() {
            assert_eq!(block.block_id, i);
            assert_eq!(block.num_blocks, 3);
            assert_eq!(block.stride, 5);
            assert_eq!(block.block_size, 4);
            assert_eq!(block.array.len(), 12);
        }
    }

    #[test]
    fn test_one_element_per_block() {
        let array = [1, 2, 3];
        let p = partition(&array, 3, 1).unwrap();
        assert_eq!(ranges(&p), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_invalid_inputs() {
        let array = [0; 4];

        assert!(matches!(partition(&array, 0, 1), Err(SumError::ZeroBlocks)));
        assert!(matches!(partition(&array, 2, 0), Err(SumError::ZeroStride)));
        assert!(matches!(
            partition(&[], 1, 1),
            Err(SumError::EmptyArray { num_blocks: 1 })
        ));
        assert!(matches!(
            partition(&array, 5, 1),
            Err(SumError::TooManyBlocks { num_blocks: 5, size: 4 })
        ));
    }

    #[test]
    fn test_zero_blocks_checked_before_stride() {
        assert!(matches!(partition(&[1], 0, 0), Err(SumError::ZeroBlocks)));
    }

    #[test]
    fn test_huge_stride_has_one_pass_per_element() {
        let array = [0; 8];
        let p = partition(&array, 2, 1usize << 40).unwrap();

        assert_eq!(p.blocks[0].passes(), 4);
        assert_eq!(p.blocks[1].traversal().collect::<Vec<_>>(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_traversal_order() {
        let array = [0; 8];
        let p = partition(&array, 1, 3).unwrap();
        let order: Vec<usize> = p.blocks[0].traversal().collect();

        assert_eq!(order, vec![0, 3, 6, 1, 4, 7, 2, 5]);
    }

    #[test]
    fn test_traversal_stride_larger_than_block() {
        let array = [0; 6];
        let p = partition(&array, 2, 10).unwrap();
        let order: Vec<usize> = p.blocks[1].traversal().collect();

        assert_eq!(order, vec![3, 4, 5]);
    }
}
