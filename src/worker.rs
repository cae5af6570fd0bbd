use crate::partition::BlockDescriptor;

/// Sum one block with strided traversal.
///
/// Pass `p` (for `p` in `0..stride`) adds `array[min_idx + p]`,
/// `array[min_idx + p + stride]`, ... up to `max_idx`. The passes together
/// visit every index of the block once, so the result does not depend on
/// the stride.
pub fn run_block(block: &BlockDescriptor<'_>) -> i64 {
    let array = block.array;
    let mut sum: i64 = 0;

    for phase in 0..block.passes() {
        let mut idx = block.min_idx + phase;
        while idx <= block.max_idx {
            sum += i64::from(array[idx]);
            match idx.checked_add(block.stride) {
                Some(next) => idx = next,
                None => break,
            }
        }
    }

    sum
}
