//! Bit packing for comparison masks.
//!
//! Every hash algorithm ends with the same step: a row-major boolean mask
//! of pixel comparisons folded into one u64. The folding convention lives
//! here so all four algorithms stay consistent.

/// Pack an ordered boolean mask into a u64.
///
/// The accumulator is shifted left before each element is ORed in, so every
/// element contributes one bit and the first element of the mask ends up in
/// the most significant packed position. For the 64-element masks used by
/// the hash algorithms this fills the full width; shorter masks occupy the
/// low bits. Masks longer than 64 elements would shift earlier bits out and
/// are a caller bug.
pub fn pack_bits<I>(mask: I) -> u64
where
    I: IntoIterator<Item = bool>,
{
    let mut packed = 0u64;
    for bit in mask {
        packed = (packed << 1) | u64::from(bit);
    }
    packed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_packs_to_zero() {
        assert_eq!(pack_bits(std::iter::empty()), 0);
    }

    #[test]
    fn first_element_is_most_significant() {
        // [true, false, false] -> 0b100
        assert_eq!(pack_bits([true, false, false]), 0b100);
    }

    #[test]
    fn last_element_is_least_significant() {
        // [false, false, true] -> 0b001
        assert_eq!(pack_bits([false, false, true]), 0b001);
    }

    #[test]
    fn all_64_elements_contribute() {
        let all_set = pack_bits(std::iter::repeat(true).take(64));
        assert_eq!(all_set, u64::MAX);

        // A mask with only the final element set must produce an odd value,
        // proving the last bit is not lost to a trailing shift.
        let mut mask = [false; 64];
        mask[63] = true;
        assert_eq!(pack_bits(mask), 1);
    }

    #[test]
    fn alternating_pattern() {
        let mask = (0..8).map(|i| i % 2 == 0);
        assert_eq!(pack_bits(mask), 0b1010_1010);
    }
}
