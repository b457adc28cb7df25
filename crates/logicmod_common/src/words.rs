//! Packing of raw byte sequences into fixed-width memory words.

use crate::bus_value::width_mask;

/// Packs `bytes` little-endian into `capacity` words of `width` bits.
///
/// Each word consumes `ceil(width / 8)` bytes, least significant byte first.
/// A trailing partial word is zero-padded, words past the end of the input
/// are 0, and bytes beyond `capacity` words are ignored.
pub fn pack_words(bytes: &[u8], width: u32, capacity: usize) -> Vec<u32> {
    let bytes_per_word = width.div_ceil(8).max(1) as usize;
    let mask = width_mask(width);
    let mut words = vec![0u32; capacity];
    for (slot, chunk) in words.iter_mut().zip(bytes.chunks(bytes_per_word)) {
        let word = chunk
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (i * 8)));
        *slot = word & mask;
    }
    words
}
