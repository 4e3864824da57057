//! Order-sensitive hashing of edge tag sequences
//!
//! FNV-1a over the textual form of each tag, with the tag length mixed in
//! ahead of its characters so that `["ab"]` and `["a", "b"]` differ.

use std::fmt::Display;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

const fn step(hash: u32, value: u32) -> u32 {
    (hash ^ value).wrapping_mul(FNV_PRIME)
}

fn hash_tag(mut hash: u32, tag: &impl Display) -> u32 {
    let text = tag.to_string();
    let units: Vec<u16> = text.encode_utf16().collect();
    hash = step(hash, units.len() as u32);
    units
        .iter()
        .fold(hash, |hash, &unit| step(hash, u32::from(unit)))
}

/// Hash of a tag sequence read front to back
pub fn hash_sequence<'a, T: Display + 'a>(tags: impl IntoIterator<Item = &'a T>) -> u32 {
    tags.into_iter().fold(FNV_OFFSET, hash_tag)
}

/// Hash of a tag sequence read back to front
pub fn hash_sequence_reversed<T: Display>(tags: &[T]) -> u32 {
    hash_sequence(tags.iter().rev())
}
