//! Layout signature
//!
//! A 16-bit rolling value over the ordered item sizes. It identifies the
//! *shape* of a layout (item count, order and sizes), not its contents, and
//! is stored right after the last item. Zero is reserved for "not finalized".

/// Signature of a registry that has not been finalized
pub const UNFINALIZED: u16 = 0;

/// Folds one item size into a running signature
///
/// The result is never zero.
pub const fn next_signature(signature: u16, size: u16) -> u16 {
    let carry = if signature & 0x8000 == 0 { 1 } else { 0 };
    let next = ((signature << 1) ^ size) ^ carry;

    if next == UNFINALIZED { 1 } else { next }
}

/// Computes the signature of a sequence of item sizes, in layout order
///
/// An empty sequence yields [`UNFINALIZED`].
pub fn compute_signature<I>(sizes: I) -> u16
where
    I: IntoIterator<Item = u16>,
{
    sizes.into_iter().fold(UNFINALIZED, next_signature)
}

/// Little-endian image of a signature as stored on the medium
pub const fn signature_bytes(signature: u16) -> [u8; 2] {
    signature.to_le_bytes()
}
