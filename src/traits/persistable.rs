//! Fixed-size value encoding
//!
//! Every persisted value has a fixed byte image. The image length is the
//! item's size in the layout and feeds the layout signature, so it must not
//! change between firmware builds that share a medium.

/// A value with a fixed-size byte image
///
/// Integer and floating point images are little-endian, matching the
/// in-memory layout on AVR. The image length is the item's size in the
/// layout and must be the same for every value of the type; an item whose
/// image stops matching its registered range is never read or written.
///
/// # Example
/// ```rust
/// use eeprom_items::traits::Persistable;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Calibration {
///     offset: i16,
///     gain: u8,
/// }
///
/// impl Persistable for Calibration {
///     type Bytes = [u8; 3];
///
///     fn to_bytes(&self) -> [u8; 3] {
///         let [lo, hi] = self.offset.to_le_bytes();
///         [lo, hi, self.gain]
///     }
///
///     fn from_bytes(bytes: &[u8; 3]) -> Self {
///         Self {
///             offset: i16::from_le_bytes([bytes[0], bytes[1]]),
///             gain: bytes[2],
///         }
///     }
/// }
///
/// let value = Calibration { offset: -5, gain: 7 };
/// assert_eq!(value.to_bytes().len(), 3);
/// assert_eq!(Calibration::from_bytes(&value.to_bytes()), value);
/// ```
pub trait Persistable: Copy + PartialEq {
    /// Byte image type, normally `[u8; N]`
    type Bytes: AsRef<[u8]> + AsMut<[u8]>;

    /// Encodes the value
    fn to_bytes(&self) -> Self::Bytes;

    /// Decodes a value from its image
    fn from_bytes(bytes: &Self::Bytes) -> Self;
}

macro_rules! impl_persistable_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Persistable for $ty {
                type Bytes = [u8; core::mem::size_of::<$ty>()];

                fn to_bytes(&self) -> Self::Bytes {
                    self.to_le_bytes()
                }

                fn from_bytes(bytes: &Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(*bytes)
                }
            }
        )*
    };
}

impl_persistable_le!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Persistable for bool {
    type Bytes = [u8; 1];

    fn to_bytes(&self) -> [u8; 1] {
        [*self as u8]
    }

    fn from_bytes(bytes: &[u8; 1]) -> Self {
        bytes[0] != 0
    }
}

impl<const N: usize> Persistable for [u8; N] {
    type Bytes = [u8; N];

    fn to_bytes(&self) -> [u8; N] {
        *self
    }

    fn from_bytes(bytes: &[u8; N]) -> Self {
        *bytes
    }
}
