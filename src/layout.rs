//! Prefix width and block index calculation.

use crate::error::{positive, Error, Parameter};

/// Returns the number of whole bytes needed to distinguish `block_count` blocks, i.e., the
/// smallest `n` such that `256^n >= block_count`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `block_count` is smaller than one.
///
/// # Examples
///
/// ```rust
/// use sequential_uuids::layout::prefix_bytes;
///
/// assert_eq!(prefix_bytes(1), Ok(0));
/// assert_eq!(prefix_bytes(256), Ok(1));
/// assert_eq!(prefix_bytes(257), Ok(2));
/// assert_eq!(prefix_bytes(65_536), Ok(2));
/// ```
pub fn prefix_bytes(block_count: i64) -> Result<usize, Error> {
    let mut remaining = positive(block_count, Parameter::BlockCount)? as u64;
    let mut n = 0;
    while remaining > 1 {
        remaining = remaining.div_ceil(256);
        n += 1;
    }
    Ok(n)
}

/// Returns the block that `raw_value` belongs to, i.e., `floor(raw_value / block_size)`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `block_size` is smaller than one.
///
/// This is the unwrapped index; generators apply the [`Wrap`] policy and prefix width on top of
/// it through [`Layout::block_index`].
///
/// # Examples
///
/// ```rust
/// use sequential_uuids::layout::block_index;
///
/// assert_eq!(block_index(255, 256), Ok(0));
/// assert_eq!(block_index(256, 256), Ok(1));
/// assert_eq!(block_index(-1, 256), Ok(-1));
/// ```
pub fn block_index(raw_value: i64, block_size: i64) -> Result<i64, Error> {
    positive(block_size, Parameter::BlockSize).map(|block_size| floor_div(raw_value, block_size))
}

/// Floors `raw_value / block_size` for a positive `block_size`.
const fn floor_div(raw_value: i64, block_size: i64) -> i64 {
    raw_value.div_euclid(block_size)
}

/// Determines how block indices wrap around once they exceed the prefix range.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Wrap {
    /// Keeps only the least significant prefix bytes of the block index. The prefix wraps every
    /// `block_size * 256^prefix_bytes` values, which may be longer than the requested
    /// `block_size * block_count`.
    #[default]
    Truncate,

    /// Reduces the block index modulo `block_count`, so the prefix wraps exactly every
    /// `block_size * block_count` values but never uses the prefixes at and above `block_count`.
    Modulo,

    /// Keeps the requested period `block_size * block_count` and spreads it over all
    /// `256^prefix_bytes` prefixes by shrinking the block size to
    /// `max(1, block_size * block_count / 256^prefix_bytes)`.
    Rescale,
}

/// Validated block geometry shared by the sequence and clock generators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Layout {
    prefix_bytes: usize,
    block_size: i64,
    block_count: i64,
    wrap: Wrap,
}

impl Layout {
    /// Creates a layout from the requested block size and block count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either argument is smaller than one.
    pub fn new(block_size: i64, block_count: i64, wrap: Wrap) -> Result<Self, Error> {
        let block_size = positive(block_size, Parameter::BlockSize)?;
        let prefix_bytes = prefix_bytes(block_count)?;

        let block_size = match wrap {
            Wrap::Truncate | Wrap::Modulo => block_size,
            Wrap::Rescale => {
                let period = block_size as u128 * block_count as u128;
                // never larger than the requested size because 256^prefix_bytes >= block_count
                (period / prefix_count(prefix_bytes)).max(1) as i64
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(prefix_bytes, block_size, block_count, ?wrap, "computed block layout");

        Ok(Self {
            prefix_bytes,
            block_size,
            block_count,
            wrap,
        })
    }

    /// Returns the number of leading identifier bytes holding the block index.
    pub const fn prefix_bytes(&self) -> usize {
        self.prefix_bytes
    }

    /// Returns the number of consecutive values sharing one prefix. This differs from the
    /// requested block size under [`Wrap::Rescale`].
    pub const fn block_size(&self) -> i64 {
        self.block_size
    }

    /// Returns the requested number of blocks.
    pub const fn block_count(&self) -> i64 {
        self.block_count
    }

    /// Returns the wrap-around policy.
    pub const fn wrap(&self) -> Wrap {
        self.wrap
    }

    /// Returns the number of consecutive values after which the prefix repeats.
    pub const fn wrap_period(&self) -> u128 {
        match self.wrap {
            Wrap::Truncate | Wrap::Rescale => {
                self.block_size as u128 * prefix_count(self.prefix_bytes)
            }
            Wrap::Modulo => self.block_size as u128 * self.block_count as u128,
        }
    }

    /// Maps a raw counter or clock value to the block index stored in the prefix.
    ///
    /// The result always fits in [`prefix_bytes`](Self::prefix_bytes) bytes. Values below zero
    /// are floored, so the block just before zero maps to the highest prefix.
    pub const fn block_index(&self, raw_value: i64) -> u64 {
        let mut index = floor_div(raw_value, self.block_size);
        if let Wrap::Modulo = self.wrap {
            index = index.rem_euclid(self.block_count);
        }
        index as u64 & self.mask()
    }

    const fn mask(&self) -> u64 {
        if self.prefix_bytes >= 8 {
            u64::MAX
        } else {
            (1 << (8 * self.prefix_bytes)) - 1
        }
    }
}

/// Returns `256^prefix_bytes`.
const fn prefix_count(prefix_bytes: usize) -> u128 {
    1 << (8 * prefix_bytes)
}
