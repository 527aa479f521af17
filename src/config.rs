//! Generator configuration.

use crate::layout::Wrap;

/// Default number of counter values sharing one prefix.
pub const DEFAULT_BLOCK_SIZE: i64 = 65_536;

/// Default number of blocks before the sequence-driven prefix wraps around.
pub const DEFAULT_BLOCK_COUNT: i64 = 65_536;

/// Default number of seconds sharing one prefix.
pub const DEFAULT_INTERVAL_LENGTH: i64 = 60;

/// Default number of intervals before the clock-driven prefix wraps around.
pub const DEFAULT_INTERVAL_COUNT: i64 = 65_536;

/// Selects whether generated identifiers carry RFC 4122 version and variant bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Format {
    /// Version 4 (random) UUID: the high nibble of byte 6 is `0100` and the top two bits of byte
    /// 8 are `10`. Six random or prefix bits are given up for the stamp, and with more than six
    /// prefix bytes the stamp overwrites part of the block index.
    #[default]
    RfcV4,

    /// All 128 bits are prefix or random data.
    Raw,
}

/// Declares the first value of the counter a sequence-driven generator reads from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CounterBase {
    /// The counter starts at one, like a database sequence. One is subtracted from each value so
    /// that the first block is filled completely.
    #[default]
    One,

    /// The counter starts at zero; values are used as they are.
    Zero,
}

impl CounterBase {
    /// Converts a counter value into a zero-based position.
    pub(crate) const fn apply(self, value: i64) -> i64 {
        match self {
            Self::One => value.wrapping_sub(1),
            Self::Zero => value,
        }
    }
}

/// Parameters of a sequence-driven generator.
///
/// # Examples
///
/// ```rust
/// use sequential_uuids::SequenceConfig;
///
/// // prefix changes every 256 values and wraps around after 16M values
/// let config = SequenceConfig {
///     block_size: 256,
///     ..Default::default()
/// };
/// assert_eq!(config.block_count, 65_536);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequenceConfig {
    /// Number of consecutive counter values sharing one prefix.
    pub block_size: i64,

    /// Number of blocks before the prefix wraps around; determines the prefix width.
    pub block_count: i64,

    /// First value of the counter.
    pub base: CounterBase,

    /// Wrap-around policy.
    pub wrap: Wrap,

    /// Output format.
    pub format: Format,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            block_count: DEFAULT_BLOCK_COUNT,
            base: CounterBase::default(),
            wrap: Wrap::default(),
            format: Format::default(),
        }
    }
}

/// Parameters of a clock-driven generator.
///
/// With the defaults, the prefix changes every minute and wraps around after about 45 days.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    /// Number of seconds sharing one prefix.
    pub interval_length: i64,

    /// Number of intervals before the prefix wraps around; determines the prefix width.
    pub interval_count: i64,

    /// Wrap-around policy.
    pub wrap: Wrap,

    /// Output format.
    pub format: Format,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            interval_length: DEFAULT_INTERVAL_LENGTH,
            interval_count: DEFAULT_INTERVAL_COUNT,
            wrap: Wrap::default(),
            format: Format::default(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{ClockConfig, CounterBase, Format, SequenceConfig};
    use crate::Wrap;

    /// Uses documented defaults
    #[test]
    fn uses_documented_defaults() {
        let seq = SequenceConfig::default();
        assert_eq!((seq.block_size, seq.block_count), (65_536, 65_536));
        assert_eq!(seq.base, CounterBase::One);
        assert_eq!(seq.wrap, Wrap::Truncate);
        assert_eq!(seq.format, Format::RfcV4);

        let clock = ClockConfig::default();
        assert_eq!((clock.interval_length, clock.interval_count), (60, 65_536));
        assert_eq!(clock.wrap, Wrap::Truncate);
        assert_eq!(clock.format, Format::RfcV4);
    }

    /// Shifts one-based counter values to zero
    #[test]
    fn shifts_one_based_counter_values_to_zero() {
        assert_eq!(CounterBase::One.apply(1), 0);
        assert_eq!(CounterBase::One.apply(257), 256);
        assert_eq!(CounterBase::One.apply(i64::MIN), i64::MAX);
        assert_eq!(CounterBase::Zero.apply(1), 1);
        assert_eq!(CounterBase::Zero.apply(0), 0);
    }
}
