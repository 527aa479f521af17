//! Sequential UUID generators and related types.

use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::{ClockConfig, CounterBase, Format, SequenceConfig};
use crate::error::{positive, Error, Parameter};
use crate::layout::Layout;
use crate::source::{ClockSource, CounterSource, SystemClock};
use crate::Uuid;

pub mod with_rand08;

/// A trait that defines the cryptographically strong random number source used to fill the
/// random part of identifiers.
///
/// Implementations take `&self` so that one source can serve concurrent generators; those with
/// mutable state synchronize internally.
pub trait RandSource {
    /// Fills `dest` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomnessUnavailable`] if the entropy source fails. Implementations
    /// must not fall back to a weaker source.
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error>;
}

impl<T: RandSource + ?Sized> RandSource for &T {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        (**self).fill(dest)
    }
}

impl<T: RandSource + ?Sized> RandSource for Arc<T> {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        (**self).fill(dest)
    }
}

/// Builds an identifier from the block index of `raw_value` followed by random bytes.
///
/// The block index occupies the leading [`Layout::prefix_bytes`] bytes in big-endian order, so
/// that byte-wise comparison of identifiers follows the order of their blocks.
fn assemble<R: RandSource + ?Sized>(
    layout: &Layout,
    format: Format,
    raw_value: i64,
    rng: &R,
) -> Result<Uuid, Error> {
    let prefix_bytes = layout.prefix_bytes();
    let mut bytes = [0u8; 16];
    bytes[..prefix_bytes]
        .copy_from_slice(&layout.block_index(raw_value).to_be_bytes()[8 - prefix_bytes..]);
    rng.fill(&mut bytes[prefix_bytes..])?;

    let uuid = Uuid::from(bytes);
    Ok(match format {
        Format::RfcV4 => uuid.stamp_v4(),
        Format::Raw => uuid,
    })
}

/// Represents a generator that derives the identifier prefix from an external counter.
///
/// Consecutive counter values fall into the same block of `block_size` values and produce the
/// same prefix. The generator itself is stateless; it can be shared between threads as long as
/// the random source is `Sync`.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use sequential_uuids::{Sequence, SequenceConfig, SequenceGenerator};
///
/// let config = SequenceConfig {
///     block_size: 256,
///     ..Default::default()
/// };
/// let g = SequenceGenerator::new(config, OsRng)?;
/// let seq = Sequence::new();
///
/// let x = g.generate(&seq)?;
/// let y = g.generate(&seq)?;
/// assert_eq!(x.prefix(2), y.prefix(2));
/// # Ok::<(), sequential_uuids::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct SequenceGenerator<R> {
    layout: Layout,
    base: CounterBase,
    format: Format,

    /// The random number source used by the generator.
    rng: R,
}

impl<R: RandSource> SequenceGenerator<R> {
    /// Creates a generator instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the block size or block count is smaller than one.
    pub fn new(config: SequenceConfig, rng: R) -> Result<Self, Error> {
        Ok(Self {
            layout: Layout::new(config.block_size, config.block_count, config.wrap)?,
            base: config.base,
            format: config.format,
            rng,
        })
    }

    /// Returns the block geometry of the generator.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Generates a new identifier from the next value of `counter`.
    ///
    /// The counter is advanced exactly once per call, even if the random source then fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomnessUnavailable`] if the random source fails.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, err))]
    pub fn generate<C: CounterSource + ?Sized>(&self, counter: &C) -> Result<Uuid, Error> {
        self.generate_core(counter.next_value())
    }

    /// Generates a new identifier from a counter value that the caller has already obtained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomnessUnavailable`] if the random source fails.
    pub fn generate_core(&self, counter_value: i64) -> Result<Uuid, Error> {
        assemble(
            &self.layout,
            self.format,
            self.base.apply(counter_value),
            &self.rng,
        )
    }
}

/// Represents a generator that derives the identifier prefix from the current time.
///
/// All identifiers generated within the same interval of `interval_length` seconds share the
/// same prefix.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use sequential_uuids::{ClockConfig, ClockGenerator};
///
/// let g = ClockGenerator::new(ClockConfig::default(), OsRng)?;
/// println!("{:?}", g.generate()?);
/// # Ok::<(), sequential_uuids::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClockGenerator<R, T = SystemClock> {
    layout: Layout,
    format: Format,

    /// The random number source used by the generator.
    rng: R,

    /// The time source used by the generator.
    clock: T,
}

impl<R: RandSource> ClockGenerator<R> {
    /// Creates a generator instance that reads the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the interval length or interval count is smaller
    /// than one.
    pub fn new(config: ClockConfig, rng: R) -> Result<Self, Error> {
        Self::with_clock(config, rng, SystemClock)
    }
}

impl<R: RandSource, T: ClockSource> ClockGenerator<R, T> {
    /// Creates a generator instance with a custom time source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the interval length or interval count is smaller
    /// than one.
    pub fn with_clock(config: ClockConfig, rng: R, clock: T) -> Result<Self, Error> {
        let interval_length = positive(config.interval_length, Parameter::IntervalLength)?;
        let interval_count = positive(config.interval_count, Parameter::IntervalCount)?;
        Ok(Self {
            layout: Layout::new(interval_length, interval_count, config.wrap)?,
            format: config.format,
            rng,
            clock,
        })
    }

    /// Returns the block geometry of the generator, measured in seconds.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Generates a new identifier from the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockUnavailable`] if the time source fails or
    /// [`Error::RandomnessUnavailable`] if the random source fails.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, err))]
    pub fn generate(&self) -> Result<Uuid, Error> {
        self.generate_core(self.clock.now_in_whole_seconds()?)
    }

    /// Generates a new identifier from the `unix_ts_secs` passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomnessUnavailable`] if the random source fails.
    pub fn generate_core(&self, unix_ts_secs: i64) -> Result<Uuid, Error> {
        assemble(&self.layout, self.format, unix_ts_secs, &self.rng)
    }
}
