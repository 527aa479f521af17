//! Process-wide random number generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::config::{
    DEFAULT_BLOCK_COUNT, DEFAULT_BLOCK_SIZE, DEFAULT_INTERVAL_COUNT, DEFAULT_INTERVAL_LENGTH,
};
use crate::{
    ClockConfig, ClockGenerator, CounterSource, Error, RandSource, SequenceConfig,
    SequenceGenerator, Uuid,
};
use inner::GlobalRngInner;

/// Returns the lock handle of the process-wide random number generator, creating one if none
/// exists.
fn lock_global_rng() -> sync::MutexGuard<'static, GlobalRngInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalRngInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// A handle to the process-wide random number generator.
///
/// All handles share one ChaCha12 generator that is seeded from and periodically reseeded by the
/// operating system's entropy source. On Unix, the generator is discarded and seeded afresh when
/// the process ID changes (i.e., upon process forks) so that parent and child do not produce the
/// same bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct GlobalRng;

impl RandSource for GlobalRng {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        lock_global_rng().fill(dest)
    }
}

/// Generates an identifier whose prefix is derived from the next value of `counter`.
///
/// The counter is expected to start at one, like a database sequence. The parameters are checked
/// before the counter is advanced, so an invalid call consumes no counter value.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `block_size` or `block_count` is smaller than one, or
/// [`Error::RandomnessUnavailable`] if the random number generator fails.
///
/// # Examples
///
/// ```rust
/// use sequential_uuids::{generate_from_sequence, Sequence};
///
/// let seq = Sequence::new();
/// let x = generate_from_sequence(&seq, 256, 65_536)?;
/// assert_eq!(x.prefix(2), &[0, 0]);
/// assert_eq!(x.version(), Some(4));
/// # Ok::<(), sequential_uuids::Error>(())
/// ```
pub fn generate_from_sequence<C: CounterSource + ?Sized>(
    counter: &C,
    block_size: i64,
    block_count: i64,
) -> Result<Uuid, Error> {
    let config = SequenceConfig {
        block_size,
        block_count,
        ..Default::default()
    };
    SequenceGenerator::new(config, GlobalRng)?.generate(counter)
}

/// Generates an identifier whose prefix is derived from the current time.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `interval_length` or `interval_count` is smaller than
/// one, [`Error::ClockUnavailable`] if the system clock cannot be read, or
/// [`Error::RandomnessUnavailable`] if the random number generator fails.
pub fn generate_from_clock(interval_length: i64, interval_count: i64) -> Result<Uuid, Error> {
    let config = ClockConfig {
        interval_length,
        interval_count,
        ..Default::default()
    };
    ClockGenerator::new(config, GlobalRng)?.generate()
}

/// Generates an identifier from the next value of `counter` with the default block size and
/// block count (65536 each), which wraps around every ~4B identifiers.
///
/// # Errors
///
/// Returns [`Error::RandomnessUnavailable`] if the random number generator fails.
pub fn sequence_uuid<C: CounterSource + ?Sized>(counter: &C) -> Result<Uuid, Error> {
    generate_from_sequence(counter, DEFAULT_BLOCK_SIZE, DEFAULT_BLOCK_COUNT)
}

/// Generates an identifier from the current time with the default interval length (60 seconds)
/// and interval count (65536), which wraps around every ~45 days.
///
/// # Errors
///
/// Returns [`Error::ClockUnavailable`] if the system clock cannot be read, or
/// [`Error::RandomnessUnavailable`] if the random number generator fails.
pub fn time_uuid() -> Result<Uuid, Error> {
    generate_from_clock(DEFAULT_INTERVAL_LENGTH, DEFAULT_INTERVAL_COUNT)
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha12Core;

    use crate::Error;

    /// Number of bytes generated before the generator is reseeded from [`OsRng`], matching
    /// [`rand::rngs::ThreadRng`].
    const RESEED_THRESHOLD: u64 = 1024 * 64;

    /// The random number generator of the global generator.
    ///
    /// The global generator employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the
    /// strategy used by [`rand::rngs::ThreadRng`].
    type GlobalRngCore = ReseedingRng<ChaCha12Core, OsRng>;

    /// A thin wrapper to seed the generator lazily and to reset it when the process ID changes
    /// (i.e., upon Unix forks).
    #[derive(Debug, Default)]
    pub struct GlobalRngInner {
        #[cfg(unix)]
        pid: u32,
        rng: Option<GlobalRngCore>,
    }

    impl GlobalRngInner {
        /// Fills `dest`, seeding the generator first if it has not been seeded in this process.
        pub fn fill(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                self.pid = std::process::id();
                self.rng = None;
            }

            let rng = match &mut self.rng {
                Some(rng) => rng,
                slot @ None => {
                    let core = ChaCha12Core::from_rng(OsRng)
                        .map_err(|_| Error::RandomnessUnavailable)?;
                    slot.insert(ReseedingRng::new(core, RESEED_THRESHOLD, OsRng))
                }
            };
            rng.try_fill_bytes(dest).map_err(|_| Error::RandomnessUnavailable)
        }
    }
}
