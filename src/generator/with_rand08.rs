//! Integration with `rand` (v0.8) crate.

use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::RngCore;

use super::{ClockGenerator, RandSource, SequenceGenerator};
use crate::{ClockConfig, Error, SequenceConfig};

/// Fills from the operating system's entropy source on every call.
impl RandSource for OsRng {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        let mut rng = *self;
        rng.try_fill_bytes(dest).map_err(|_| Error::RandomnessUnavailable)
    }
}

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
///
/// The wrapped generator is guarded by a mutex so that one instance can be shared. Wrapping a
/// seeded generator makes the random part of identifiers reproducible, which is meant for tests;
/// production code should use a generator seeded from the operating system.
#[derive(Debug, Default)]
pub struct Adapter<T>(Mutex<T>);

impl<T> Adapter<T> {
    /// Wraps `rng`.
    pub const fn new(rng: T) -> Self {
        Self(Mutex::new(rng))
    }

    /// Unwraps the inner generator.
    pub fn into_inner(self) -> T {
        self.0.into_inner().unwrap_or_else(|err| err.into_inner())
    }
}

impl<T: RngCore> RandSource for Adapter<T> {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        // a panic while filling leaves the generator in a usable state
        let mut rng = self.0.lock().unwrap_or_else(|err| err.into_inner());
        rng.try_fill_bytes(dest).map_err(|_| Error::RandomnessUnavailable)
    }
}

impl<T: RngCore> SequenceGenerator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use sequential_uuids::{SequenceConfig, SequenceGenerator};
    ///
    /// let rng = StdRng::seed_from_u64(42);
    /// let g = SequenceGenerator::with_rand08(SequenceConfig::default(), rng)?;
    /// assert_eq!(g.generate_core(1)?.prefix(2), &[0, 0]);
    /// # Ok::<(), sequential_uuids::Error>(())
    /// ```
    pub fn with_rand08(config: SequenceConfig, rng: T) -> Result<Self, Error> {
        Self::new(config, Adapter::new(rng))
    }
}

impl<T: RngCore> ClockGenerator<Adapter<T>> {
    /// Creates a generator object reading the system clock with a specified random number
    /// generator that implements [`RngCore`] from `rand` (v0.8) crate.
    pub fn with_rand08(config: ClockConfig, rng: T) -> Result<Self, Error> {
        Self::new(config, Adapter::new(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::Adapter;
    use crate::{Error, RandSource};
    use rand::rngs::{OsRng, StdRng};
    use rand::{RngCore, SeedableRng};
    use std::panic;

    /// Panics on the first fill and yields `0x01` bytes afterwards.
    struct PanicOnceRng(bool);

    impl RngCore for PanicOnceRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let mut bytes = [0u8; 8];
            self.fill_bytes(&mut bytes);
            u64::from_le_bytes(bytes)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            if !self.0 {
                self.0 = true;
                panic!("generator failure");
            }
            dest.fill(0x01);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Reproduces bytes from the same seed
    #[test]
    fn reproduces_bytes_from_the_same_seed() {
        let a = Adapter::new(StdRng::seed_from_u64(7));
        let b = Adapter::new(StdRng::seed_from_u64(7));
        let (mut x, mut y) = ([0u8; 14], [0u8; 14]);
        for _ in 0..8 {
            a.fill(&mut x).unwrap();
            b.fill(&mut y).unwrap();
            assert_eq!(x, y);
        }
    }

    /// Fills from operating system entropy
    #[test]
    fn fills_from_operating_system_entropy() {
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        OsRng.fill(&mut x).unwrap();
        OsRng.fill(&mut y).unwrap();
        assert_ne!(x, y);
    }

    /// Reports failing generator as unavailable randomness
    #[test]
    fn reports_failing_generator_as_unavailable_randomness() {
        let rng = Adapter::new(crate::generator::tests::FailingRng);
        assert_eq!(rng.fill(&mut [0u8; 8]), Err(Error::RandomnessUnavailable));
    }

    /// Keeps filling after a panic poisons the lock
    #[test]
    fn keeps_filling_after_a_panic_poisons_the_lock() {
        let rng = Adapter::new(PanicOnceRng(false));
        assert!(panic::catch_unwind(|| rng.fill(&mut [0u8; 4])).is_err());

        let mut buf = [0u8; 4];
        assert_eq!(rng.fill(&mut buf), Ok(()));
        assert_eq!(buf, [0x01; 4]);
    }

    /// Returns inner generator from poisoned adapter
    #[test]
    fn returns_inner_generator_from_poisoned_adapter() {
        let rng = Adapter::new(PanicOnceRng(false));
        assert!(panic::catch_unwind(|| rng.fill(&mut [0u8; 4])).is_err());

        let mut inner = rng.into_inner();
        assert!(inner.0);
        assert_eq!(inner.next_u32(), 0x0101_0101);

        let rng = Adapter::new(StdRng::seed_from_u64(7));
        let mut x = [0u8; 8];
        rng.fill(&mut x).unwrap();
        let mut y = [0u8; 8];
        let mut expected = StdRng::seed_from_u64(7);
        expected.fill_bytes(&mut y);
        assert_eq!(x, y);
        assert_eq!(rng.into_inner().next_u64(), expected.next_u64());
    }
}
