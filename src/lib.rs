//! Sequential UUID generators for index-friendly primary keys
//!
//! ```rust
//! # #[cfg(feature = "global_gen")]
//! # {
//! use sequential_uuids::{sequence_uuid, time_uuid, Sequence};
//!
//! // prefix derived from a counter, e.g., a database sequence
//! let seq = Sequence::new();
//! let x = sequence_uuid(&seq)?;
//! println!("{:?}", x.as_bytes()); // as 16-byte big-endian array
//!
//! // prefix derived from the current time
//! let y = time_uuid()?;
//! println!("{:?}", y.as_bytes());
//! # }
//! # Ok::<(), sequential_uuids::Error>(())
//! ```
//!
//! Random UUIDs make good primary keys except for one thing: they scatter insertions uniformly
//! across an index, so once the index outgrows the cache nearly every insert touches a cold page.
//! The generators in this crate keep most of the identifier random but replace the leading bytes
//! with a block index derived from a monotonically advancing value. Identifiers generated close
//! together in sequence or time share a prefix and land next to each other in the index. The
//! block index wraps around after a configurable number of blocks, so the value space does not
//! grow unbounded and far-future prefixes stay unpredictable.
//!
//! # Field and byte layout
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          block index          |             rand              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |             rand              |  ver  |         rand          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                          rand                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where (shown for the default 65536 blocks):
//!
//! - The `block index` field is `floor(value / block_size)`, written most significant byte
//!   first. Its width is the smallest whole number of bytes that can count `block_count` blocks,
//!   from zero bytes for a single block up to eight bytes.
//! - The 4-bit `ver` field is set at `0100` and the 2-bit `var` field is set at `10` unless
//!   [`Format::Raw`] is selected.
//! - The remaining `rand` bits are filled with a cryptographically strong random number.
//!
//! Because the prefix width is rounded up to whole bytes, the block index wraps around every
//! `block_size * 256^prefix_bytes` values by default, which may be longer than the requested
//! `block_size * block_count`. [`Wrap`] selects an alternative policy that honors the requested
//! period.
//!
//! # Crate features
//!
//! - `global_gen` (default): process-wide random number generator and the entry point functions
//!   [`generate_from_sequence`], [`generate_from_clock`], [`sequence_uuid`], and [`time_uuid`].
//! - `serde`: serialization of [`Uuid`] and the configuration types.
//! - `uuid`: conversion from and to [`uuid::Uuid`], which provides the hyphenated text form.
//! - `tracing`: trace-level spans around identifier generation.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::Uuid;

mod error;
pub use error::{Error, Parameter};

pub mod layout;
pub use layout::{Layout, Wrap};

mod config;
pub use config::{
    ClockConfig, CounterBase, Format, SequenceConfig, DEFAULT_BLOCK_COUNT, DEFAULT_BLOCK_SIZE,
    DEFAULT_INTERVAL_COUNT, DEFAULT_INTERVAL_LENGTH,
};

mod source;
pub use source::{ClockSource, CounterSource, Sequence, SystemClock};

pub mod generator;
pub use generator::{with_rand08::Adapter, ClockGenerator, RandSource, SequenceGenerator};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{
    generate_from_clock, generate_from_sequence, sequence_uuid, time_uuid, GlobalRng,
};
