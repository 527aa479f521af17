//! Error types.

use std::fmt;

/// Identifies the generator argument rejected by [`Error::InvalidParameter`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Parameter {
    /// Number of counter values sharing one prefix.
    BlockSize,
    /// Number of blocks before the prefix wraps around.
    BlockCount,
    /// Number of seconds sharing one prefix.
    IntervalLength,
    /// Number of intervals before the prefix wraps around.
    IntervalCount,
}

/// All errors that the generators can produce.
///
/// None of them is retried internally. On the sequence path a retry may consume additional
/// counter values, so the caller decides whether to try again.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A size or count argument was smaller than one.
    InvalidParameter(Parameter),

    /// The entropy source could not fill the random suffix.
    RandomnessUnavailable,

    /// The system clock could not be read, or it reported a time before the Unix epoch.
    ClockUnavailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(Parameter::BlockSize) => {
                write!(f, "block size must be a positive integer")
            }
            Self::InvalidParameter(Parameter::BlockCount) => {
                write!(f, "number of blocks must be a positive integer")
            }
            Self::InvalidParameter(Parameter::IntervalLength) => {
                write!(f, "length of interval must be a positive integer")
            }
            Self::InvalidParameter(Parameter::IntervalCount) => {
                write!(f, "number of intervals must be a positive integer")
            }
            Self::RandomnessUnavailable => write!(f, "could not generate random values"),
            Self::ClockUnavailable => write!(f, "could not read system clock"),
        }
    }
}

impl std::error::Error for Error {}

/// Returns `value` if it is a positive integer, or the [`Error::InvalidParameter`] naming `param`.
pub(crate) const fn positive(value: i64, param: Parameter) -> Result<i64, Error> {
    if value < 1 {
        Err(Error::InvalidParameter(param))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{positive, Error, Parameter};

    /// Describes rejected parameters by name
    #[test]
    fn describes_rejected_parameters_by_name() {
        let cases = [
            (Parameter::BlockSize, "block size must be a positive integer"),
            (Parameter::BlockCount, "number of blocks must be a positive integer"),
            (Parameter::IntervalLength, "length of interval must be a positive integer"),
            (Parameter::IntervalCount, "number of intervals must be a positive integer"),
        ];
        for (param, text) in cases {
            assert_eq!(Error::InvalidParameter(param).to_string(), text);
        }
    }

    /// Accepts only positive integers
    #[test]
    fn accepts_only_positive_integers() {
        assert_eq!(positive(1, Parameter::BlockSize), Ok(1));
        assert_eq!(positive(i64::MAX, Parameter::BlockSize), Ok(i64::MAX));
        for e in [0, -1, i64::MIN] {
            assert_eq!(
                positive(e, Parameter::IntervalCount),
                Err(Error::InvalidParameter(Parameter::IntervalCount))
            );
        }
    }
}
