/// Represents a 128-bit identifier whose leading bytes hold a block index.
///
/// The type imposes no structure beyond the 16 big-endian bytes. Byte-wise comparison (the
/// derived [`Ord`]) orders identifiers by their prefix first, which is what gives generated
/// identifiers their locality. Use the `uuid` crate feature to convert to [`uuid::Uuid`] for the
/// canonical 8-4-4-4-12 text form.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the first `prefix_bytes` bytes, i.e., the block index written by a generator
    /// configured with that prefix width.
    ///
    /// # Panics
    ///
    /// Panics if `prefix_bytes` is greater than 16.
    pub fn prefix(&self, prefix_bytes: usize) -> &[u8] {
        &self.0[..prefix_bytes]
    }

    /// Returns the version number if the variant field is set at `10` as defined by RFC 4122, or
    /// `None` otherwise.
    pub const fn version(&self) -> Option<u8> {
        if self.0[8] >> 6 == 0b10 {
            Some(self.0[6] >> 4)
        } else {
            None
        }
    }

    /// Sets the version field at `0100` and the variant field at `10`, marking the identifier as
    /// an RFC 4122 version 4 UUID.
    pub(crate) fn stamp_v4(mut self) -> Self {
        self.0[6] = 0x40 | (self.0[6] & 0x0f);
        self.0[8] = 0x80 | (self.0[8] & 0x3f);
        self
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }

}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::Uuid;
    use serde::{de, Deserializer, Serializer};
    use std::fmt;

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bytes(self.as_bytes())
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_bytes(VisitorImpl)
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "16 bytes")
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(|_| de::Error::invalid_length(value.len(), &self))
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut dst = [0u8; 16];
            for (i, e) in dst.iter_mut().enumerate() {
                *e = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(i, &self))?;
            }
            if seq.next_element::<de::IgnoredAny>()?.is_some() {
                return Err(de::Error::invalid_length(17, &self));
            }
            Ok(Self::Value::from(dst))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_tokens, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases: [&[u8; 16]; 3] = [
                &[0u8; 16],
                &[
                    1, 128, 174, 89, 7, 140, 123, 128, 177, 19, 47, 225, 74, 97, 95, 179,
                ],
                &[
                    255, 255, 174, 89, 7, 144, 79, 109, 137, 125, 121, 55, 11, 9, 221, 7,
                ],
            ];

            for bytes in cases {
                let e = Uuid::from(*bytes);
                assert_tokens(&e, &[Token::Bytes(bytes)]);

                let mut tokens = vec![Token::Seq { len: Some(16) }];
                tokens.extend(bytes.iter().map(|&b| Token::U8(b)));
                tokens.push(Token::SeqEnd);
                assert_de_tokens(&e, &tokens);
            }
        }

        /// Rejects byte strings of wrong length
        #[test]
        fn rejects_byte_strings_of_wrong_length() {
            assert_de_tokens_error::<Uuid>(
                &[Token::Bytes(&[0u8; 15])],
                "invalid length 15, expected 16 bytes",
            );
            assert_de_tokens_error::<Uuid>(
                &[Token::Bytes(&[0u8; 17])],
                "invalid length 17, expected 16 bytes",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Uuid;

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(Uuid::NIL.as_bytes(), &[0x00; 16]);
        assert_eq!(Uuid::MAX.as_bytes(), &[0xff; 16]);
        assert_eq!(u128::from(Uuid::MAX), u128::MAX);
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        let cases = [
            0u128,
            1,
            0x0180_ae59_078c_7b80_b113_2fe1_4a61_5fb3,
            u128::MAX,
        ];
        for src in cases {
            let e = Uuid::from(src);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(AsRef::<[u8]>::as_ref(&e), &src.to_be_bytes());
        }
    }

    /// Orders identifiers by leading bytes first
    #[test]
    fn orders_identifiers_by_leading_bytes_first() {
        let a = Uuid::from(0x0001_ffff_ffff_ffff_ffff_ffff_ffff_ffffu128);
        let b = Uuid::from(0x0002_0000_0000_0000_0000_0000_0000_0000u128);
        assert!(a < b);
        assert_eq!(a.prefix(2), &[0x00, 0x01]);
        assert_eq!(b.prefix(2), &[0x00, 0x02]);
        assert!(a.prefix(0).is_empty());
    }

    /// Stamps version 4 bits without touching others
    #[test]
    fn stamps_version_4_bits_without_touching_others() {
        assert_eq!(Uuid::NIL.version(), None);
        assert_eq!(Uuid::MAX.version(), None);

        let e = Uuid::MAX.stamp_v4();
        assert_eq!(e.version(), Some(4));
        assert_eq!(u128::from(e), 0xffff_ffff_ffff_4fff_bfff_ffff_ffff_ffff);

        let e = Uuid::NIL.stamp_v4();
        assert_eq!(e.version(), Some(4));
        assert_eq!(u128::from(e), 0x0000_0000_0000_4000_8000_0000_0000_0000);
    }
}
