//! Streaming MD4 and MD5 message digests
//!
//! Both algorithms share the same Merkle-Damgård engine ([`engine::Context`]),
//! and differ only in their block compression function.

pub mod engine;
mod error;
mod hasher;
pub mod md4;
pub mod md5;
pub mod vectors;

pub use engine::{Compress, Context, BLOCK_LEN, DIGEST_LEN};
pub use error::Error;
pub use hasher::{Algorithm, Hasher};

/// Parses a digest given as 32 hex digits.
pub fn parse_digest(s: impl AsRef<str>) -> Result<[u8; DIGEST_LEN], Error> {
    let mut digest = [0; DIGEST_LEN];
    hex::decode_to_slice(s.as_ref().trim(), &mut digest)?;
    Ok(digest)
}

#[cfg(test)]
pub fn hex(s: impl AsRef<str>) -> [u8; DIGEST_LEN] {
    parse_digest(s).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digest() {
        assert_eq!(
            parse_digest("000102030405060708090a0b0c0d0e0f").unwrap(),
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
        );
        assert_eq!(
            parse_digest(" D41D8CD98F00B204E9800998ECF8427E\n").unwrap(),
            md5::md5(b"")
        );
        assert!(matches!(
            parse_digest("d41d8cd98f00b204"),
            Err(Error::InvalidHex(hex::FromHexError::InvalidStringLength))
        ));
        assert!(matches!(
            parse_digest("x41d8cd98f00b204e9800998ecf8427e"),
            Err(Error::InvalidHex(_))
        ));
    }
}
