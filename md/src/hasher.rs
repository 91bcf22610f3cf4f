use std::fmt;
use std::io;
use std::str::FromStr;

use crate::md4::Md4;
use crate::md5::Md5;
use crate::vectors::{MD4_VECTORS, MD5_VECTORS};
use crate::{Error, DIGEST_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md4,
    Md5,
}

impl Algorithm {
    pub fn digest(self, input: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Hasher::new(self);
        hasher.update(input);
        hasher.digest()
    }

    /// RFC test suite of the algorithm.
    pub fn vectors(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Algorithm::Md4 => MD4_VECTORS,
            Algorithm::Md5 => MD5_VECTORS,
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md4" => Ok(Algorithm::Md4),
            "md5" => Ok(Algorithm::Md5),
            _ => Err(Error::UnknownAlgorithm(s.to_owned())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Md4 => f.write_str("md4"),
            Algorithm::Md5 => f.write_str("md5"),
        }
    }
}

/// Digest context for an algorithm chosen at runtime.
#[derive(Debug, Clone)]
pub enum Hasher {
    Md4(Md4),
    Md5(Md5),
}

impl Hasher {
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md4 => Hasher::Md4(Md4::new()),
            Algorithm::Md5 => Hasher::Md5(Md5::new()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Hasher::Md4(_) => Algorithm::Md4,
            Hasher::Md5(_) => Algorithm::Md5,
        }
    }

    pub fn update(&mut self, input: &[u8]) -> &mut Self {
        match self {
            Hasher::Md4(ctx) => {
                ctx.update(input);
            }
            Hasher::Md5(ctx) => {
                ctx.update(input);
            }
        }
        self
    }

    pub fn digest(self) -> [u8; DIGEST_LEN] {
        match self {
            Hasher::Md4(ctx) => ctx.digest(),
            Hasher::Md5(ctx) => ctx.digest(),
        }
    }
}

impl io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;
    use crate::md4::md4;
    use crate::md5::md5;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("md4".parse::<Algorithm>(), Ok(Algorithm::Md4));
        assert_eq!("MD5".parse::<Algorithm>(), Ok(Algorithm::Md5));
        assert_eq!(
            "sha1".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm("sha1".into()))
        );
        assert_eq!(Algorithm::Md4.to_string(), "md4");
    }

    #[test]
    fn test_dispatch() {
        let input = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(Algorithm::Md4.digest(input), md4(input));
        assert_eq!(Algorithm::Md5.digest(input), md5(input));
        assert_eq!(
            Algorithm::Md5.digest(input),
            hex("9e107d9d372bb6826bd81d3542a419d6")
        );
    }

    #[test]
    fn test_hasher_streams() {
        let mut hasher = Hasher::new(Algorithm::Md4);
        assert_eq!(hasher.algorithm(), Algorithm::Md4);
        let n = io::copy(&mut &b"message digest"[..], &mut hasher).unwrap();
        assert_eq!(n, 14);
        assert_eq!(hasher.digest(), hex("d9130a8164549fe818874806e1c7014b"));
    }

    #[test]
    fn test_vectors() {
        for &algorithm in &[Algorithm::Md4, Algorithm::Md5] {
            let vectors = algorithm.vectors();
            assert_eq!(vectors.len(), 7);
            for (input, expected) in vectors {
                assert_eq!(algorithm.digest(input.as_bytes()), hex(expected));
            }
        }
    }
}
