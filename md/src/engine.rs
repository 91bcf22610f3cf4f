//! Merkle-Damgård engine shared by MD4 and MD5
//!
//! The context buffers input into 64-byte blocks, feeds every completed block
//! to the algorithm's compression function and appends the padding and the
//! message length on finalization.

use std::convert::TryInto;
use std::fmt;
use std::io;
use std::marker::PhantomData;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::Error;

pub const BLOCK_LEN: usize = 64;
pub const DIGEST_LEN: usize = 16;

/// Initial state, identical for MD4 and MD5.
pub const IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// Block compression function of a digest algorithm.
pub trait Compress {
    const NAME: &'static str;

    /// Mixes one 64-byte block into `state`.
    fn compress(state: &mut [u32; 4], block: &[u8; BLOCK_LEN]);
}

/// State of an in-progress digest computation.
///
/// Finalizing consumes the context, and the context is wiped whenever it is
/// dropped, so a finalized context can be neither reused nor inspected.
pub struct Context<C> {
    state: [u32; 4],
    count: [u32; 2], // number of bits mod 2^64, low word first
    buffer: [u8; BLOCK_LEN],
    _compress: PhantomData<C>,
}

impl<C: Compress> Context<C> {
    pub fn new() -> Self {
        Self {
            state: IV,
            count: [0, 0],
            buffer: [0; BLOCK_LEN],
            _compress: PhantomData,
        }
    }

    /// Absorbs `input`; may be called any number of times with any chunking.
    pub fn update(&mut self, mut input: &[u8]) -> &mut Self {
        let idx = self.buffered_len();
        self.add_len(input.len());

        let remaining = BLOCK_LEN - idx;
        if input.len() < remaining {
            // not enough bytes to complete a block
            self.buffer[idx..idx + input.len()].copy_from_slice(input);
            return self;
        }

        if idx != 0 {
            let (head, tail) = input.split_at(remaining);
            self.buffer[idx..].copy_from_slice(head);
            C::compress(&mut self.state, &self.buffer);
            input = tail;
        }

        // pre-condition: the buffer is empty
        // compress blocks without copying them into `self.buffer`.
        while let Some((block, tail)) = split_block(input) {
            C::compress(&mut self.state, block);
            input = tail;
        }

        self.buffer[..input.len()].copy_from_slice(input);
        self
    }

    /// Number of message bits absorbed so far, mod 2^64.
    pub fn bit_count(&self) -> u64 {
        u64::from(self.count[1]) << 32 | u64::from(self.count[0])
    }

    pub fn digest(mut self) -> [u8; DIGEST_LEN] {
        self.finish()
    }

    pub fn finalize_into(mut self, out: &mut [u8; DIGEST_LEN]) {
        *out = self.finish();
    }

    /// Writes the digest to the first 16 bytes of `out`.
    ///
    /// A shorter buffer is left untouched and the context is wiped anyway.
    pub fn finalize_into_slice(mut self, out: &mut [u8]) -> Result<(), Error> {
        let len = out.len();
        let out = out
            .get_mut(..DIGEST_LEN)
            .ok_or(Error::OutputTooShort { len })?;
        out.copy_from_slice(&self.finish());
        Ok(())
    }

    fn finish(&mut self) -> [u8; DIGEST_LEN] {
        let len_bits = self.bit_count().to_le_bytes(); // save length

        let idx = self.buffered_len();
        let pad_len = if idx < 56 { 56 - idx } else { 120 - idx };
        trace_finish(C::NAME, self.bit_count(), pad_len);
        self.update(&PADDING[..pad_len]);

        self.update(&len_bits); // append length
        debug_assert_eq!(self.buffered_len(), 0);

        let digest = encode(&self.state);
        self.zeroize();
        digest
    }

    fn buffered_len(&self) -> usize {
        ((self.count[0] >> 3) & 0x3f) as usize // number of bytes mod 64
    }

    fn add_len(&mut self, len: usize) {
        let bits = self.bit_count().wrapping_add((len as u64) << 3);
        self.count = [bits as u32, (bits >> 32) as u32];
    }
}

impl<C: Compress> Default for Context<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Context<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            count: self.count,
            buffer: self.buffer,
            _compress: PhantomData,
        }
    }
}

impl<C: Compress> fmt::Debug for Context<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(C::NAME)
            .field("bit_count", &self.bit_count())
            .finish_non_exhaustive()
    }
}

impl<C: Compress> io::Write for Context<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<C> Zeroize for Context<C> {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.count.zeroize();
        self.buffer.zeroize();
    }
}

impl<C> Drop for Context<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C> ZeroizeOnDrop for Context<C> {}

/// Decodes a block into sixteen little-endian words.
pub(crate) fn decode(block: &[u8; BLOCK_LEN], words: &mut [u32; 16]) {
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
}

fn encode(state: &[u32; 4]) -> [u8; DIGEST_LEN] {
    let mut res = [0; DIGEST_LEN];
    for (bytes, word) in res.chunks_exact_mut(4).zip(state.iter()) {
        bytes.copy_from_slice(&word.to_le_bytes());
    }
    res
}

fn split_block(input: &[u8]) -> Option<(&[u8; BLOCK_LEN], &[u8])> {
    if input.len() < BLOCK_LEN {
        return None;
    }
    let (head, tail) = input.split_at(BLOCK_LEN);
    head.try_into().ok().map(|block| (block, tail))
}

#[cfg(feature = "tracing")]
#[inline]
fn trace_finish(algorithm: &'static str, bit_len: u64, pad_len: usize) {
    tracing::trace!(
        target: "md::engine",
        algorithm,
        bit_len,
        pad_len,
        "finalizing {} digest",
        algorithm
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
fn trace_finish(_algorithm: &'static str, _bit_len: u64, _pad_len: usize) {}

const PADDING: [u8; 64] = [
    0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];
