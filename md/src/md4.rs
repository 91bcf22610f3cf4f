//! MD4 Message-Digest algorithm
//!
//! https://datatracker.ietf.org/doc/html/rfc1320
#![allow(clippy::many_single_char_names)]

use zeroize::Zeroizing;

use crate::engine::{decode, Compress, Context, BLOCK_LEN, DIGEST_LEN};

pub type Md4 = Context<Md4Compress>;

pub fn md4(input: &[u8]) -> [u8; DIGEST_LEN] {
    let mut state = Md4::new();
    state.update(input);
    state.digest()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Md4Compress;

impl Compress for Md4Compress {
    const NAME: &'static str = "MD4";

    fn compress(state: &mut [u32; 4], block: &[u8; BLOCK_LEN]) {
        transform(state, block);
    }
}

const K2: u32 = 0x5a827999;
const K3: u32 = 0x6ed9eba1;

const S1: [u32; 4] = [3, 7, 11, 19];
const S2: [u32; 4] = [3, 5, 9, 13];
const S3: [u32; 4] = [3, 9, 11, 15];

const X1: [usize; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
const X2: [usize; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];
const X3: [usize; 16] = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];

fn transform(state: &mut [u32; 4], block: &[u8; BLOCK_LEN]) {
    // both are wiped on drop
    let mut x = Zeroizing::new([0u32; 16]);
    decode(block, &mut x);
    let mut v = Zeroizing::new(*state);

    round(&mut v, &x, &X1, &S1, 0, f);
    round(&mut v, &x, &X2, &S2, K2, g);
    round(&mut v, &x, &X3, &S3, K3, h);

    for (s, w) in state.iter_mut().zip(v.iter()) {
        *s = s.wrapping_add(*w);
    }
}

/// Sixteen steps `a = (a + f(b, c, d) + x[k] + K) <<< s`, the roles of
/// `(a, b, c, d)` rotating right after each step.
fn round<F>(
    v: &mut [u32; 4],
    x: &[u32; 16],
    order: &[usize; 16],
    shifts: &[u32; 4],
    k: u32,
    f: F,
) where
    F: Fn(u32, u32, u32) -> u32,
{
    for (i, &idx) in order.iter().enumerate() {
        let [a, b, c, d] = *v;
        let a = a
            .wrapping_add(f(b, c, d))
            .wrapping_add(x[idx])
            .wrapping_add(k)
            .rotate_left(shifts[i % 4]);
        *v = [d, a, b, c];
    }
}

fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | ((!x) & z)
}

fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}
