//! MD5 Message-Digest algorithm
//!
//! https://datatracker.ietf.org/doc/html/rfc1321
#![allow(clippy::many_single_char_names)]

use zeroize::Zeroizing;

use crate::engine::{decode, Compress, Context, BLOCK_LEN, DIGEST_LEN};

pub type Md5 = Context<Md5Compress>;

pub fn md5(input: &[u8]) -> [u8; DIGEST_LEN] {
    let mut state = Md5::new();
    state.update(input);
    state.digest()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Compress;

impl Compress for Md5Compress {
    const NAME: &'static str = "MD5";

    fn compress(state: &mut [u32; 4], block: &[u8; BLOCK_LEN]) {
        transform(state, block);
    }
}

fn transform(state: &mut [u32; 4], block: &[u8; BLOCK_LEN]) {
    let mut x = Zeroizing::new([0u32; 16]);
    decode(block, &mut x);
    let mut v = Zeroizing::new(*state);

    round(&mut v, &x, &X[0], &S[0], &T[0], f);
    round(&mut v, &x, &X[1], &S[1], &T[1], g);
    round(&mut v, &x, &X[2], &S[2], &T[2], h);
    round(&mut v, &x, &X[3], &S[3], &T[3], i);

    state[0] = state[0].wrapping_add(v[0]);
    state[1] = state[1].wrapping_add(v[1]);
    state[2] = state[2].wrapping_add(v[2]);
    state[3] = state[3].wrapping_add(v[3]);
}

fn round<F>(
    v: &mut [u32; 4],
    x: &[u32; 16],
    order: &[usize; 16],
    shifts: &[u32; 4],
    t: &[u32; 16],
    f: F,
) where
    F: Fn(u32, u32, u32) -> u32,
{
    for (step, &idx) in order.iter().enumerate() {
        let [a, b, c, d] = *v;
        let a = a
            .wrapping_add(f(b, c, d))
            .wrapping_add(x[idx])
            .wrapping_add(t[step])
            .rotate_left(shifts[step % 4])
            .wrapping_add(b);
        *v = [d, a, b, c];
    }
}

fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | ((!x) & z)
}

fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & (!z))
}

fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// Shift amounts per round.
const S: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

/// Message word order per round: `i`, `1 + 5i`, `5 + 3i` and `7i` (mod 16).
const X: [[usize; 16]; 4] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [1, 6, 11, 0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12],
    [5, 8, 11, 14, 1, 4, 7, 10, 13, 0, 3, 6, 9, 12, 15, 2],
    [0, 7, 14, 5, 12, 3, 10, 1, 8, 15, 6, 13, 4, 11, 2, 9],
];

/// `T[i] = floor(2^32 * abs(sin(i + 1)))`
const T: [[u32; 16]; 4] = [
    [
        0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613,
        0xfd469501, 0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193,
        0xa679438e, 0x49b40821,
    ],
    [
        0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681,
        0xe7d3fbc8, 0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8,
        0x676f02d9, 0x8d2a4c8a,
    ],
    [
        0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60,
        0xbebfbc70, 0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5,
        0x1fa27cf8, 0xc4ac5665,
    ],
    [
        0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d,
        0x85845dd1, 0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235,
        0x2ad7d2bb, 0xeb86d391,
    ],
];
