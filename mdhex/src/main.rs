use md::{parse_digest, Algorithm, Hasher, DIGEST_LEN};

use anyhow::{bail, Context as _};
use argh::FromArgs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use std::io::{self, Write};

#[derive(FromArgs)]
/// Compute MD4 and MD5 digests as hex strings
struct Args {
    /// digest algorithm, md4 or md5 (default: md5)
    #[argh(option, short = 'a', default = "Algorithm::Md5")]
    algorithm: Algorithm,

    /// hash this string instead of stdin
    #[argh(option, short = 's')]
    string: Option<String>,

    /// expected digest as hex string
    #[argh(option, short = 'c')]
    check: Option<String>,

    /// run the RFC test suite of the algorithm
    #[argh(switch)]
    self_test: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.self_test {
        return self_test(args.algorithm, &mut out);
    }

    let digest = match &args.string {
        Some(s) => args.algorithm.digest(s.as_bytes()),
        None => hash_reader(args.algorithm, &mut io::stdin().lock())?,
    };
    writeln!(out, "{}", hex::encode(digest))?;

    if let Some(expected) = &args.check {
        check(&digest, expected)?;
    }
    Ok(())
}

fn hash_reader(
    algorithm: Algorithm,
    input: &mut impl io::Read,
) -> anyhow::Result<[u8; DIGEST_LEN]> {
    let mut hasher = Hasher::new(algorithm);
    let len = io::copy(input, &mut hasher).context("failed to read input")?;
    debug!(%algorithm, len, "hashed input");
    Ok(hasher.digest())
}

fn check(digest: &[u8; DIGEST_LEN], expected: &str) -> anyhow::Result<()> {
    let expected = parse_digest(expected).context("invalid expected digest")?;
    if digest != &expected {
        bail!(
            "digest mismatch: expected {} but it was {}",
            hex::encode(expected),
            hex::encode(digest)
        );
    }
    Ok(())
}

fn self_test(algorithm: Algorithm, out: &mut impl Write) -> anyhow::Result<()> {
    for (number, (input, expected)) in (1..).zip(algorithm.vectors()) {
        let digest = algorithm.digest(input.as_bytes());
        writeln!(out, "Digest #{:02}: {}", number, hex::encode(digest))?;
        check(&digest, expected)
            .with_context(|| format!("{} test {} failed", algorithm, number))?;
    }
    info!(%algorithm, "self-test passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, argh::EarlyExit> {
        Args::from_args(&["mdhex"], args)
    }

    #[test]
    fn test_args() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.algorithm, Algorithm::Md5);
        assert!(args.string.is_none());
        assert!(!args.self_test);

        let args = parse(&["-a", "md4", "-s", "abc", "--self-test"]).unwrap();
        assert_eq!(args.algorithm, Algorithm::Md4);
        assert_eq!(args.string.as_deref(), Some("abc"));
        assert!(args.self_test);

        assert!(parse(&["-a", "sha256"]).is_err());
    }

    #[test]
    fn test_hash_reader() {
        let digest = hash_reader(Algorithm::Md4, &mut &b"abc"[..]).unwrap();
        assert_eq!(hex::encode(digest), "a448017aaf21d8525fc10ae87aa6729d");
    }

    #[test]
    fn test_check() {
        let digest = Algorithm::Md5.digest(b"");
        assert!(check(&digest, "d41d8cd98f00b204e9800998ecf8427e").is_ok());
        assert!(check(&digest, "D41D8CD98F00B204E9800998ECF8427E").is_ok());
        let err = check(&digest, "900150983cd24fb0d6963f7d28e17f72").unwrap_err();
        assert!(err.to_string().starts_with("digest mismatch"));
        assert!(check(&digest, "not hex").is_err());
    }

    #[test]
    fn test_self_test_output() {
        let mut out = Vec::new();
        self_test(Algorithm::Md4, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Digest #01: 31d6cfe0d16ae931b73c59d7e0c089c0");
        assert_eq!(lines[6], "Digest #07: e33b4ddc9c38f2199c3e7b164fcc0536");
    }
}
