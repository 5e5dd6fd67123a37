//! gash - print MD5, SHA-256, CRC-32, Adler-32 or ELF digests of files
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gash::algorithm::Algorithm;
use gash::source::ReaderSource;
use gash::{ByteSource, Checksum};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// hash algorithm: md5, sha256, crc32, adler32 or elf
    #[arg(short, long, default_value_t = Algorithm::Md5)]
    algorithm: Algorithm,

    /// print the credits and exit
    #[arg(short, long, default_value_t = false)]
    credits: bool,

    /// files to hash, read as raw bytes
    #[arg(required_unless_present = "credits")]
    files: Vec<PathBuf>,
}

const CREDITS: &str = "\
gash computes file integrity digests.

MD5 follows RFC 1321, SHA-256 follows FIPS 180-2, CRC-32 is the
reflected 0xEDB88320 CRC used by zlib, Adler-32 is the zlib rolling
checksum and ELF is the System V ABI symbol hash.";

fn hash_file(algorithm: Algorithm, path: &Path) -> Result<String> {
    let mut source =
        ReaderSource::open(path).with_context(|| format!("Hashing {path:?} with {algorithm}"))?;
    let mut hasher = algorithm.hasher();
    let result = hasher.calculate_hash_from_source(&mut source);

    // The engine hides read failures behind the sentinel digest
    if !source.is_available() {
        bail!("reading {path:?} failed");
    }

    Ok(result)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Args = Args::parse();

    println!("Gash version: {}", env!("CARGO_PKG_VERSION"));

    if args.credits {
        println!("{CREDITS}");
        return Ok(());
    }

    for path in &args.files {
        let result = hash_file(args.algorithm, path)?;
        println!("File: {}", path.display());
        println!("{}: {}", args.algorithm, result);
    }

    Ok(())
}
