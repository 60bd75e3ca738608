//! Digests of readers, files and in-memory buffers
//!
//! Every helper takes an already constructed [`Digest`], restarts it, and
//! streams the input through it in buffer-sized chunks.

use crate::engine::Digest;
use crate::error::{HashError, IoResultExt, Result};
use crate::registry::Factory;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use std::time::{Duration, Instant};

const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024; // 1MB

/// Digest result as hex string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestResult {
    /// Name of the algorithm used
    pub algorithm: String,
    /// Digest as lowercase hex string
    pub digest: String,
    /// Number of input bytes
    pub size: u64,
}

impl DigestResult {
    /// Create a new digest result
    pub fn new(algorithm: impl Into<String>, digest: &[u8], size: u64) -> Self {
        Self {
            algorithm: algorithm.into(),
            digest: hex::encode(digest),
            size,
        }
    }

    /// Verify against another result
    pub fn verify(&self, other: &DigestResult) -> bool {
        self.algorithm == other.algorithm && self.digest.eq_ignore_ascii_case(&other.digest)
    }

    /// The digest as raw bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        hex::decode(&self.digest)
            .map_err(|e| HashError::validation(format!("malformed digest '{}': {e}", self.digest)))
    }
}

impl std::fmt::Display for DigestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest)
    }
}

/// Digest everything `reader` yields
pub fn digest_reader<R: Read>(
    digest: &mut dyn Digest,
    mut reader: R,
    buffer_size: usize,
) -> Result<DigestResult> {
    if buffer_size == 0 {
        return Err(HashError::validation("buffer size must be positive"));
    }
    digest.reset();
    let mut buffer = vec![0u8; buffer_size];
    let mut size = 0u64;

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        digest.update(&buffer[..bytes_read])?;
        size += bytes_read as u64;
    }

    Ok(DigestResult::new(digest.name(), &digest.finalize()?, size))
}

/// Digest of a file
pub fn digest_file(path: &Path, digest: &mut dyn Digest) -> Result<DigestResult> {
    digest_file_with_buffer(path, digest, DEFAULT_BUFFER_SIZE)
}

/// Digest of a file with custom buffer size
pub fn digest_file_with_buffer(
    path: &Path,
    digest: &mut dyn Digest,
    buffer_size: usize,
) -> Result<DigestResult> {
    let file = File::open(path).with_path(path)?;
    let reader = BufReader::with_capacity(buffer_size.max(1), file);
    digest_reader(digest, reader, buffer_size).map_err(|e| match e {
        HashError::Io { source, .. } => HashError::io(path, source),
        other => other,
    })
}

/// Digest of data in memory
pub fn digest_bytes(data: &[u8], digest: &mut dyn Digest) -> Result<DigestResult> {
    let out = digest.compute(data)?;
    Ok(DigestResult::new(digest.name(), &out, data.len() as u64))
}

/// Check a file against a previously recorded result
pub fn verify_file(path: &Path, expected: &DigestResult, factory: &Factory) -> Result<bool> {
    let mut digest = create(factory, &expected.algorithm)?;
    let actual = digest_file_with_buffer(path, digest.as_mut(), factory.settings().buffer_size)?;
    Ok(actual.verify(expected))
}

/// Digest several files in parallel, each with its own instance of `algorithm`
pub fn digest_files_parallel(
    paths: &[&Path],
    algorithm: &str,
    factory: &Factory,
) -> Vec<Result<DigestResult>> {
    let buffer_size = factory.settings().buffer_size;
    paths
        .par_iter()
        .map(|path| {
            let mut digest = create(factory, algorithm)?;
            digest_file_with_buffer(path, digest.as_mut(), buffer_size)
        })
        .collect()
}

/// Throughput of each named algorithm, fastest first
///
/// Names that cannot be built are skipped.
pub fn benchmark_algorithms(
    names: &[&str],
    data_size: usize,
    factory: &Factory,
) -> Vec<(String, Duration, f64)> {
    let data: Vec<u8> = (0..data_size).map(|i| (i % 256) as u8).collect();
    let mut results = Vec::new();

    for &name in names {
        let Some(mut digest) = factory.create(name) else {
            tracing::warn!(name, "skipping unknown algorithm");
            continue;
        };

        let iterations = 10;
        let start = Instant::now();
        for _ in 0..iterations {
            if let Err(e) = digest.compute(&data) {
                tracing::warn!(name, error = %e, "benchmark run failed");
                break;
            }
        }

        let duration = start.elapsed() / iterations;
        let throughput = (data_size as f64) / duration.as_secs_f64() / (1024.0 * 1024.0);
        results.push((digest.name(), duration, throughput));
    }

    results.sort_by(|a, b| a.1.cmp(&b.1));
    results
}

fn create(factory: &Factory, name: &str) -> Result<Box<dyn Digest>> {
    factory
        .create(name)
        .ok_or_else(|| HashError::validation(format!("unknown algorithm '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Md5, Sha1};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_digest_bytes() {
        let result = digest_bytes(b"abc", &mut Md5::default()).unwrap();
        assert_eq!(result.algorithm, "MD5");
        assert_eq!(result.digest, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(result.size, 3);
        assert_eq!(result.to_string(), result.digest);
    }

    #[test]
    fn test_digest_file_matches_memory() {
        let dir = TempDir::new().unwrap();
        let content: Vec<u8> = (0..10_000u32).map(|i| (i * 7) as u8).collect();
        let path = create_test_file(dir.path(), "test.bin", &content);

        let mut sha1 = Sha1::default();
        let from_file = digest_file_with_buffer(&path, &mut sha1, 333).unwrap();
        let from_memory = digest_bytes(&content, &mut sha1).unwrap();

        assert_eq!(from_file, from_memory);
        assert_eq!(from_file.size, 10_000);
    }

    #[test]
    fn test_digest_reader_restarts_digest() {
        let mut md5 = Md5::default();
        md5.update(b"stale input").unwrap();
        let result = digest_reader(&mut md5, &b""[..], 64).unwrap();
        assert_eq!(result.digest, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.bin");
        let err = digest_file(&missing, &mut Md5::default()).unwrap_err();
        assert_eq!(err.path(), Some(&missing));
    }

    #[test]
    fn test_verify_file() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(dir.path(), "test.bin", b"Identical content");
        let factory = Factory::default();

        let expected = digest_bytes(b"Identical content", &mut Sha1::default()).unwrap();
        assert!(verify_file(&path, &expected, &factory).unwrap());

        std::fs::write(&path, b"Different content").unwrap();
        assert!(!verify_file(&path, &expected, &factory).unwrap());
    }

    #[test]
    fn test_digest_files_parallel() {
        let dir = TempDir::new().unwrap();
        let a = create_test_file(dir.path(), "a.txt", b"123456789");
        let b = create_test_file(dir.path(), "b.txt", b"");
        let factory = Factory::default();

        let results = digest_files_parallel(&[&a, &b], "crc32", &factory);
        assert_eq!(results[0].as_ref().unwrap().digest, "cbf43926");
        assert_eq!(results[1].as_ref().unwrap().digest, "00000000");

        let results = digest_files_parallel(&[&a], "NoSuchHash", &factory);
        assert!(matches!(results[0], Err(HashError::Validation(_))));
    }

    #[test]
    fn test_benchmark_skips_unknown() {
        let results = benchmark_algorithms(&["md5", "NoSuchHash", "crc32"], 4096, &Factory::default());
        assert_eq!(results.len(), 2);
        assert!(results.windows(2).all(|w| w[0].1 <= w[1].1));
    }
}
