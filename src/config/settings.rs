//! Configuration settings for HashKit
//!
//! Library defaults for name-based construction, plus the CLI arguments
//! of the `hashkit` binary.

use crate::error::{HashError, IoResultExt, Result};
use crate::methods::{DEFAULT_BLOCK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use crate::registry;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// HashKit - streaming digests, checksums, hash lists and hash trees
#[derive(Parser, Debug, Clone)]
#[command(name = "hashkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compute digests, checksums, HMACs, hash lists and hash trees")]
#[command(long_about = r#"
HashKit computes cryptographic and non-cryptographic digests over files or stdin.

Algorithm names are case-insensitive and ignore '-', '_' and '/':
"Crc32", "CRC-32" and "crc_32" are the same algorithm. Family names such as
"Crc" or "Tiger" select the family's default standard.

Examples:
  hashkit hash -a sha-256 file.bin            # Digest a file
  hashkit hash -a crc-16-arc < data           # Digest stdin
  hashkit hmac -a md5 --key-text Jefe msg.txt # HMAC with a text key
  hashkit tree -a tiger -b 1K big.iso         # Merkle root with 1 KiB leaves
  hashkit algorithms                          # List algorithm names
"#)]
pub struct CliArgs {
    /// Settings file (JSON)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub output_format: OutputFormat,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Digest files, or stdin when no file is given
    #[command(name = "hash")]
    Hash {
        /// Algorithm name (defaults to the configured default algorithm)
        #[arg(short, long, value_name = "ALGO")]
        algorithm: Option<String>,
        /// Files to digest
        files: Vec<PathBuf>,
    },

    /// Keyed HMAC of files or stdin
    #[command(name = "hmac")]
    Hmac {
        /// Inner algorithm name (defaults to the configured HMAC algorithm)
        #[arg(short, long, value_name = "ALGO")]
        algorithm: Option<String>,
        /// Key as hex
        #[arg(long, value_name = "HEX", conflicts_with = "key_text")]
        key: Option<String>,
        /// Key as UTF-8 text
        #[arg(long, value_name = "TEXT")]
        key_text: Option<String>,
        /// Files to authenticate
        files: Vec<PathBuf>,
    },

    /// Hash list of a file: per-block digests and the top digest
    #[command(name = "list")]
    List {
        /// Primitive algorithm (defaults to the configured list algorithm)
        #[arg(short, long, value_name = "ALGO")]
        algorithm: Option<String>,
        /// Block size (e.g., 1K, 64K)
        #[arg(short, long, value_name = "SIZE")]
        block_size: Option<String>,
        /// Input file
        file: PathBuf,
    },

    /// Merkle hash tree root of a file
    #[command(name = "tree")]
    Tree {
        /// Primitive algorithm (defaults to the configured tree algorithm)
        #[arg(short, long, value_name = "ALGO")]
        algorithm: Option<String>,
        /// Leaf size (e.g., 1K, 64K)
        #[arg(short, long, value_name = "SIZE")]
        block_size: Option<String>,
        /// Input file
        file: PathBuf,
    },

    /// List known algorithm names
    #[command(name = "algorithms")]
    Algorithms,

    /// Measure throughput of algorithms over an in-memory buffer
    #[command(name = "bench")]
    Bench {
        /// Algorithms to measure (defaults to a representative set)
        #[arg(short, long, value_name = "ALGO")]
        algorithm: Vec<String>,
        /// Buffer size (e.g., 16M)
        #[arg(long, default_value = "16M")]
        size: String,
    },
}

/// Output format for reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Primitive and block size of a list or tree built by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeSettings {
    /// Primitive algorithm name
    pub algorithm: String,
    /// Block (leaf) size in bytes
    pub block_size: usize,
}

/// Library-wide defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Algorithm used when none is named
    pub default_algorithm: String,
    /// Hash list construction
    pub hash_list: CompositeSettings,
    /// Hash tree construction
    pub hash_tree: CompositeSettings,
    /// Inner algorithm of HMACs built by the factory
    pub hmac_algorithm: String,
    /// Input length from which fan-outs and lists use the rayon pool
    pub parallel_threshold: usize,
    /// Read buffer size for file hashing
    pub buffer_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_algorithm: "SHA-1".to_string(),
            hash_list: CompositeSettings {
                algorithm: "SHA-1".to_string(),
                block_size: DEFAULT_BLOCK_SIZE,
            },
            hash_tree: CompositeSettings {
                algorithm: "Tiger-192".to_string(),
                block_size: DEFAULT_BLOCK_SIZE,
            },
            hmac_algorithm: "SHA-256".to_string(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            buffer_size: 1024 * 1024, // 1MB
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_path(path)?;
        let settings = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?).with_path(path)
    }

    /// Check names and sizes
    pub fn validate(&self) -> Result<()> {
        ensure_known("default_algorithm", &self.default_algorithm)?;
        ensure_known("hmac_algorithm", &self.hmac_algorithm)?;
        for (what, composite) in [("hash_list", &self.hash_list), ("hash_tree", &self.hash_tree)] {
            let algorithm = ensure_known(what, &composite.algorithm)?;
            if algorithm.is_composite() {
                return Err(HashError::validation(format!(
                    "{what}: {} cannot be used as a primitive",
                    composite.algorithm
                )));
            }
            if composite.block_size == 0 {
                return Err(HashError::validation(format!("{what}: block size must be positive")));
            }
        }
        if self.buffer_size == 0 {
            return Err(HashError::validation("buffer size must be positive"));
        }
        Ok(())
    }
}

fn ensure_known(what: &'static str, name: &str) -> Result<registry::Algorithm> {
    if name.trim().is_empty() {
        return Err(HashError::NullInput(what));
    }
    registry::lookup(name)
        .ok_or_else(|| HashError::validation(format!("{what}: unknown algorithm '{name}'")))
}

/// Parse human-readable size string to bytes
pub fn parse_size(size: &str) -> std::result::Result<u64, String> {
    let size = size.trim().to_uppercase();

    if size.is_empty() {
        return Err("Empty size string".to_string());
    }

    let (num_str, multiplier) = if size.ends_with("GB") || size.ends_with('G') {
        (size.trim_end_matches(['G', 'B']), 1024u64 * 1024 * 1024)
    } else if size.ends_with("MB") || size.ends_with('M') {
        (size.trim_end_matches(['M', 'B']), 1024u64 * 1024)
    } else if size.ends_with("KB") || size.ends_with('K') {
        (size.trim_end_matches(['K', 'B']), 1024u64)
    } else {
        (size.trim_end_matches('B'), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    Ok((num * multiplier as f64) as u64)
}
