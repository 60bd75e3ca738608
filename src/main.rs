//! HashKit CLI - digests, checksums, HMACs, hash lists and hash trees

use clap::Parser;
use hashkit::config::{parse_size, CliArgs, Commands, OutputFormat, Settings};
use hashkit::engine::Digest;
use hashkit::error::{HashError, Result};
use hashkit::hash::{
    benchmark_algorithms, digest_file_with_buffer, digest_files_parallel, digest_reader,
    DigestResult,
};
use hashkit::mac::{random_key, Hmac};
use hashkit::methods::{HashList, HashTree};
use hashkit::registry::{self, Factory};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const BENCH_ALGORITHMS: &[&str] = &[
    "CRC-32", "Adler-32", "FNV-1A-64", "MD5", "SHA-1", "SHA-256", "SHA-512", "RIPEMD-160",
    "Tiger-192", "Whirlpool",
];

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Initialize logging; RUST_LOG wins over -v
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let factory = Factory::new(settings);
    handle_command(&args.command, &factory, args.output_format)
}

fn handle_command(command: &Commands, factory: &Factory, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Hash { algorithm, files } => {
            let name = algorithm.as_deref().unwrap_or(&factory.settings().default_algorithm);
            cmd_hash(factory, name, files, format)
        }
        Commands::Hmac { algorithm, key, key_text, files } => {
            let name = algorithm.as_deref().unwrap_or(&factory.settings().hmac_algorithm);
            let key = match (key, key_text) {
                (Some(hex_key), _) => Some(
                    hex::decode(hex_key)
                        .map_err(|e| HashError::validation(format!("invalid hex key: {e}")))?,
                ),
                (None, Some(text)) => Some(text.as_bytes().to_vec()),
                (None, None) => None,
            };
            cmd_hmac(factory, name, key, files, format)
        }
        Commands::List { algorithm, block_size, file } => {
            let settings = &factory.settings().hash_list;
            let name = algorithm.as_deref().unwrap_or(&settings.algorithm);
            let block_size = block_size_arg(block_size.as_deref(), settings.block_size)?;
            cmd_list(factory, name, block_size, file, format)
        }
        Commands::Tree { algorithm, block_size, file } => {
            let settings = &factory.settings().hash_tree;
            let name = algorithm.as_deref().unwrap_or(&settings.algorithm);
            let block_size = block_size_arg(block_size.as_deref(), settings.block_size)?;
            cmd_tree(factory, name, block_size, file, format)
        }
        Commands::Algorithms => cmd_algorithms(format),
        Commands::Bench { algorithm, size } => {
            let size = parse_size(size).map_err(HashError::config)? as usize;
            let names: Vec<&str> = if algorithm.is_empty() {
                BENCH_ALGORITHMS.to_vec()
            } else {
                algorithm.iter().map(String::as_str).collect()
            };
            cmd_bench(factory, &names, size, format)
        }
    }
}

fn create(factory: &Factory, name: &str) -> Result<Box<dyn Digest>> {
    factory
        .create(name)
        .ok_or_else(|| HashError::validation(format!("unknown algorithm '{name}'")))
}

fn block_size_arg(arg: Option<&str>, default: usize) -> Result<usize> {
    match arg {
        Some(size) => Ok(parse_size(size).map_err(HashError::config)? as usize),
        None => Ok(default),
    }
}

fn print_results(results: &[(String, DigestResult)], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (source, result) in results {
                println!("{}  {}", result, source);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = results
                .iter()
                .map(|(source, result)| {
                    serde_json::json!({
                        "source": source,
                        "algorithm": result.algorithm,
                        "digest": result.digest,
                        "size": result.size,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn cmd_hash(factory: &Factory, name: &str, files: &[PathBuf], format: OutputFormat) -> Result<()> {
    let buffer_size = factory.settings().buffer_size;

    if files.is_empty() {
        let mut digest = create(factory, name)?;
        let result = digest_reader(digest.as_mut(), std::io::stdin().lock(), buffer_size)?;
        return print_results(&[("-".to_string(), result)], format);
    }

    let paths: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
    let mut results = Vec::with_capacity(paths.len());
    let mut failed = false;
    for (path, result) in paths.iter().zip(digest_files_parallel(&paths, name, factory)) {
        match result {
            Ok(result) => results.push((path.display().to_string(), result)),
            Err(e @ HashError::Validation(_)) => return Err(e),
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failed = true;
            }
        }
    }
    print_results(&results, format)?;

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_hmac(
    factory: &Factory,
    name: &str,
    key: Option<Vec<u8>>,
    files: &[PathBuf],
    format: OutputFormat,
) -> Result<()> {
    let buffer_size = factory.settings().buffer_size;
    let primitive = create(factory, name)?;
    let key = key.unwrap_or_else(|| {
        let key = random_key(primitive.output_size());
        eprintln!("key: {}", hex::encode(&key));
        key
    });
    let mut hmac = Hmac::new(primitive, Some(key.as_slice()));

    let mut results = Vec::new();
    if files.is_empty() {
        results.push(("-".to_string(), digest_reader(&mut hmac, std::io::stdin().lock(), buffer_size)?));
    }
    for path in files {
        results.push((path.display().to_string(), digest_file_with_buffer(path, &mut hmac, buffer_size)?));
    }
    print_results(&results, format)
}

fn cmd_list(
    factory: &Factory,
    name: &str,
    block_size: usize,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let mut list = HashList::new(create(factory, name)?, block_size)?
        .with_parallel_threshold(factory.settings().parallel_threshold);
    let top = digest_file_with_buffer(file, &mut list, factory.settings().buffer_size)?;

    match format {
        OutputFormat::Text => {
            println!("{}  {}", top, file.display());
            for (index, node) in list.iter().enumerate() {
                println!("{:>8}  {}-{}  {}", index, node.range_start(), node.range_end(), node.to_hex());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "source": file.display().to_string(),
                "algorithm": top.algorithm,
                "block_size": block_size,
                "top": top.digest,
                "size": top.size,
                "blocks": list.iter().collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

fn cmd_tree(
    factory: &Factory,
    name: &str,
    block_size: usize,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let mut tree = HashTree::new(create(factory, name)?, block_size)?;
    let root = digest_file_with_buffer(file, &mut tree, factory.settings().buffer_size)?;
    let leaves = tree.leaf_ids().len();

    match format {
        OutputFormat::Text => {
            println!("{}  {}", root, file.display());
            println!("{} leaves, {} nodes", leaves, tree.node_count());
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "source": file.display().to_string(),
                "algorithm": root.algorithm,
                "block_size": block_size,
                "root": root.digest,
                "size": root.size,
                "leaves": leaves,
                "nodes": tree.node_count(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

fn cmd_algorithms(format: OutputFormat) -> Result<()> {
    let names = registry::names();
    match format {
        OutputFormat::Text => {
            for name in names {
                println!("{}", name);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
    }
    Ok(())
}

fn cmd_bench(factory: &Factory, names: &[&str], size: usize, format: OutputFormat) -> Result<()> {
    if size == 0 {
        return Err(HashError::validation("benchmark size must be positive"));
    }
    let results = benchmark_algorithms(names, size, factory);

    match format {
        OutputFormat::Text => {
            println!("{:<20} {:>12} {:>12}", "Algorithm", "Time", "MB/s");
            for (name, duration, throughput) in results {
                println!("{:<20} {:>12.2?} {:>12.1}", name, duration, throughput);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = results
                .iter()
                .map(|(name, duration, throughput)| {
                    serde_json::json!({
                        "algorithm": name,
                        "seconds": duration.as_secs_f64(),
                        "mb_per_sec": throughput,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
