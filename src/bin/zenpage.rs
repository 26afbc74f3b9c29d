//! Deploy-time cache warmer.
//!
//! Runs the worker's install/activate cycle against the configured origin
//! and a disk-backed store, so a deploy can verify that every manifest asset
//! is reachable (a single unreachable asset aborts the install) and that
//! stale version buckets get purged.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use zenpage::{AppConfig, CacheWorker, DiskStore, HttpNetwork};

fn print_usage() {
    eprintln!("Usage: zenpage [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <PATH>   TOML config file (worker origin, version, manifest)");
    eprintln!("  --cache-dir <DIR> Override the on-disk cache directory");
    eprintln!("  -h, --help        Show this help");
}

fn parse_args() -> Result<(Option<PathBuf>, Option<PathBuf>), String> {
    let mut config_path = None;
    let mut cache_dir = None;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let value = args.get(i).ok_or("--config requires a value")?;
                config_path = Some(PathBuf::from(value));
            }
            "--cache-dir" => {
                i += 1;
                let value = args.get(i).ok_or("--cache-dir requires a value")?;
                cache_dir = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }
    Ok((config_path, cache_dir))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let (config_path, cache_dir) = match parse_args() {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let mut config = match config_path {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };
    if let Some(dir) = cache_dir {
        config.paths.cache_dir = dir;
    }

    let store = DiskStore::new(config.paths.cache_dir.clone());
    let worker = CacheWorker::new(store, HttpNetwork::new(), config.worker);
    let mut worker = match worker {
        Ok(worker) => worker,
        Err(e) => {
            eprintln!("Invalid worker configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Warming cache for version {}...", worker.version());
    let cached = match worker.install().await {
        Ok(cached) => cached,
        Err(e) => {
            eprintln!("Install failed, previous version left intact: {e}");
            return ExitCode::FAILURE;
        }
    };

    let purged = match worker.activate().await {
        Ok(purged) => purged,
        Err(e) => {
            eprintln!("Activation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Cached {cached} asset(s) into bucket {}, purged {purged} stale bucket(s).",
        worker.version()
    );
    ExitCode::SUCCESS
}
