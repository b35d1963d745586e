use ep_normalize::{normalize_with_config, NormalizerConfig};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1).collect::<Vec<_>>();
    let config = match take_config_path(&mut args) {
        Ok(Some(path)) => match NormalizerConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        },
        Ok(None) => NormalizerConfig::default(),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if args.is_empty() {
        eprintln!("Usage: epnorm <document.xml>... [--config <config.json>]");
        std::process::exit(2);
    }

    let mut failures = 0;
    for path in &args {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!("Failed to read {}: {}", path, err);
                failures += 1;
                continue;
            }
        };

        match normalize_with_config(&bytes, &config) {
            Ok(normalized) => {
                let output = json!({
                    "path": path,
                    "document": normalized.document,
                    "diagnostics": normalized.diagnostics,
                });
                match serde_json::to_string_pretty(&output) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(err) => {
                        tracing::error!("Failed to render {}: {}", path, err);
                        failures += 1;
                    }
                }
            }
            Err(err) => {
                tracing::error!("Failed to normalize {}: {}", path, err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

fn take_config_path(args: &mut Vec<String>) -> Result<Option<String>, String> {
    let Some(index) = args.iter().position(|arg| arg == "--config") else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        return Err("--config requires a path".to_string());
    }
    let path = args.remove(index + 1);
    args.remove(index);
    Ok(Some(path))
}
