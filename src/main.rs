use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, warn};

use tinydarknet_infer::{run_batch, status, InferError, InitParam, TinydarknetClassify};

/// Classify every image in a directory with Tiny-DarkNet and report throughput
#[derive(Parser, Debug)]
#[command(name = "tinydarknet", version, about)]
struct Cli {
    /// Directory holding the images to classify
    image_dir: Option<PathBuf>,

    /// Ignored extra arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    extra: Vec<String>,

    /// TOML file overriding the default init parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON result file per image into this directory
    #[arg(long, value_name = "DIR")]
    result_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let code = match run(cli) {
        Ok(()) => status::APP_ERR_OK,
        Err(e) => {
            let code = e
                .downcast_ref::<InferError>()
                .map(InferError::code)
                .unwrap_or(status::APP_ERR_COMM_FAILURE);
            debug!("{:?}", e);
            code
        }
    };

    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}

fn run(cli: Cli) -> Result<()> {
    let Some(image_dir) = cli.image_dir else {
        warn!("Please input image path, such as './tinydarknet image_dir'.");
        return Ok(());
    };

    let mut param = match &cli.config {
        Some(path) => InitParam::load(path)
            .inspect_err(|e| error!("{}, ret={}.", e, e.code()))
            .with_context(|| format!("Failed to load init parameters from {}", path.display()))?,
        None => InitParam::default(),
    };
    if cli.result_dir.is_some() {
        param.result_dir = cli.result_dir;
    }

    let mut classifier = TinydarknetClassify::new();
    run_batch(&mut classifier, &param, &image_dir)?;
    Ok(())
}
