use std::path::PathBuf;
use std::process::ExitCode;

use imgconv_rs::image_pipeline::{ConversionConfig, ConversionPipeline};
use imgconv_rs::logger;

use tracing::{debug, info};

const USAGE_EXIT_CODE: u8 = 1;

fn main() -> ExitCode {
    logger::init();

    let mut args = std::env::args_os();
    let program = args
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "imgconv_rs".to_string());
    let paths: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let [input, output] = paths.as_slice() else {
        eprintln!("Usage: {program} <in_file> <out_file>");
        return ExitCode::from(USAGE_EXIT_CODE);
    };

    let config = ConversionConfig::default();
    debug!(?config, "Using configuration");
    let pipeline = ConversionPipeline::new(config);

    match pipeline.convert_file(input, output) {
        Ok(()) => {
            info!("Conversion successful!");
            println!("Successfully converted");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
