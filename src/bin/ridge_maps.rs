use ridge_maps::config::maps::{self as maps_config, MapsToolConfig};
use ridge_maps::diagnostics::MapSummary;
use ridge_maps::image::io::{
    load_grayscale_image, save_binary_image, save_block_map, write_json_file,
};
use ridge_maps::image::ImageBufU8;
use ridge_maps::pipeline::{extract_maps_batch, SUPPORTED_DEPTH};
use ridge_maps::MapBundle;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = maps_config::load_config(Path::new(&config_path))?;
    if config.inputs.is_empty() {
        return Err("Config lists no inputs".to_string());
    }

    let images = config
        .inputs
        .iter()
        .map(|path| load_grayscale_image(path))
        .collect::<Result<Vec<ImageBufU8>, String>>()?;
    let views: Vec<_> = images.iter().map(ImageBufU8::as_view).collect();

    let start = Instant::now();
    let results = extract_maps_batch(&views, SUPPORTED_DEPTH, &config.params, config.binarize);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let mut failures = 0usize;
    for (input, result) in config.inputs.iter().zip(results) {
        match result {
            Ok(bundle) => write_outputs(&config, input, &bundle)?,
            Err(err) => {
                failures += 1;
                eprintln!("{}: {err}", input.display());
            }
        }
    }

    println!(
        "Processed {} image(s) in {:.2} ms, {} failed",
        config.inputs.len(),
        elapsed_ms,
        failures
    );
    if failures > 0 {
        return Err(format!("{failures} input(s) failed"));
    }
    Ok(())
}

fn write_outputs(config: &MapsToolConfig, input: &Path, bundle: &MapBundle) -> Result<(), String> {
    let output = &config.output;
    let report_path = output.path_for(input, "_maps.json");
    let report = InputReport {
        input: input.to_path_buf(),
        summary: MapSummary::from_bundle(bundle),
        maps: bundle,
    };
    write_json_file(&report_path, &report)?;

    if output.save_images {
        let bs = config.params.block_size;
        save_block_map(&bundle.quality, bs, &output.path_for(input, "_quality.png"))?;
        save_block_map(&bundle.direction, bs, &output.path_for(input, "_direction.png"))?;
        if let Some(binarized) = &bundle.binarized {
            save_binary_image(binarized, &output.path_for(input, "_binarized.png"))?;
        }
    }

    println!(
        "{}: {}x{} blocks, {} directions, quality {:?} -> {}",
        input.display(),
        bundle.block_w,
        bundle.block_h,
        report.summary.valid_directions,
        report.summary.quality_histogram,
        report_path.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: ridge_maps <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InputReport<'a> {
    input: PathBuf,
    summary: MapSummary,
    maps: &'a MapBundle,
}
