use std::env;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::info;

use clustered_lighting::{LightingParams, RenderSettings, ShaderGeneration};

const DEFAULT_MAX_TEXTURE_SIZE: u32 = 4096;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let source = fs::read_to_string(&options.path)
        .with_context(|| format!("failed to read settings {}", options.path))?;
    let settings = if is_xml(&options.path) {
        RenderSettings::from_xml(&source)
    } else {
        RenderSettings::from_json(&source)
    }
    .with_context(|| format!("failed to parse settings {}", options.path))?;

    info!(
        "simulating device with max texture size {} (area lights: {})",
        options.max_texture_size, options.supports_area_lights
    );
    let generation = ShaderGeneration::new();
    let mut params = LightingParams::new(
        options.supports_area_lights,
        options.max_texture_size,
        generation.callback(),
    )?;
    params.apply_settings(&settings);

    println!("Applied settings from {}", options.path);
    print_params(&params);
    println!("Shader invalidations: {}", generation.current());
    Ok(())
}

fn is_xml(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

fn print_params(params: &LightingParams) {
    let cells = params.cells();
    println!(" - cells = ({}, {}, {})", cells.x, cells.y, cells.z);
    println!(" - max_lights_per_cell = {}", params.max_lights_per_cell());
    println!(" - shadows_enabled = {}", params.shadows_enabled());
    println!(" - shadow_type = {}", params.shadow_type());
    println!(
        " - shadow_atlas_resolution = {}",
        params.shadow_atlas_resolution()
    );
    println!(" - cookies_enabled = {}", params.cookies_enabled());
    println!(
        " - cookie_atlas_resolution = {}",
        params.cookie_atlas_resolution()
    );
    println!(" - area_lights_enabled = {}", params.area_lights_enabled());
}

struct CliOptions {
    path: String,
    max_texture_size: u32,
    supports_area_lights: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(path) = args.next() else {
            return Err(anyhow!(
                "Usage: clustered-lighting <settings.(json|xml)> [--max-texture-size N] [--no-area-lights]"
            ));
        };
        let mut max_texture_size = DEFAULT_MAX_TEXTURE_SIZE;
        let mut supports_area_lights = true;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--max-texture-size" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--max-texture-size expects a value"))?;
                    max_texture_size = value
                        .parse()
                        .with_context(|| format!("invalid max texture size `{value}`"))?;
                }
                "--no-area-lights" => supports_area_lights = false,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --max-texture-size or --no-area-lights"
                    ));
                }
            }
        }
        Ok(Self {
            path,
            max_texture_size,
            supports_area_lights,
        })
    }
}
