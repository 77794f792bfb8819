use anyhow::{anyhow, bail, Context};
use crabexposure::config::ExposureConfig;
use crabexposure::control_loop::ExposureLoop;
use crabexposure::source::{FrameSource, ImageSequenceSource};
use crabexposure::store::{ExposureStore, InMemoryExposureStore};
use crabexposure::testing::SimulatedCamera;
use crabexposure::{compute_msv, Frame};
use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const USAGE: &str = "Usage: crabexposure-cli <msv|simulate|run|default-config|version> [args]";

fn main() -> anyhow::Result<()> {
    crabexposure::init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    let command = &args[1];
    match command.as_str() {
        "msv" => cmd_msv(&args),
        "simulate" => cmd_simulate(&args),
        "run" => cmd_run(&args),
        "default-config" => cmd_default_config(&args),
        "version" => cmd_version(&args),
        _ => {
            eprintln!("Unknown command: {}", command);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    }
}

/// Value following `flag`, if the flag is present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> anyhow::Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| anyhow!("{} requires a value", flag)),
        None => Ok(None),
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn cmd_msv(args: &[String]) -> anyhow::Result<()> {
    let json = has_flag(args, "--json");
    let paths: Vec<&String> = args[2..].iter().filter(|a| !a.starts_with("--")).collect();
    if paths.is_empty() {
        bail!("Usage: crabexposure-cli msv <image>... [--json]");
    }

    for path in paths {
        let image = image::open(path).with_context(|| format!("Failed to decode {}", path))?;
        let frame = Frame::from_dynamic(&image)?;
        let msv = compute_msv(&frame)?;
        if json {
            let line = serde_json::json!({
                "path": path,
                "width": frame.width,
                "height": frame.height,
                "msv": msv,
            });
            println!("{}", line);
        } else {
            println!("{}: {:.4}", path, msv);
        }
    }
    Ok(())
}

fn cmd_simulate(args: &[String]) -> anyhow::Result<()> {
    let frames: u64 = flag_value(args, "--frames")?.unwrap_or("100").parse()?;
    let exposure: f64 = flag_value(args, "--exposure")?.unwrap_or("0.2").parse()?;
    let illumination: f64 = flag_value(args, "--illumination")?
        .unwrap_or("1.0")
        .parse()?;
    let json = has_flag(args, "--json");

    let config = match flag_value(args, "--config")? {
        Some(path) => ExposureConfig::load_layered(path)?,
        None => ExposureConfig::default(),
    };
    config.validate().map_err(|e| anyhow!(e))?;

    let mut camera = SimulatedCamera::new(320, 240, exposure);
    camera.set_illumination(illumination);
    let mut exposure_loop = ExposureLoop::new(config.controller, camera);

    for _ in 0..frames {
        let frame = exposure_loop.store().capture();
        let report = exposure_loop.process_frame(&frame)?;
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            let exposure = exposure_loop.store().exposure();
            let marker = if report.update.is_some() { "*" } else { " " };
            println!(
                "{:>5} msv {:.3} err_p {:+.3} err_i {:+.3} exposure {:.4}{}",
                report.sequence, report.msv, report.err_p, report.err_i, exposure, marker
            );
        }
    }

    print_stats(&exposure_loop, json)
}

fn cmd_run(args: &[String]) -> anyhow::Result<()> {
    let config_path = flag_value(args, "--config")?
        .map(PathBuf::from)
        .unwrap_or_else(ExposureConfig::default_path);
    let mut config = ExposureConfig::load_layered(&config_path)?;
    if let Some(dir) = flag_value(args, "--frames")? {
        config.source.frames_directory = Some(dir.to_string());
    }
    config.validate().map_err(|e| anyhow!(e))?;
    let json = has_flag(args, "--json");

    let frames_dir = config.source.frames_directory.clone().ok_or_else(|| {
        anyhow!("no frame source: pass --frames <dir> or set [source] frames_directory")
    })?;
    let mut source = ImageSequenceSource::from_directory(&frames_dir)?
        .with_interval(Duration::from_millis(config.source.frame_interval_ms))
        .with_repeat(config.source.repeat);

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))
        .context("Failed to install Ctrl-C handler")?;

    match flag_value(args, "--store")?.unwrap_or("memory") {
        "memory" => {
            let exposure: f64 = flag_value(args, "--exposure")?.unwrap_or("1.0").parse()?;
            let mut store = InMemoryExposureStore::new(exposure);
            if config.camera.disable_auto_exposure {
                store.disable_auto_exposure()?;
            }
            run_loop(&config, store, &mut source, &stop, json)
        }
        #[cfg(all(feature = "v4l2", target_os = "linux"))]
        "v4l2" => {
            let mut store = crabexposure::store::V4l2ExposureStore::open(
                &config.camera.device,
                &config.camera.exposure_parameter,
                config.camera.exposure_scale,
            )?;
            if config.camera.disable_auto_exposure {
                store.disable_auto_exposure(&config.camera.auto_exposure_parameter)?;
            }
            run_loop(&config, store, &mut source, &stop, json)
        }
        other => bail!("Unknown or unavailable store: {}", other),
    }
}

fn run_loop<S: ExposureStore, F: FrameSource>(
    config: &ExposureConfig,
    store: S,
    source: &mut F,
    stop: &AtomicBool,
    json: bool,
) -> anyhow::Result<()> {
    let mut exposure_loop = ExposureLoop::new(config.controller, store);
    exposure_loop.run(source, stop)?;
    print_stats(&exposure_loop, json)
}

fn print_stats<S: ExposureStore>(
    exposure_loop: &ExposureLoop<S>,
    json: bool,
) -> anyhow::Result<()> {
    let stats = exposure_loop.stats();
    if json {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        println!(
            "frames {} updates {} held {} invalid {} store failures {} source errors {}",
            stats.frames_processed,
            stats.updates_issued,
            stats.frames_held,
            stats.invalid_frames,
            stats.store_failures,
            stats.source_errors
        );
        println!(
            "integral error {:.3}",
            exposure_loop.controller().integral_error()
        );
    }
    Ok(())
}

fn cmd_default_config(args: &[String]) -> anyhow::Result<()> {
    let path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(ExposureConfig::default_path);
    ExposureConfig::default().save_to_file(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn cmd_version(args: &[String]) -> anyhow::Result<()> {
    let info = crabexposure::get_info();
    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string(&info)?);
    } else {
        println!("{} {}", info.name, info.version);
    }
    Ok(())
}
