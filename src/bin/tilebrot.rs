// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate log;
extern crate num_cpus;
extern crate tilebrot;

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::{error, info, warn};
use std::str::FromStr;
use std::time::Instant;

use tilebrot::parse::{parse_rect, parse_size};
use tilebrot::planes::{DEFAULT_ESCAPE_RADIUS, DEFAULT_MAX_ITERATIONS};
use tilebrot::tiles::tile_count;
use tilebrot::{
    write_png, Framebuffer, IntegralPlane, LogProgress, Progress, Quiet, RenderConfig,
    TileScheduler,
};

fn validate_at_least<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const RECT: &str = "rect";
const TASKS: &str = "tasks";
const GRANULARITY: &str = "granularity";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "escape-radius";
const QUIET: &str = "quiet";

fn args<'a>() -> ArgMatches<'a> {
    App::new("tilebrot")
        .version("0.1.0")
        .about("Tiled escape-time fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("tilebrot.png")
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("640x640")
                .validator(|s| match parse_size(&s) {
                    Some((w, h)) if w > 0 && h > 0 => Ok(()),
                    Some(_) => Err("Image size must be at least 1x1".to_string()),
                    None => Err("Could not parse output image size".to_string()),
                })
                .help("Size of output image, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(RECT)
                .long(RECT)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2:2:-2:2")
                .validator(|s| match parse_rect(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse plane rectangle".to_string()),
                })
                .help("Window of the complex plane, REMIN:REMAX:IMMIN:IMMAX"),
        )
        .arg(
            Arg::with_name(TASKS)
                .long(TASKS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_at_least(
                        &s,
                        1usize,
                        "Could not parse task count",
                        "Task count must be at least 1",
                    )
                })
                .help("Number of worker threads"),
        )
        .arg(
            Arg::with_name(GRANULARITY)
                .long(GRANULARITY)
                .short("g")
                .takes_value(true)
                .validator(|s| {
                    validate_at_least(
                        &s,
                        1usize,
                        "Could not parse granularity",
                        "Granularity must be at least 1",
                    )
                })
                .help("Tile divisions per axis [default: the task count]"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .validator(|s| {
                    validate_at_least(
                        &s,
                        1usize,
                        "Could not parse iteration count",
                        "Iteration count must be at least 1",
                    )
                })
                .help("Iteration cap per pixel [default: 700]"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .long(RADIUS)
                .short("e")
                .takes_value(true)
                .validator(|s| match f64::from_str(&s) {
                    Ok(r) if r > 0.0 => Ok(()),
                    Ok(_) => Err("Escape radius must be positive".to_string()),
                    Err(_) => Err("Could not parse escape radius".to_string()),
                })
                .help("Magnitude at which an orbit counts as escaped [default: 50]"),
        )
        .arg(
            Arg::with_name(QUIET)
                .long(QUIET)
                .short("q")
                .help("Only log warnings and errors"),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for --{}", name))?;
    T::from_str(raw).map_err(|_| format_err!("Could not parse --{} value {:?}", name, raw))
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(parse_size)
        .ok_or_else(|| format_err!("Error parsing image dimensions"))?;
    let plane = matches
        .value_of(RECT)
        .and_then(parse_rect)
        .ok_or_else(|| format_err!("Error parsing plane rectangle"))?;
    let tasks: usize = value(matches, TASKS)?;
    let granularity: usize = match matches.value_of(GRANULARITY) {
        Some(_) => value(matches, GRANULARITY)?,
        None => tasks,
    };
    let iterations: usize = match matches.value_of(ITERATIONS) {
        Some(_) => value(matches, ITERATIONS)?,
        None => DEFAULT_MAX_ITERATIONS,
    };
    let radius: f64 = match matches.value_of(RADIUS) {
        Some(_) => value(matches, RADIUS)?,
        None => DEFAULT_ESCAPE_RADIUS,
    };
    let output = matches.value_of(OUTPUT).unwrap_or("tilebrot.png");

    let config = RenderConfig::new(IntegralPlane(width, height), plane, iterations, radius)?;
    let scheduler = TileScheduler::new(granularity, tasks)?;

    let cpus = num_cpus::get();
    info!("Available CPUs: {}", cpus);
    info!("Workers used in current run: {}", tasks);
    info!(
        "Rendering {}x{} ({} pixels) in {} tiles",
        config.width(),
        config.height(),
        config.pixel_count(),
        tile_count(width, height, granularity)
    );
    if tasks > cpus {
        warn!("{} workers requested but only {} CPUs available", tasks, cpus);
    }

    let progress: &dyn Progress = if matches.is_present(QUIET) {
        &Quiet
    } else {
        &LogProgress
    };

    let framebuffer = Framebuffer::for_config(&config);
    scheduler.render_with_progress(&framebuffer, &config, progress)?;

    let started = Instant::now();
    write_png(output, &framebuffer)?;
    info!("Wrote {} in {:?}", output, started.elapsed());
    Ok(())
}

fn main() {
    let matches = args();
    let level = if matches.is_present(QUIET) { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(&matches) {
        error!("Render failure: {}", e);
        std::process::exit(1);
    }
}
