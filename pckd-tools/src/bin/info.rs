#![warn(clippy::all)]

use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::{App, Arg};
use log::{info, warn};
use pckd_core::{
    containers::MergedGeometryBuffer,
    math::AABB,
    nalgebra::Vector4,
};
use pckd_io::base::{geometry_name_for_path, open_file, GeometryReader};

struct Args {
    pub input_file: PathBuf,
    pub detailed: bool,
}

fn get_args() -> Result<Args> {
    let matches = App::new("pckd info")
        .version("0.1")
        .about("Prints information about the given PCKD point cloud container")
        .arg(
            Arg::with_name("INPUT")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("INPUT")
                .help("Input .pckd file")
                .required(true),
        )
        .arg(
            Arg::with_name("DETAILED")
                .short("d")
                .long("detailed")
                .help("Decode all sub-clouds and print bounds and color ranges for every partition"),
        )
        .get_matches();

    let input_file = PathBuf::from(matches.value_of("INPUT").unwrap());
    let detailed = matches.is_present("DETAILED");

    Ok(Args {
        input_file,
        detailed,
    })
}

fn format_bounds(bounds: Option<AABB<f32>>) -> String {
    match bounds {
        Some(bounds) => format!(
            "({}, {}, {})  ({}, {}, {})",
            bounds.min().x,
            bounds.min().y,
            bounds.min().z,
            bounds.max().x,
            bounds.max().y,
            bounds.max().z
        ),
        None => "-".into(),
    }
}

fn color_range(colors: &[Vector4<u8>]) -> Option<(Vector4<u8>, Vector4<u8>)> {
    let first = *colors.first()?;
    Some(colors.iter().fold((first, first), |(min, max), color| {
        (min.inf(color), max.sup(color))
    }))
}

fn analyze_buffer(buffer: &MergedGeometryBuffer) {
    println!("Partitions");
    for (idx, partition) in buffer.partitions().iter().enumerate() {
        println!(
            "\t[{}] start: {:<10} count: {:<10} bounds: {}",
            idx,
            partition.start_index,
            partition.count,
            format_bounds(buffer.partition_bounds(idx))
        );
        if let Some((min, max)) = buffer.partition_colors(idx).and_then(color_range) {
            println!(
                "\t     Color R: {}  {}  G: {}  {}  B: {}  {}",
                min.x, max.x, min.y, max.y, min.z, max.z
            );
        }
    }
    println!("Bounds: {}", format_bounds(buffer.bounds()));

    let empty_partitions = buffer.partition_count() - buffer.non_empty_partitions().count();
    if empty_partitions > 0 {
        warn!(
            "{} of {} partitions are empty",
            empty_partitions,
            buffer.partition_count()
        );
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = get_args()?;

    let mut reader = open_file(&args.input_file)?;
    println!("pckd info report for {}", args.input_file.display());
    println!("{}", reader.metadata());

    if args.detailed {
        let t_start = Instant::now();
        let buffer = reader
            .read_geometry(&geometry_name_for_path(&args.input_file))
            .with_context(|| format!("Failed decoding {}", args.input_file.display()))?;
        info!(
            "Decoded {} points in {:.2}s",
            buffer.vertex_count(),
            t_start.elapsed().as_secs_f64()
        );
        analyze_buffer(&buffer);
    }

    Ok(())
}
