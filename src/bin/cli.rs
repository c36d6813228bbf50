// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! ps3d CLI

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use ps3d::{convert_reader, convert_with_config, ConvertConfig, Operator, POSTSCRIPT_POINT_MM};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "ps3d")]
#[command(about = "Compile ps3d drawings into OBJ meshes for 3D printing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./ps3d.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert ps3d files (or directories of them) to OBJ + MTL
    Convert {
        /// Input files or directories; `-` reads stdin
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Mesh output file (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Material output file (single input only)
        #[arg(long)]
        mtl: Option<PathBuf>,

        /// Treat input units as PostScript points and write millimetres
        #[arg(long)]
        millimeters: bool,
    },

    /// Convert in memory and print a JSON summary
    Stats {
        /// Input file; `-` reads stdin
        input: PathBuf,
    },

    /// List the operators with their stack effects
    Operators,

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ConvertConfig::from_file(path)?;
            config.apply_env()?;
            config
        }
        None => ConvertConfig::load()?,
    };

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            mtl,
            millimeters,
        } => {
            if millimeters {
                config.unit_scale = POSTSCRIPT_POINT_MM;
            }
            convert_command(&inputs, output, mtl, &config, cli.verbose)?;
        }
        Commands::Stats { input } => stats_command(&input, &config)?,
        Commands::Operators => {
            for op in Operator::ALL {
                println!("{:<20} {}", op.name().cyan(), op.stack_effect());
            }
        }
        Commands::Version => {
            println!("ps3d v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Expand directories into the `.ps3d` files below them
fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name().into_iter().flatten() {
                let path = entry.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "ps3d") {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

fn default_outputs(input: &Path) -> (PathBuf, PathBuf) {
    if input.as_os_str() == "-" {
        return (PathBuf::from("stdout.obj"), PathBuf::from("stdout.mtl"));
    }
    (input.with_extension("obj"), input.with_extension("mtl"))
}

fn convert_command(
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    mtl: Option<PathBuf>,
    config: &ConvertConfig,
    verbose: bool,
) -> Result<()> {
    let files = collect_inputs(inputs);
    if files.is_empty() {
        bail!("No .ps3d files found");
    }
    if files.len() > 1 && (output.is_some() || mtl.is_some()) {
        bail!("--output and --mtl need exactly one input, got {}", files.len());
    }

    if files.len() == 1 {
        let input = &files[0];
        let (default_obj, default_mtl) = default_outputs(input);
        let mesh_path = output.unwrap_or(default_obj);
        let material_path = mtl.unwrap_or_else(|| {
            if mesh_path == default_outputs(input).0 {
                default_mtl
            } else {
                mesh_path.with_extension("mtl")
            }
        });

        let summary = convert_with_config(input, &mesh_path, &material_path, config)?;
        if verbose {
            println!("Lines: {}", summary.lines);
            println!("Vertices: {}", summary.vertices);
            println!("Faces: {}", summary.faces);
            println!("Materials: {}", summary.materials);
        }
        println!(
            "{} {} -> {}, {}",
            "Converted".green(),
            input.display(),
            mesh_path.display(),
            material_path.display()
        );
        return Ok(());
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failed = 0;
    for input in &files {
        progress.set_message(input.display().to_string());
        let (mesh_path, material_path) = default_outputs(input);
        if let Err(e) = convert_with_config(input, &mesh_path, &material_path, config) {
            failed += 1;
            progress.println(format!("{} {:#}", "Error:".red(), e));
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");

    println!(
        "{} {} converted, {} failed",
        "Summary:".bold(),
        (files.len() - failed).to_string().green(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().green()
        }
    );
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn stats_command(input: &Path, config: &ConvertConfig) -> Result<()> {
    let reader = ps3d::io::open_input(input)?;
    let (summary, _, _) = convert_reader(reader, std::io::sink(), std::io::sink(), "stats.mtl", config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
