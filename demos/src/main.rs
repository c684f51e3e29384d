// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Runs canvas conformance cases and reports PASS/FAIL/TIMEOUT per case.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use canvas2d_core::cases;
use canvas2d_core::harness::{Case, Harness, TestStatus};
use canvas2d_core::loader::json;
use canvas2d_core::OffscreenCanvas;
use clap::Parser;
use log::{info, warn};

#[derive(Debug, Parser)]
#[command(version, about = "Run canvas 2D conformance cases")]
struct Args {
    /// JSON case files to run
    cases: Vec<PathBuf>,

    /// Also run the built-in cases (the default when no files are given)
    #[arg(long)]
    builtin: bool,

    /// Write the final surface of every failing case as PNG into this directory
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Print results as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> anyhow::Result<bool> {
    let mut loaded: Vec<Box<dyn Case>> = Vec::new();
    if args.builtin || args.cases.is_empty() {
        for case in cases::builtin() {
            loaded.push(Box::new(case));
        }
    }
    for path in &args.cases {
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let case =
            json::from_slice(&data).with_context(|| format!("loading {}", path.display()))?;
        loaded.push(Box::new(case));
    }
    if let Some(dir) = &args.dump_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut harness = Harness::new();
    for case in &loaded {
        let canvas = harness.run(case.as_ref());
        let Some(result) = harness.results().last() else {
            continue;
        };
        if args.json {
            println!("{}", serde_json::to_string(result)?);
        } else {
            match &result.message {
                Some(msg) => println!("{} {}: {msg}", result.status, result.name),
                None => println!("{} {}", result.status, result.name),
            }
        }
        if result.status != TestStatus::Pass {
            if let Some(dir) = &args.dump_dir {
                let file = dump(dir, &result.name, &canvas)?;
                warn!("wrote failing surface to {}", file.display());
            }
        }
    }

    let summary = harness.summary();
    info!(
        "{} passed, {} failed, {} timed out",
        summary.pass, summary.fail, summary.timeout
    );
    Ok(summary.all_passed())
}

fn dump(dir: &Path, name: &str, canvas: &OffscreenCanvas) -> anyhow::Result<PathBuf> {
    let file_name: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect();
    let path = dir.join(format!("{file_name}.png"));
    let png = canvas.surface().to_png()?;
    fs::write(&path, png).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
