//! Demo: triggered analysis of WAV recordings
//!
//! Usage:
//!   cargo run --release --example analyze_wav -- [--jobs N] [--json] [--block N] [--onset-db DB] <file1.wav> ...
//!
//! Notes:
//! - Stereo and wider files: channel 0 is the signal, channel 1 the trigger.
//! - Mono files are self-triggered from their energy-flux onsets.
//! - Parallelism is across files. Each file is still streamed through one engine.

use rayon::prelude::*;
use std::env;
use std::time::Instant;
use stratum_trig::preprocessing::channels::split_signal_and_trigger;
use stratum_trig::{analyze_self_triggered, analyze_triggered, AnalysisSnapshot, EngineConfig};

fn read_wav(path: &str) -> Result<(Vec<f32>, usize, u32), Box<dyn std::error::Error + Send + Sync>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok((samples, spec.channels as usize, spec.sample_rate))
}

struct Options {
    block_size: usize,
    onset_db: f32,
}

struct FileOut {
    path: String,
    self_triggered: bool,
    snapshots: Vec<AnalysisSnapshot>,
    processing_ms: f32,
}

fn analyze_file(
    path: &str,
    options: &Options,
) -> Result<FileOut, Box<dyn std::error::Error + Send + Sync>> {
    let t0 = Instant::now();
    let (samples, channels, sample_rate) = read_wav(path)?;
    let config = EngineConfig::default();

    let (snapshots, self_triggered) = if channels >= 2 {
        let (signal, trigger) = split_signal_and_trigger(&samples, channels)?;
        let snaps = analyze_triggered(&signal, &trigger, sample_rate as f32, options.block_size, config)?;
        (snaps, false)
    } else {
        let snaps = analyze_self_triggered(
            &samples,
            sample_rate as f32,
            options.block_size,
            options.onset_db,
            config,
        )?;
        (snaps, true)
    };

    Ok(FileOut {
        path: path.to_string(),
        self_triggered,
        snapshots,
        processing_ms: t0.elapsed().as_secs_f32() * 1000.0,
    })
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut options = Options {
        block_size: 64,
        onset_db: -20.0,
    };
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--block" => {
                let v = args
                    .first()
                    .ok_or("--block requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                options.block_size = std::cmp::max(1, v);
            }
            "--onset-db" => {
                let v = args
                    .first()
                    .ok_or("--onset-db requires a value")?
                    .parse::<f32>()?;
                args.remove(0);
                options.onset_db = v;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_wav [--jobs N] [--json] [--block N] [--onset-db DB] <file1.wav> ...\n\
                     \n\
                     --jobs N       Parallel workers (default: CPU-1)\n\
                     --json         Emit one JSON object per firing (JSONL)\n\
                     --block N      Host block size in samples (default: 64)\n\
                     --onset-db DB  Onset threshold for mono files (default: -20)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one WAV file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<(String, Result<FileOut, String>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let out = analyze_file(path, &options).map_err(|e| e.to_string());
                (path.clone(), out)
            })
            .collect()
    });

    let mut ok = 0usize;
    for (idx, (path, out)) in outs.iter().enumerate() {
        match out {
            Ok(o) => {
                ok += 1;
                if json {
                    for snap in &o.snapshots {
                        let line = serde_json::json!({
                            "file": o.path,
                            "self_triggered": o.self_triggered,
                            "sample_index": snap.info.sample_index,
                            "sample_rate": snap.info.sample_rate,
                            "centroid_hz": snap.centroid_hz,
                            "peak_bin": snap.peak_bin(),
                            "dominant_band": snap.dominant_band(),
                            "band_magnitudes": snap.band_magnitudes,
                        });
                        println!("{}", line);
                    }
                } else {
                    println!(
                        "[{}/{}] {}: {} firings{} time={:.2}ms",
                        idx + 1,
                        outs.len(),
                        o.path,
                        o.snapshots.len(),
                        if o.self_triggered { " (self-triggered)" } else { "" },
                        o.processing_ms
                    );
                    for snap in &o.snapshots {
                        println!(
                            "    sample {:>10}  centroid {:>8.1} Hz  peak bin {:?}",
                            snap.info.sample_index,
                            snap.centroid_hz,
                            snap.peak_bin()
                        );
                    }
                }
            }
            Err(e) => {
                if json {
                    println!("{}", serde_json::json!({ "file": path, "error": e }));
                } else {
                    println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), path, e);
                }
            }
        }
    }

    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
