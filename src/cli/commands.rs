// CLI command implementations
use anyhow::Context;
use crossbeam_channel::{bounded, unbounded};
use mp3info::{scan_file, Mp3Info, ScanOptions, ScanPolicy};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;

use super::output::{format_duration, OutputFormatter, ProgressBar};
use super::CliResult;

/// Scan files and write each result. Returns the number of failures.
pub fn command_scan(
    files: &[PathBuf],
    output: Option<&Path>,
    policy: ScanPolicy,
    options: &ScanOptions,
    formatter: &OutputFormatter,
) -> CliResult<usize> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let mut failures = 0;
    for path in files {
        match scan_file(path, policy, options) {
            Ok(info) => formatter.output_info(&info, &mut writer)?,
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
            }
        }
    }

    writer.flush()?;
    Ok(failures)
}

/// Print a human-readable summary per file. Returns the number of failures.
pub fn command_info(
    files: &[PathBuf],
    detailed: bool,
    policy: ScanPolicy,
    options: &ScanOptions,
    formatter: &OutputFormatter,
) -> CliResult<usize> {
    let mut failures = 0;

    for path in files {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
                continue;
            }
        };

        let info = match scan_file(path, policy, options) {
            Ok(info) => info,
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
                continue;
            }
        };

        println!("\n📁 {}", path.display());
        println!("{}", "─".repeat(60));
        println!("Size: {} bytes", metadata.len());
        if let Ok(modified) = metadata.modified() {
            let date: chrono::DateTime<chrono::Utc> = modified.into();
            println!("Modified: {}", date.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        print_stream(&info);

        if detailed {
            print_header_details(&info);
        }
    }

    Ok(failures)
}

fn print_stream(info: &Mp3Info) {
    let header = &info.header;
    println!(
        "Stream: {} {}, {} Hz, {:?}",
        header.version, header.layer, header.sample_rate, header.mode
    );
    println!(
        "Bitrate: {} kbps{}",
        info.bitrate,
        if info.vbr { " (VBR)" } else { "" }
    );
    match info.duration_secs {
        Some(secs) => println!("Length: {} ({:.2} s)", format_duration(secs), secs),
        None => println!("Length: unknown"),
    }

    let tag = &info.id3;
    if !tag.is_empty() {
        println!("Title: {}", tag.title);
        println!("Artist: {}", tag.artist);
        println!("Album: {}", tag.album);
        println!("Year: {}", tag.year);
        if !tag.comment.is_empty() {
            println!("Comment: {}", tag.comment);
        }
        if let Some(track) = tag.track {
            println!("Track: {}", track);
        }
    }
}

fn print_header_details(info: &Mp3Info) {
    let header = &info.header;
    println!("\nDetailed Information:");
    println!("First frame at: {}", info.data_offset);
    if let Some(frames) = info.frames {
        println!("Frames: {}", frames);
    }
    println!("Bad frames: {}", info.bad_frames);
    println!("Frame length: {} bytes", header.frame_length());
    println!("Frame duration: {:.2} ms", header.duration() * 1000.0);
    println!("CRC: {}", header.crc);
    println!("Padding: {}", header.padding);
    println!("Private: {}", header.private);
    println!("Mode extension: {}", header.mode_extension);
    println!("Copyright: {}", header.copyright);
    println!("Original: {}", header.original);
    println!("Emphasis: {:?}", header.emphasis);
}

/// Scan every file matching `pattern` under `directory` on a pool of
/// `jobs` workers. Returns the number of failures.
pub fn command_batch(
    directory: &str,
    pattern: &str,
    jobs: usize,
    policy: ScanPolicy,
    options: &ScanOptions,
    formatter: &OutputFormatter,
) -> CliResult<usize> {
    let files = find_files(directory, pattern, formatter)?;
    let total = files.len();
    if total == 0 {
        formatter.print_info("No files found matching pattern");
        return Ok(0);
    }

    formatter.print_info(&format!("Processing {} files...", total));

    let (job_tx, job_rx) = bounded::<(usize, PathBuf)>(jobs.max(1) * 2);
    let (result_tx, result_rx) = unbounded();

    let mut results: Vec<Option<(PathBuf, mp3info::Result<Mp3Info>)>> =
        (0..total).map(|_| None).collect();

    thread::scope(|scope| {
        for _ in 0..jobs.max(1) {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, path) in job_rx {
                    let result = scan_file(&path, policy, options);
                    if result_tx.send((index, path, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        scope.spawn(move || {
            for job in files.into_iter().enumerate() {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        let mut progress = ProgressBar::new(total, !formatter.quiet);
        for (index, path, result) in result_rx {
            results[index] = Some((path, result));
            progress.increment();
        }
    });

    let mut stdout = std::io::stdout();
    let mut failures = 0;
    let mut total_secs = 0.0;
    for (path, result) in results.into_iter().flatten() {
        match result {
            Ok(info) => {
                total_secs += info.duration_secs.unwrap_or(0.0);
                if formatter.quiet {
                    continue;
                }
                formatter.print_success(&path.display().to_string());
                formatter.output_info(&info, &mut stdout)?;
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
            }
        }
    }

    formatter.print_info(&format!(
        "Completed: {} successful, {} errors, total length {}",
        total - failures,
        failures,
        format_duration(total_secs)
    ));

    Ok(failures)
}

fn find_files(
    directory: &str,
    pattern: &str,
    formatter: &OutputFormatter,
) -> CliResult<Vec<PathBuf>> {
    let glob_pattern = if pattern.contains('/') {
        format!("{}/{}", directory, pattern)
    } else {
        format!("{}/**/{}", directory, pattern)
    };

    let mut files = Vec::new();
    for entry in glob::glob(&glob_pattern).context("invalid glob pattern")? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("Error reading path: {}", e)),
        }
    }
    Ok(files)
}
