/*!
 * Command-line interface for treeclip
 */

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use treeclip::config::{Args, Config, LogLevel};
use treeclip::error::Result;
use treeclip::report::{ReportFormat, Reporter};
use treeclip::{Assembler, Clipboard, Delivery, Scanner, SystemClipboard};

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.log_level);
    debug!("Parsed CLI arguments: {args:?}");

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(Config::from_args(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(level: LogLevel) {
    if let Some(level) = level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {pos} files {wide_msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));

    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()));
    let scanned = scanner.scan()?;
    progress.finish_and_clear();

    let assembly = Assembler::new(&scanned.base_dir).assemble(&scanned.files);
    let stats = assembly.statistics;

    if config.to_stdout {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        out.write_all(assembly.buffer.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    if config.show_tree {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        assembly.root.write_to(&mut out)?;
        out.flush()?;
    }

    let clipboard = SystemClipboard::detect()?;
    debug!("Clipboard provider: {:?}", clipboard.provider());
    deliver(&clipboard, &config, &assembly.buffer)?;

    if config.chat_mode {
        println!(
            "All sections copied! (Total files: {}, Total lines: {}, Total Characters: {})",
            stats.files_processed, stats.total_lines, stats.total_chars
        );
        Reporter::new(ReportFormat::ConsoleTable).print_report(&stats);
    } else {
        println!(
            "Copied Dir Tree and {} files to clipboard",
            stats.files_processed
        );
        Reporter::new(ReportFormat::Line).print_report(&stats);
    }

    Ok(())
}

fn deliver(clipboard: &dyn Clipboard, config: &Config, text: &str) -> Result<()> {
    let delivery = Delivery::new(clipboard);
    if !config.chat_mode {
        return delivery.copy_all(text);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = delivery.copy_sections(text, config.section_size, &mut input, &mut out)?;
    if !outcome.is_complete() {
        treeclip::bail!(
            Delivery,
            "stopped after {} of {} sections",
            outcome.delivered,
            outcome.total
        );
    }
    Ok(())
}
