use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    /// Diagnostic verbosity (written to stderr).
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a page description and print a summary.
    Check(CheckArgs),
    /// Run a page session headlessly and write per-frame snapshots as JSON.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Optional event script JSON.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Simulated seconds.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Snapshots per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_page_json(path: &Path) -> anyhow::Result<folio::PageConfig> {
    let f = File::open(path).with_context(|| format!("open page '{}'", path.display()))?;
    let page: folio::PageConfig =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse page JSON")?;
    page.validate().with_context(|| format!("validate page '{}'", path.display()))?;
    Ok(page)
}

fn read_script_json(path: &Path) -> anyhow::Result<folio::Script> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let script: folio::Script =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse script JSON")?;
    script
        .validate()
        .with_context(|| format!("validate script '{}'", path.display()))?;
    Ok(script)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let page = read_page_json(&args.in_path)?;
    let reveals: usize = page.sections.iter().map(|s| s.reveals.len()).sum();
    let idle: usize = page.sections.iter().map(|s| s.idle.len()).sum();
    println!(
        "ok: {} sections, {} reveal groups, {} idle groups, {} intro entries",
        page.sections.len(),
        reveals,
        idle,
        page.intro.len()
    );
    for s in &page.sections {
        if let Some(c) = &s.carousel {
            println!(
                "carousel '{}': {} slides every {}s",
                s.id,
                c.slides.len(),
                c.opts.interval_secs
            );
        }
        if let Some(f) = &s.form {
            println!("form '{}': {} fields", s.id, f.fields.len());
        }
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !args.duration.is_finite() || args.duration < 0.0 {
        anyhow::bail!("--duration must be finite and >= 0");
    }
    let page = read_page_json(&args.in_path)?;
    let script = match &args.script {
        Some(p) => read_script_json(p)?,
        None => folio::Script::default(),
    };
    let fps = folio::Fps::new(args.fps, 1)?;
    let frames = fps.secs_to_frames_floor(args.duration) + 1;
    let range = folio::FrameRange::new(folio::FrameIndex(0), folio::FrameIndex(frames))?;

    let mut session = folio::PageSession::new(page)?;
    let snapshots = folio::run_script(&mut session, &script, range, fps)?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &snapshots)
                .with_context(|| "serialize snapshots")?;
            w.flush().with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {} snapshots to {}", snapshots.len(), out.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &snapshots)
                .with_context(|| "serialize snapshots")?;
            writeln!(w)?;
        }
    }
    Ok(())
}
