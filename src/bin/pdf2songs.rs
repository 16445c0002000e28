//! CLI binary for pdf2songs.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExtractionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2songs::{
    extract, extract_to_dir, DuplicatePolicy, ExtractionConfig, ExtractionProgressCallback,
    ExtractionStats, ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-song log
/// lines using [indicatif]. Songs arrive in document order, so no
/// out-of-order bookkeeping is needed.
struct CliProgressCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Count of songs that were skipped or failed.
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically
    /// by `on_run_start` (called once the document has been segmented).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_run_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} songs  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Extracting");
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_songs: usize) {
        self.activate_bar(total_songs);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Found {total_songs} song unit(s)…"))
        ));
    }

    fn on_song_start(&self, index: usize, _total: usize) {
        self.bar.set_message(format!("song {index}"));
    }

    fn on_song_complete(&self, index: usize, total: usize, title: &str, content_len: usize) {
        self.bar.println(format!(
            "  {} Song {:>3}/{:<3}  {:<40}  {}",
            green("✓"),
            index,
            total,
            title,
            dim(&format!("{content_len:>5} chars")),
        ));
        self.bar.inc(1);
    }

    fn on_song_error(&self, index: usize, total: usize, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        let msg = truncate_error(error);

        self.bar.println(format!(
            "  {} Song {:>3}/{:<3}  {}",
            red("✗"),
            index,
            total,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, total_songs: usize, success_count: usize) {
        let failed = total_songs.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} songs extracted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} songs extracted  ({} skipped)",
                if success_count == 0 {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_songs,
                red(&failed.to_string()),
            );
        }
    }
}

/// Truncate very long error messages to keep the per-song log tidy.
///
/// Error text embeds song titles taken straight from the PDF, so the cut
/// must land on a char boundary, never a byte offset.
fn truncate_error(error: &str) -> String {
    match error.char_indices().nth(79) {
        Some((i, _)) if error[i..].chars().count() > 1 => format!("{}\u{2026}", &error[..i]),
        _ => error.to_string(),
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Split a songbook into ./songs/{title}.txt files
  pdf2songs hymnal.pdf

  # Custom output directory and extension
  pdf2songs hymnal.pdf -o ./lyrics --ext song

  # Larger fallback chunks for songbooks with long stanzas
  pdf2songs hymnal.pdf --chunk-size 6

  # Refuse duplicate titles instead of suffixing "(2)"
  pdf2songs hymnal.pdf --on-duplicate error

  # Preview titles without writing any files
  pdf2songs hymnal.pdf --dry-run

  # Structured JSON to stdout (no files written unless -o is used)
  pdf2songs hymnal.pdf --dry-run --json > songs.json

HOW SONGS ARE DETECTED:
  A standalone digit line (a songbook page/index number) starts a new song.
  Within a song, the first non-blank line is the title; CHORUS/REFRAIN and
  VERSE/V2/T2/bare-digit lines label the following block; "Key of X" lines
  are dropped. Songs without any marker lines fall back to fixed-size
  verse chunks (--chunk-size, default 4).

ENVIRONMENT VARIABLES:
  PDF2SONGS_OUTPUT_DIR   Output directory (same as -o)
  PDF2SONGS_EXT          Output file extension (same as --ext)
  PDF2SONGS_CHUNK_SIZE   Fallback chunk size (same as --chunk-size)
"#;

/// Split a PDF songbook into one structured text file per song.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2songs",
    version,
    about = "Split a PDF songbook into one structured text file per song",
    long_about = "Extract every song from a PDF songbook into its own text file. Songs are \
detected at standalone digit lines, titled from their first line, and split into labeled \
verse/chorus blocks from CHORUS/VERSE marker lines (with a fixed-size fallback when a song \
carries no markers).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the songbook PDF.
    input: PathBuf,

    /// Directory for the per-song output files.
    #[arg(short, long, env = "PDF2SONGS_OUTPUT_DIR", default_value = "./songs")]
    output_dir: PathBuf,

    /// File extension (without dot) for output files.
    #[arg(long, env = "PDF2SONGS_EXT", default_value = "txt")]
    ext: String,

    /// Lines per verse when a song has no CHORUS/VERSE markers.
    #[arg(long, env = "PDF2SONGS_CHUNK_SIZE", default_value_t = 4)]
    chunk_size: usize,

    /// What to do when two songs share a sanitised title.
    #[arg(long, value_enum, default_value = "suffix")]
    on_duplicate: DuplicateArg,

    /// Run the pipeline and report, but write no files.
    #[arg(long)]
    dry_run: bool,

    /// Output structured JSON (per-song results + stats) to stdout.
    #[arg(long, env = "PDF2SONGS_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2SONGS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2SONGS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2SONGS_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum DuplicateArg {
    Suffix,
    Overwrite,
    Error,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(v: DuplicateArg) -> Self {
        match v {
            DuplicateArg::Suffix => DuplicatePolicy::Suffix,
            DuplicateArg::Overwrite => DuplicatePolicy::Overwrite,
            DuplicateArg::Error => DuplicatePolicy::Error,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };

    let mut builder = ExtractionConfig::builder()
        .fallback_chunk_size(cli.chunk_size)
        .output_extension(&cli.ext)
        .duplicate_policy(cli.on_duplicate.clone().into());
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run extraction ───────────────────────────────────────────────────
    let output = if cli.dry_run {
        extract(&cli.input, &config).context("Extraction failed")?
    } else {
        extract_to_dir(&cli.input, &cli.output_dir, &config).context("Extraction failed")?
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    }

    // ── Summary ──────────────────────────────────────────────────────────
    if !cli.quiet {
        print_summary(&cli, &output.stats);
    }
    if output.stats.structured_songs == 0 && !cli.quiet {
        eprintln!(
            "{} No songs were extracted. Is this a songbook PDF with standalone \
             page-number lines between songs?",
            cyan("⚠")
        );
    }

    Ok(())
}

/// End-of-run summary line on stderr. The progress callback (when active)
/// already printed the per-song log above it.
fn print_summary(cli: &Cli, stats: &ExtractionStats) {
    if cli.dry_run {
        eprintln!(
            "{}  {}/{} songs structured  {}ms  {}",
            if stats.skipped_songs == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            stats.structured_songs,
            stats.total_units,
            stats.total_duration_ms,
            dim("(dry run, nothing written)"),
        );
        return;
    }

    eprintln!(
        "{}  {} file(s) written  {}ms  →  {}",
        if stats.failed_writes == 0 {
            green("✔")
        } else {
            cyan("⚠")
        },
        stats.written_files,
        stats.total_duration_ms,
        bold(&cli.output_dir.display().to_string()),
    );
    if stats.skipped_songs > 0 || stats.failed_writes > 0 {
        eprintln!(
            "   {} skipped  /  {} write failure(s)",
            dim(&stats.skipped_songs.to_string()),
            red(&stats.failed_writes.to_string()),
        );
    }
}
