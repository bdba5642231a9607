use std::fs::canonicalize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use clap::{Parser, Subcommand};
use notify::{RecursiveMode, Watcher};
use tracing::{debug, error, info, level_filters::LevelFilter, warn};

use presenter::backends::{sdl, Backend as _};
use presenter::config::{self, Config, Geometry};
use presenter::export::{Exporter, Format};
use presenter::render::Fonts;
use presenter::viewer::transition;
use presenter::{parser, Result};

#[derive(Debug, Parser)]
#[command(version)]
/// Show a slideshow in a window, or export it to files.
struct Args {
    #[command(subcommand)]
    command: Command,
    #[arg(short = 'l', long = "log-level", default_value = "INFO", global = true)]
    /// The log level to be used.
    log_level: LevelFilter,
    #[arg(long, global = true)]
    /// Log to stderr instead of the log file in the temporary directory.
    log_stderr: bool,
    #[arg(long, global = true)]
    /// The TrueType font to draw the text with.
    font: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the slides in a window.
    View {
        /// The path to the slides to be shown.
        slide_path: PathBuf,
        #[arg(long)]
        /// Change slides without fading to black.
        no_transitions: bool,
        #[arg(long, default_value_t = transition::DEFAULT_STEP, value_parser = parse_fade_step)]
        /// How much the fade advances on each tick.
        fade_step: f32,
        #[arg(long, default_value_t = 20)]
        /// Milliseconds between two fade ticks.
        fade_period_ms: u64,
        #[arg(long, default_value = "800x600")]
        /// The initial window size.
        window: Geometry,
        #[arg(long)]
        /// Start in fullscreen.
        fullscreen: bool,
        #[arg(long)]
        /// Do not reload the slides when the file changes.
        no_watch: bool,
    },
    /// Render every slide to a file.
    Export {
        /// The path to the slides to be exported.
        slide_path: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Format::Png)]
        format: Format,
        #[arg(short, long)]
        /// Output base name, defaults to the slide file without extension.
        output: Option<PathBuf>,
        #[arg(long)]
        /// Page size, e.g. 1024x768.
        size: Option<Geometry>,
    },
}

fn parse_fade_step(value: &str) -> std::result::Result<f32, String> {
    let step: f32 = value.parse().map_err(|e| format!("`{value}`: {e}"))?;
    if transition::is_valid_step(step) {
        Ok(step)
    } else {
        Err(format!(
            "the fade step must be between {} and {}",
            transition::MIN_STEP,
            transition::OVERSHOOT
        ))
    }
}

/// Whether any of the pending watcher events touches `path`.
fn reload_requested(watcher_rx: &Receiver<notify::Result<notify::Event>>, path: &Path) -> bool {
    let mut requested = false;
    for event in watcher_rx.try_iter() {
        match event {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                if event.paths.iter().any(|p| p.file_name() == path.file_name()) {
                    requested = true;
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {}", e),
        }
    }
    requested
}

fn view(path: &Path, config: Config) -> Result<()> {
    let path = canonicalize(path)?;
    info!("Using file {}", &path.display());
    let presentation = parser::parse_file(&path)?;

    // Editors often replace the file, so watch its folder.
    let (watcher_tx, watcher_rx) = channel();
    let _watcher = if config.watch {
        let folder = path.parent().unwrap_or_else(|| Path::new("."));
        let watcher = notify::recommended_watcher(watcher_tx)
            .and_then(|mut w| w.watch(folder, RecursiveMode::NonRecursive).map(|()| w));
        match watcher {
            Ok(w) => Some(w),
            Err(e) => {
                warn!("Unable to watch {}, no live reload: {}", folder.display(), e);
                None
            }
        }
    } else {
        None
    };

    let title = format!(
        "presenter: {}",
        path.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned())
    );
    let mut backend = sdl::Backend::new(config, &title)?;
    let mut context = backend.get_context(presentation)?;

    // The event loop.
    loop {
        if reload_requested(&watcher_rx, &path) {
            match parser::parse_file(&path) {
                Ok(presentation) => context.set_presentation(presentation),
                // Keep showing the previous slides.
                Err(e) => error!("Error when parsing {}: {}", path.display(), e),
            }
        }
        if context.manage_inputs()? {
            break;
        }
        context.render()?;
    }
    Ok(())
}

fn export(path: &Path, font: &Path, format: Format, output: Option<PathBuf>, size: Option<Geometry>) -> Result<()> {
    let presentation = parser::parse_file(path)?;
    let basename = output.unwrap_or_else(|| path.with_extension(""));
    let geometry = size.map_or_else(|| format.default_geometry(), Geometry::as_tuple);

    let ttf_context = sdl::get_ttf_context()?;
    let fonts = Fonts::new(&ttf_context, font)?;
    let written = Exporter::new(&presentation, &fonts, &basename, geometry).export(format)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let font = config::find_font(args.font.as_deref(), config::FONT_CANDIDATES)?;
    match args.command {
        Command::View {
            slide_path,
            no_transitions,
            fade_step,
            fade_period_ms,
            window,
            fullscreen,
            no_watch,
        } => {
            let mut config = Config::with_font(font);
            config.window.size = window;
            config.window.fullscreen = fullscreen;
            config.presenter.fades = !no_transitions;
            config.presenter.fade_step = fade_step;
            config.fade_period = Duration::from_millis(fade_period_ms);
            config.watch = !no_watch;
            debug!("{:?}", config);
            view(&slide_path, config)
        }
        Command::Export {
            slide_path,
            format,
            output,
            size,
        } => export(&slide_path, &font, format, output, size),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_fade_step() {
        assert_eq!(parse_fade_step("0.1"), Ok(0.1));
        assert_eq!(parse_fade_step("1.1"), Ok(transition::OVERSHOOT));
        assert!(parse_fade_step("0").is_err());
        assert!(parse_fade_step("1e-8").is_err());
        assert!(parse_fade_step("inf").is_err());
        assert!(parse_fade_step("NaN").is_err());
        assert!(parse_fade_step("fast").is_err());
    }

    #[test]
    fn test_cli_refuses_bad_step() {
        let args = Args::try_parse_from(["presenter", "view", "deck.txt", "--fade-step", "inf"]);
        assert!(args.is_err());
        let args = Args::try_parse_from(["presenter", "view", "deck.txt", "--fade-step", "0.25"]).unwrap();
        assert!(matches!(args.command, Command::View { fade_step, .. } if (fade_step - 0.25).abs() < f32::EPSILON));
    }
}

#[doc(hidden)]
fn main() -> ExitCode {
    let args = Args::parse();

    // Init logger.
    let (non_blocking, _guard) = if args.log_stderr {
        tracing_appender::non_blocking(std::io::stderr())
    } else {
        let file_appender = tracing_appender::rolling::hourly(std::env::temp_dir(), "presenter.log");
        tracing_appender::non_blocking(file_appender)
    };
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(non_blocking)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("presenter: {e}");
            ExitCode::FAILURE
        }
    }
}
