//! dcmview command-line front end.

mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use cli::{Args, Command};
use dcmview::config::{ConfigError, ViewerConfig};
use dcmview::data::DecoderRegistry;
use dcmview::format::{DatasetWriter, WriterRegistry};
use dcmview::playback::ManualTicker;
use dcmview::render::export;
use dcmview::state::{DisplayPlan, ViewerSession};
use dcmview::ViewerError;

/// Errors reported by the command line.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Viewer(#[from] ViewerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown output format '{0}'")]
    UnknownFormat(String),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        config.preferences.log_level.to_level_filter()
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig, ConfigError> {
    match path {
        Some(path) => ViewerConfig::load(path),
        None => Ok(ViewerConfig::load_from_default_path().unwrap_or_default()),
    }
}

fn run(args: Args, mut config: ViewerConfig) -> Result<(), AppError> {
    if !args.extensions.is_empty() {
        config.preferences.file_extensions = args.extensions;
    }

    match args.command {
        Command::Config { save } => show_config(&config, args.config.as_deref(), save)?,
        Command::Info { folder } => print_info(&open(config, &folder)?)?,
        Command::Tags {
            folder,
            record,
            filter,
        } => {
            let session = open(config, &folder)?;
            for entry in session.filter_fields(record, &filter)? {
                println!("{}: {}", entry.name, entry.value);
            }
        }
        Command::Summary { folder } => println!("{}", open(config, &folder)?.summary()?),
        Command::Anonymize {
            folder,
            prefix,
            output,
            format,
        } => {
            let mut session = open(config, &folder)?;
            let writers = WriterRegistry::new();
            let writer = select_writer(&writers, &session, format)?;
            let report = session.anonymize(&prefix, &output, writer, &mut rand::thread_rng())?;
            println!(
                "Anonymized {} files into {} ({} fields replaced)",
                report.files.len(),
                output.display(),
                report.replaced_fields
            );
        }
        Command::Render { folder, output } => render(&mut open(config, &folder)?, &output)?,
    }

    Ok(())
}

fn open(config: ViewerConfig, folder: &Path) -> Result<ViewerSession, ViewerError> {
    let mut session = ViewerSession::new(DecoderRegistry::new(), config.preferences);
    session.load_folder(folder)?;
    Ok(session)
}

/// Print the effective configuration; with `save`, write it to `path` or the default location.
fn show_config(config: &ViewerConfig, path: Option<&Path>, save: bool) -> Result<(), ConfigError> {
    println!("{}", config.to_json()?);
    if !save {
        return Ok(());
    }

    match path {
        Some(path) => config.save(path)?,
        None => config.save_to_default_path()?,
    }
    eprintln!(
        "Saved configuration to {}",
        path.map(Path::to_path_buf)
            .or_else(ViewerConfig::default_path)
            .unwrap_or_default()
            .display()
    );
    Ok(())
}

fn print_info(session: &ViewerSession) -> Result<(), ViewerError> {
    let collection = session.collection().ok_or(ViewerError::NoCollection)?;
    println!("Folder:   {}", collection.folder().display());
    println!("Records:  {}", collection.len());
    match session.display_plan()? {
        DisplayPlan::Cine { playback, .. } => {
            println!("Mode:     volume (cine)");
            println!("Frames:   {}", playback.frame_count());
            println!("Interval: {:?}", playback.interval());
        }
        DisplayPlan::Tiles { layout, records } => {
            println!("Mode:     multi-file (tiles)");
            println!("Grid:     {} x {}", layout.rows_for(records.len()), layout.columns());
        }
    }
    println!();
    println!("{}", session.summary()?);
    Ok(())
}

/// Explicit format id, else the writer matching the source files, else JSON.
fn select_writer<'a>(
    writers: &'a WriterRegistry,
    session: &ViewerSession,
    format: Option<String>,
) -> Result<&'a dyn DatasetWriter, AppError> {
    if let Some(id) = format {
        return writers.get(&id).ok_or(AppError::UnknownFormat(id));
    }

    let source_ext = session
        .collection()
        .and_then(|c| c.first().source.as_ref())
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str());

    source_ext
        .and_then(|ext| writers.by_extension(ext))
        .or_else(|| writers.get("json"))
        .ok_or_else(|| AppError::UnknownFormat("json".to_string()))
}

fn render(session: &mut ViewerSession, output: &Path) -> Result<(), ViewerError> {
    let tile_size = session.preferences().tile_size;
    let cine_size = session.preferences().cine_size;

    let playback = match session.display_plan()? {
        DisplayPlan::Cine { playback, .. } => Some(playback),
        DisplayPlan::Tiles { .. } => None,
    };

    let Some(playback) = playback else {
        let tiles = session.tiles()?;
        export::write_contact_sheet(output, &tiles, session.tile_layout(), tile_size)?;
        println!("Wrote {} tiles to {}", tiles.len(), output.display());
        return Ok(());
    };

    // One full loop, starting from the current frame
    let mut frames = Vec::with_capacity(playback.frame_count());
    frames.extend(session.current_frame()?);
    let mut ticks = ManualTicker::new();
    for _ in 1..playback.frame_count() {
        ticks.push(1);
        frames.extend(session.poll_playback(&mut ticks)?);
    }

    let written = export::write_cine_gif(output, frames, playback.interval(), cine_size)?;
    println!("Wrote {} frames to {}", written, output.display());
    Ok(())
}
