//! VectorPad command line front-end.
//!
//! Inspects, validates and exports project files without a window.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use vectorpad_core::{Editor, FileStorage, Storage, save_svg};

/// Inspect and export VectorPad projects
#[derive(Parser, Debug)]
#[command(name = "vectorpad")]
#[command(version, about, long_about = None)]
struct Args {
    /// Editor settings file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print canvas size and shape counts
    Info {
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
    },
    /// Write the project as an SVG image
    ExportSvg {
        #[arg(value_name = "PROJECT")]
        project: PathBuf,

        /// Output file (defaults to the project path with an .svg extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Check that every shape in the project loads
    Validate {
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
    },
    /// List projects in a storage directory
    List {
        /// Storage directory (defaults to the user data directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let report = run(&args)?;
    print!("{report}");
    Ok(())
}

fn run(args: &Args) -> Result<String> {
    let mut editor = match &args.config {
        Some(path) => Editor::from_config_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Editor::new(),
    };

    match &args.command {
        Command::Info { project } => {
            open(&mut editor, project)?;
            info(&editor)
        }
        Command::ExportSvg { project, output } => {
            open(&mut editor, project)?;
            let output = output
                .clone()
                .unwrap_or_else(|| project.with_extension("svg"));
            save_svg(&editor.canvas().document, &output)
                .with_context(|| format!("writing {}", output.display()))?;
            log::info!("exported {}", output.display());
            Ok(format!("Wrote {}\n", output.display()))
        }
        Command::Validate { project } => {
            open(&mut editor, project)?;
            Ok(format!(
                "{}: OK ({} shapes)\n",
                project.display(),
                editor.canvas().document.len()
            ))
        }
        Command::List { dir } => {
            let storage = match dir {
                Some(dir) => FileStorage::new(dir.clone()),
                None => FileStorage::default_location(),
            }
            .context("opening project storage")?;
            let mut out = String::new();
            for id in storage.list()? {
                writeln!(out, "{id}")?;
            }
            Ok(out)
        }
    }
}

/// Load a project file into the editor, validating every record.
fn open(editor: &mut Editor, path: &Path) -> Result<()> {
    let project = FileStorage::load_from_path(path)?;
    editor
        .load_project(&project)
        .with_context(|| format!("invalid project {}", path.display()))?;
    Ok(())
}

fn info(editor: &Editor) -> Result<String> {
    let project = editor.save_project();
    let mut out = String::new();
    writeln!(out, "Canvas: {} x {}", project.canvas_width, project.canvas_height)?;
    writeln!(out, "Shapes: {}", project.shapes.len())?;
    for (kind, count) in project.count_by_kind() {
        if count > 0 {
            writeln!(out, "  {kind}: {count}")?;
        }
    }
    Ok(out)
}
