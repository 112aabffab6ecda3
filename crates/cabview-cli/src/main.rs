//! cabview CLI - load and inspect arcade cabinet skins
//!
//! Checks description files, loads whole cabinets against an asset library
//! and prints what the binder did.

use anyhow::{Context, Result};
use cabview::{AssetLibrary, Category, LibraryManifest, Viewer};
use cabview_ir::Data;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cabview")]
#[command(about = "Arcade cabinet skin loader and inspector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a description.yaml and report problems
    Check {
        /// Path to the description file
        file: PathBuf,
    },
    /// Display the contents of a description.yaml
    Info {
        /// Path to the description file
        file: PathBuf,
    },
    /// Load a cabinet folder or zip and bind it
    Load {
        /// Cabinet folder or .zip archive
        path: PathBuf,
        /// Asset library manifest merged over the built-in assets
        #[arg(short, long)]
        library: Option<PathBuf>,
        /// Hide the blocker parts after loading
        #[arg(long)]
        hide_blockers: bool,
    },
    /// List the assets a cabinet can refer to
    Library {
        /// Asset library manifest merged over the built-in assets
        #[arg(short, long)]
        library: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => check(&file)?,
        Commands::Info { file } => show_info(&file)?,
        Commands::Load {
            path,
            library,
            hide_blockers,
        } => load(&path, library.as_deref(), hide_blockers)?,
        Commands::Library { library } => list_library(library.as_deref())?,
    }

    Ok(())
}

fn read_description(file: &Path) -> Result<Data> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    Ok(Data::from_yaml(&text)?)
}

fn build_library(manifest: Option<&Path>) -> Result<AssetLibrary> {
    match manifest {
        Some(path) => {
            let manifest = LibraryManifest::load(path)
                .with_context(|| format!("loading library {}", path.display()))?;
            Ok(manifest.apply_to_builtin()?)
        }
        None => Ok(AssetLibrary::builtin()),
    }
}

fn check(file: &Path) -> Result<()> {
    let data = read_description(file)?;
    let issues = data.validate();
    if issues.is_empty() {
        println!("{}: OK ({} parts)", file.display(), data.part_count());
        return Ok(());
    }
    println!("{}: {} issue(s)", file.display(), issues.len());
    for issue in &issues {
        println!("  - {}", issue);
    }
    Ok(())
}

fn show_info(file: &Path) -> Result<()> {
    let data = read_description(file)?;

    println!("Cabinet description: {}", file.display());
    println!("  Name: {}", data.name.as_deref().unwrap_or("unnamed"));
    if let Some(game) = &data.game {
        println!("  Game: {}", game);
    }
    if let Some(year) = data.year {
        println!("  Year: {}", year);
    }
    let roms = data.roms_or_rom();
    if !roms.is_empty() {
        println!("  ROMs: {}", roms.join(", "));
    }
    match data.model_source() {
        Some(cabview_ir::ModelSource::File(f)) => println!("  Model: {}", f),
        Some(cabview_ir::ModelSource::Style(s)) => println!("  Model style: {}", s),
        None => println!("  Model: none"),
    }
    if let Some(material) = data.material_name() {
        println!("  Material: {}", material);
    }
    if let Some(orientation) = data.crt.as_ref().and_then(|c| c.orientation()) {
        println!("  CRT: {:?}", orientation);
    }

    if !data.parts.is_empty() {
        println!("\nParts:");
        for (i, part) in data.parts.iter().enumerate() {
            let material = part.material_name().unwrap_or("-");
            println!(
                "  {}: {} ({}, material: {})",
                i + 1,
                part.name,
                part.kind,
                material
            );
        }
    }

    Ok(())
}

fn load(path: &Path, manifest: Option<&Path>, hide_blockers: bool) -> Result<()> {
    let library = build_library(manifest)?;
    let mut viewer = Viewer::new(library);

    if path.is_dir() {
        viewer.load_from_folder(path)?;
    } else {
        viewer.load_from_zip(path)?;
    }
    if hide_blockers {
        let hidden = viewer.toggle_blockers(Some(false));
        log::info!("Hid {} blocker(s)", hidden);
    }

    let Some(cabinet) = viewer.current() else {
        anyhow::bail!("no cabinet loaded from {}", path.display());
    };
    println!("{}", cabinet.details());

    if !cabinet.diagnostics.is_empty() {
        println!("\nDiagnostics:");
        for d in &cabinet.diagnostics {
            println!("  - {}", d);
        }
    }

    Ok(())
}

fn list_library(manifest: Option<&Path>) -> Result<()> {
    let library = build_library(manifest)?;
    println!("Asset library: {} entries", library.len());
    for category in Category::ALL {
        let names = library.names(category);
        println!(
            "\n{} (default: {}):",
            category,
            match category.default_name() {
                "" => "none",
                d => d,
            }
        );
        for name in names {
            println!("  {}", name);
        }
    }
    Ok(())
}
