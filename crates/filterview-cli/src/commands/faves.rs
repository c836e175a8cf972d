use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use filterview_core::config::PreviewConfig;
use filterview_core::faves::{read_faves, Fave, FavesWriter, ResourcePaths};
use tracing::info;

use crate::summary::print_faves;

#[derive(Args)]
pub struct FavesArgs {
    /// Directory holding the favorites file (defaults to the user config dir)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub action: FavesAction,
}

#[derive(Subcommand)]
pub enum FavesAction {
    /// List the saved favorites
    List,
    /// Save a new favorite
    Add(AddArgs),
    /// Merge favorites from another JSON favorites file
    Import {
        /// JSON file in the favorites format
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Name shown in the filter tree
    pub name: String,

    /// Name of the filter the favorite is based on
    #[arg(long)]
    pub original: String,

    /// Filter command
    #[arg(long)]
    pub command: String,

    /// Preview command (defaults to the filter command)
    #[arg(long)]
    pub preview: Option<String>,

    /// Parameter value, in filter order. Repeatable.
    #[arg(short, long = "param")]
    pub params: Vec<String>,
}

pub fn run(args: &FavesArgs, config: &PreviewConfig) -> Result<()> {
    let override_dir = args.dir.as_deref().or(config.faves_dir.as_deref());
    let paths = ResourcePaths::resolve(override_dir).context("Failed to locate favorites")?;
    let mut model = read_faves(&paths)
        .with_context(|| format!("Failed to read {}", paths.faves_file().display()))?;

    match &args.action {
        FavesAction::List => {
            print_faves(&model, &paths);
            return Ok(());
        }
        FavesAction::Add(add) => {
            let preview = add.preview.clone().unwrap_or_else(|| add.command.clone());
            let fave = Fave::new(&add.name, &add.original, &add.command, preview)
                .with_default_values(add.params.clone());
            let name = model.add(fave);
            println!("Added favorite \"{name}\"");
        }
        FavesAction::Import { file } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let imported: Vec<Fave> = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a favorites file", file.display()))?;
            let count = imported.len();
            for fave in imported {
                let original = fave.name.clone();
                let name = model.add(fave);
                if name != original {
                    info!(from = %original, to = %name, "renamed imported favorite");
                }
            }
            println!("Imported {count} favorites from {}", file.display());
        }
    }

    FavesWriter::new(&model)
        .write_faves(&paths)
        .with_context(|| format!("Failed to save {}", paths.faves_file().display()))?;
    print_faves(&model, &paths);
    Ok(())
}
