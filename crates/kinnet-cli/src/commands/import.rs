//! Import command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use kinnet_storage::{standard_codes, KinshipDataset, StorageBackend};

use crate::{AppContext, Cli};

#[derive(Args)]
pub struct ImportArgs {
    /// Input file (JSON with "codes", "persons" and "edges" arrays)
    pub file: PathBuf,

    /// Also load the built-in kinship code table
    #[arg(long)]
    pub standard_codes: bool,
}

pub async fn run(args: &ImportArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::info!("Importing from {:?}", args.file);

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let mut dataset: KinshipDataset = serde_json::from_str(&content)
        .with_context(|| format!("Invalid kinship dataset in {}", args.file.display()))?;

    if args.standard_codes {
        // codes from the file replace built-in ones with the same number
        let mut codes = standard_codes();
        codes.append(&mut dataset.codes);
        dataset.codes = codes;
    }

    let before = ctx.storage.edge_count().await?;
    ctx.storage.save_dataset(&dataset).await?;
    let after = ctx.storage.edge_count().await?;

    if !cli.quiet {
        println!(
            "Imported {} codes, {} persons and {} kinship rows ({} new) from {:?}",
            dataset.codes.len(),
            dataset.persons.len(),
            dataset.edges.len(),
            after.saturating_sub(before),
            args.file
        );
    }
    Ok(())
}
