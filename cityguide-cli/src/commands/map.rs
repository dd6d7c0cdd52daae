//! `cityguide map` — print the map dataset the map page embeds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cityguide_build::site;
use cityguide_core::loader;

/// Arguments for `cityguide map`.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Site root holding `content/`.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// YAML content directory [default: <root>/content].
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,
}

impl MapArgs {
    pub fn run(self) -> Result<()> {
        let content_dir = self
            .content
            .clone()
            .unwrap_or_else(|| self.root.join("content"));
        let content = loader::load_content_at(&content_dir)
            .with_context(|| format!("could not load content from '{}'", content_dir.display()))?;
        let payload = site::map_payload(&content).context("could not collect map points")?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&payload)?
        } else {
            serde_json::to_string(&payload)?
        };
        println!("{json}");
        Ok(())
    }
}
