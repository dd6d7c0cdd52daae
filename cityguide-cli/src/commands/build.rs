//! `cityguide build` — render every page and publish static assets.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::{ColoredString, Colorize};

use cityguide_build::{pipeline, BuildOptions, BuildReport, SiteLayout, WriteResult};

/// Arguments for `cityguide build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Site root holding `content/`, `templates/` and `static/`.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// YAML content directory [default: <root>/content].
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Template override directory [default: <root>/templates].
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Static asset directory [default: <root>/static].
    #[arg(long = "static")]
    pub static_dir: Option<PathBuf>,

    /// Output directory [default: <root>/dist].
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Show what would be written without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the build report as JSON instead of the human summary.
    #[arg(long)]
    pub json: bool,
}

impl Default for BuildArgs {
    fn default() -> Self {
        BuildArgs {
            root: PathBuf::from("."),
            content: None,
            templates: None,
            static_dir: None,
            out: None,
            dry_run: false,
            json: false,
        }
    }
}

impl BuildArgs {
    /// Conventional layout under `--root`, with each explicit flag taking precedence.
    pub fn layout(&self) -> SiteLayout {
        let defaults = SiteLayout::from_root(&self.root);
        SiteLayout {
            content_dir: self.content.clone().unwrap_or(defaults.content_dir),
            template_dir: self.templates.clone().unwrap_or(defaults.template_dir),
            static_dir: self.static_dir.clone().unwrap_or(defaults.static_dir),
            out_dir: self.out.clone().unwrap_or(defaults.out_dir),
        }
    }

    pub fn run(self) -> Result<()> {
        let layout = self.layout();
        let options = BuildOptions { dry_run: self.dry_run };
        tracing::debug!("resolved layout: {:?}", layout);

        let report = pipeline::run(&layout, &options)
            .with_context(|| format!("build failed for '{}'", self.root.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&layout, &report, self.dry_run);
        }
        Ok(())
    }
}

fn print_report(layout: &SiteLayout, report: &BuildReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let elapsed = report.finished_at - report.started_at;

    println!(
        "{prefix}{} {} ({} written, {} unchanged, {} static files) in {} ms",
        "✓".green().bold(),
        layout.out_dir.display(),
        report.written(),
        report.unchanged(),
        report.assets.files,
        elapsed.num_milliseconds()
    );

    for r in &report.pages {
        println!("  {}  {}", marker(r), r.path().display());
    }
}

fn marker(result: &WriteResult) -> ColoredString {
    match result {
        WriteResult::Written { .. } => "✎".green(),
        WriteResult::WouldWrite { .. } => "~".yellow(),
        WriteResult::Unchanged { .. } => "·".bright_black(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_override_root_layout() {
        let args = BuildArgs {
            root: PathBuf::from("guide"),
            out: Some(PathBuf::from("/tmp/public")),
            ..BuildArgs::default()
        };
        let layout = args.layout();
        assert_eq!(layout.content_dir, PathBuf::from("guide/content"));
        assert_eq!(layout.template_dir, PathBuf::from("guide/templates"));
        assert_eq!(layout.static_dir, PathBuf::from("guide/static"));
        assert_eq!(layout.out_dir, PathBuf::from("/tmp/public"));
    }

    #[test]
    fn default_args_build_current_directory() {
        let layout = BuildArgs::default().layout();
        assert_eq!(layout, SiteLayout::from_root(std::path::Path::new(".")));
    }
}
