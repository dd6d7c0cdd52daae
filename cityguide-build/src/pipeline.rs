//! Build pipeline entrypoint used by the CLI.
//!
//! load content → ensure output dir → publish assets → plan pages →
//! render + write each page. The first error aborts the build; pages written
//! before the failure stay on disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use cityguide_core::{loader, GuideContent};
use cityguide_renderer::{Page, PageRenderer, TemplateEngine};

use crate::assets::{publish_assets, PublishReport};
use crate::error::{io_err, BuildError};
use crate::site;
use crate::writer::{write_page, WriteResult};

/// Input and output directories of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub content_dir: PathBuf,
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl SiteLayout {
    /// `<root>/content`, `<root>/templates`, `<root>/static`, `<root>/dist`.
    pub fn from_root(root: &Path) -> Self {
        SiteLayout {
            content_dir: root.join("content"),
            template_dir: root.join("templates"),
            static_dir: root.join("static"),
            out_dir: root.join("dist"),
        }
    }
}

/// Knobs for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Render everything but write nothing.
    pub dry_run: bool,
}

/// Outcome of a successful build.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub assets: PublishReport,
    /// One entry per page, in build order.
    pub pages: Vec<WriteResult>,
}

impl BuildReport {
    /// Pages written, or that would be written in dry-run mode.
    pub fn written(&self) -> usize {
        self.pages
            .iter()
            .filter(|r| matches!(r, WriteResult::Written { .. } | WriteResult::WouldWrite { .. }))
            .count()
    }

    pub fn unchanged(&self) -> usize {
        self.pages
            .iter()
            .filter(|r| matches!(r, WriteResult::Unchanged { .. }))
            .count()
    }
}

/// Render every page of `content` with `renderer`, handing each result to
/// `emit` as soon as it is ready. Stops at the first error.
///
/// Returns the number of pages rendered. Touches no files by itself.
pub fn render_site<R, F>(
    content: &GuideContent,
    renderer: &R,
    mut emit: F,
) -> Result<usize, BuildError>
where
    R: PageRenderer + ?Sized,
    F: FnMut(&Page, String) -> Result<(), BuildError>,
{
    let pages = site::plan_pages(content)?;
    for page in &pages {
        let html = renderer.render_page(page)?;
        emit(page, html)?;
    }
    Ok(pages.len())
}

/// Run the whole build for `layout`.
pub fn run(layout: &SiteLayout, options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let started_at = Utc::now();
    let dry_run = options.dry_run;

    tracing::info!("loading content from {}", layout.content_dir.display());
    let content = loader::load_content_at(&layout.content_dir)?;

    let engine = TemplateEngine::new(Some(&layout.template_dir))?;

    if !dry_run {
        std::fs::create_dir_all(&layout.out_dir).map_err(|e| io_err(&layout.out_dir, e))?;
    }

    let assets = publish_assets(&layout.static_dir, &layout.out_dir, dry_run)?;

    let mut pages = Vec::new();
    let count = render_site(&content, &engine, |page, html| {
        let path = layout.out_dir.join(&page.output);
        pages.push(write_page(&path, &html, dry_run)?);
        Ok(())
    })?;

    let report = BuildReport {
        started_at,
        finished_at: Utc::now(),
        assets,
        pages,
    };
    tracing::info!(
        "built {} pages ({} written, {} unchanged) into {}",
        count,
        report.written(),
        report.unchanged(),
        layout.out_dir.display()
    );
    Ok(report)
}
