//! Tera rendering engine — [`PageTemplate`] enum and [`TemplateEngine`].
//!
//! # Templates
//!
//! | Template            | Page(s)                                   |
//! |---------------------|-------------------------------------------|
//! | `index.html`        | home                                      |
//! | `schedule.html`     | trip schedule                             |
//! | `map.html`          | interactive map                           |
//! | `food_typical.html` | typical food                              |
//! | `phrases.html`      | useful phrases                            |
//! | `history.html`      | city history                              |
//! | `agenda.html`       | cultural agenda                           |
//! | `list.html`         | one per collection (`<collection>/index.html`) |
//! | `detail.html`       | one per record (`<collection>/<id>.html`) |
//!
//! All of them extend `_layout.html`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::Page;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("_layout.html", include_str!("templates/_layout.html")),
    ("index.html", include_str!("templates/index.html")),
    ("schedule.html", include_str!("templates/schedule.html")),
    ("map.html", include_str!("templates/map.html")),
    ("food_typical.html", include_str!("templates/food_typical.html")),
    ("phrases.html", include_str!("templates/phrases.html")),
    ("history.html", include_str!("templates/history.html")),
    ("agenda.html", include_str!("templates/agenda.html")),
    ("list.html", include_str!("templates/list.html")),
    ("detail.html", include_str!("templates/detail.html")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

/// Tera name of a template file: its path relative to the template dir, with
/// `/` separators. Case is kept, so `Detail.html` never shadows `detail.html`.
fn template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    files.sort();
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("html") {
            continue;
        }
        let rel = path
            .strip_prefix(dir)
            .unwrap_or(path.as_path());
        let name = template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert((*name).to_string(), (*content).to_string());
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    // Tera::default() autoescapes names ending in .html.
    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// PageTemplate
// ---------------------------------------------------------------------------

/// The named templates a page can be rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageTemplate {
    Home,
    Schedule,
    Map,
    TypicalFood,
    Phrases,
    History,
    Agenda,
    List,
    Detail,
}

impl PageTemplate {
    /// All page templates in a stable order.
    pub fn all() -> &'static [PageTemplate] {
        &[
            PageTemplate::Home,
            PageTemplate::Schedule,
            PageTemplate::Map,
            PageTemplate::TypicalFood,
            PageTemplate::Phrases,
            PageTemplate::History,
            PageTemplate::Agenda,
            PageTemplate::List,
            PageTemplate::Detail,
        ]
    }

    /// Template name as registered with Tera (and as found in a user template dir).
    pub fn name(&self) -> &'static str {
        match self {
            PageTemplate::Home        => "index.html",
            PageTemplate::Schedule    => "schedule.html",
            PageTemplate::Map         => "map.html",
            PageTemplate::TypicalFood => "food_typical.html",
            PageTemplate::Phrases     => "phrases.html",
            PageTemplate::History     => "history.html",
            PageTemplate::Agenda      => "agenda.html",
            PageTemplate::List        => "list.html",
            PageTemplate::Detail      => "detail.html",
        }
    }
}

// ---------------------------------------------------------------------------
// PageRenderer
// ---------------------------------------------------------------------------

/// Turns a planned [`Page`] into a document.
///
/// Implemented by [`TemplateEngine`]; tests substitute their own.
pub trait PageRenderer {
    fn render_page(&self, page: &Page) -> Result<String, RenderError>;
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering pages with optional user overrides.
///
/// `user_template_dir` may contain `.html` files that override the embedded
/// defaults by name (e.g. `detail.html`, `_layout.html`).
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }
}

impl PageRenderer for TemplateEngine {
    fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        let ctx = page.to_tera_context()?;
        let name = page.template.name();
        self.tera
            .render(name, &ctx)
            .map_err(|source| RenderError::Page {
                template: name,
                output: page.output.clone(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
