//! Template context — serializable rendering payloads built from [`GuideContent`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use cityguide_core::{GuideContent, Record};

use crate::engine::PageTemplate;
use crate::error::RenderError;

/// Where a page sits in the output tree; decides its link prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Output root (`index.html`, `map.html`, …).
    TopLevel,
    /// One directory down (`places/index.html`, `places/<id>.html`).
    Section,
}

impl Depth {
    /// Prefix for links to other pages.
    pub fn base_prefix(&self) -> &'static str {
        match self {
            Depth::TopLevel => "",
            Depth::Section => "../",
        }
    }

    /// Prefix for links into the `static/` subtree.
    pub fn static_prefix(&self) -> &'static str {
        match self {
            Depth::TopLevel => "static/",
            Depth::Section => "../static/",
        }
    }
}

/// Data shared by every page: city metadata, all collections and the
/// singleton sections (`schedule` is only given to the schedule page).
#[derive(Debug, Clone, Serialize)]
pub struct BaseContext {
    pub city: Value,
    /// Collection name → records.
    #[serde(flatten)]
    pub collections: BTreeMap<String, Vec<Record>>,
    pub typical_food: Value,
    pub phrases: Value,
    pub history: Value,
    pub agenda: Value,
}

impl BaseContext {
    /// Build a [`BaseContext`] from loaded content.
    pub fn from_content(content: &GuideContent) -> Self {
        let collections = content
            .collections
            .iter()
            .map(|c| (c.kind.as_str().to_string(), c.records.clone()))
            .collect();

        BaseContext {
            city: content.city.clone(),
            collections,
            typical_food: content.typical_food.clone(),
            phrases: content.phrases.clone(),
            history: content.history.clone(),
            agenda: content.agenda.clone(),
        }
    }

    /// Serialize once; every [`Page`] starts from a copy of this map.
    pub fn to_map(&self) -> Result<Map<String, Value>, RenderError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// Per-page fields every template reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page_title: String,
    pub base_prefix: &'static str,
    pub static_prefix: &'static str,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, depth: Depth) -> Self {
        PageMeta {
            page_title: title.into(),
            base_prefix: depth.base_prefix(),
            static_prefix: depth.static_prefix(),
        }
    }
}

/// One output document: template, path relative to the output root, context.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub template: PageTemplate,
    pub output: PathBuf,
    pub context: Map<String, Value>,
}

impl Page {
    pub fn new(
        template: PageTemplate,
        output: impl Into<PathBuf>,
        base: &Map<String, Value>,
        meta: PageMeta,
    ) -> Result<Self, RenderError> {
        Page {
            template,
            output: output.into(),
            context: base.clone(),
        }
        .with("page_title", &meta.page_title)?
        .with("base_prefix", meta.base_prefix)?
        .with("static_prefix", meta.static_prefix)
    }

    /// Add a page-specific context entry, replacing any shared entry of the same name.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Result<Self, RenderError> {
        self.context
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(&self.context).map_err(RenderError::from)
    }
}
