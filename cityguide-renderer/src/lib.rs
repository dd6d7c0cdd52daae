//! # cityguide-renderer
//!
//! Tera-based engine that renders guide pages from loaded content.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cityguide_core::GuideContent;
//! use cityguide_renderer::{BaseContext, Depth, Page, PageMeta, PageRenderer, PageTemplate, TemplateEngine};
//!
//! fn render_home(content: &GuideContent) -> Result<String, cityguide_renderer::RenderError> {
//!     let engine = TemplateEngine::new(None)?;
//!     let base = BaseContext::from_content(content).to_map()?;
//!     let page = Page::new(
//!         PageTemplate::Home,
//!         "index.html",
//!         &base,
//!         PageMeta::new("Home", Depth::TopLevel),
//!     )?;
//!     engine.render_page(&page)
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{BaseContext, Depth, Page, PageMeta};
pub use engine::{PageRenderer, PageTemplate, TemplateEngine};
pub use error::RenderError;
