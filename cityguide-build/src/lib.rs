//! # cityguide-build
//!
//! Site plan, asset publishing, page writing and build orchestration.
//!
//! Call [`pipeline::run`] with a [`SiteLayout`] to build a whole guide, or
//! [`pipeline::render_site`] to drive page rendering without touching disk.

pub mod assets;
pub mod error;
pub mod pipeline;
pub mod site;
pub mod writer;

pub use assets::{publish_assets, PublishReport, STATIC_DIR_NAME};
pub use error::{AssetCopyError, BuildError};
pub use pipeline::{render_site, run, BuildOptions, BuildReport, SiteLayout};
pub use writer::{write_page, WriteResult};
