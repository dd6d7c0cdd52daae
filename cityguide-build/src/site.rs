//! Site plan — every page of the guide, in build order.
//!
//! # Output tree
//!
//! ```text
//! dist/
//!   index.html  schedule.html  map.html
//!   food-typical.html  phrases.html  history.html  agenda.html
//!   <collection>/index.html          (list page)
//!   <collection>/<id>.html           (one detail page per record)
//!   static/…                         (see `assets`)
//! ```
//!
//! Top-level pages link with no prefix; collection pages sit one directory
//! down and link through `../`.

use std::path::PathBuf;

use serde_json::{Map, Value};

use cityguide_core::{
    collect_map_points, Collection, GuideContent, MalformedRecordError, MapPayload, Record,
};
use cityguide_renderer::{BaseContext, Depth, Page, PageMeta, PageTemplate, RenderError};

use crate::error::BuildError;

/// Singleton pages after home, schedule and map: (template, output, title).
const SINGLETON_PAGES: &[(PageTemplate, &str, &str)] = &[
    (PageTemplate::TypicalFood, "food-typical.html", "Menjar típic"),
    (PageTemplate::Phrases,     "phrases.html",      "Paraules en eslovac"),
    (PageTemplate::History,     "history.html",      "Història"),
    (PageTemplate::Agenda,      "agenda.html",       "Agenda cultural"),
];

/// File name of a record's detail page inside its collection directory.
pub fn record_page_name(id: &str) -> String {
    format!("{id}.html")
}

/// The map dataset for `content`.
pub fn map_payload(content: &GuideContent) -> Result<MapPayload, MalformedRecordError> {
    Ok(MapPayload::new(&content.map, collect_map_points(content)?))
}

/// Plan the whole site: home, schedule, map, the singleton pages, then the
/// list page and detail pages of each collection.
pub fn plan_pages(content: &GuideContent) -> Result<Vec<Page>, BuildError> {
    let base = BaseContext::from_content(content).to_map()?;
    let top = |title: &str| PageMeta::new(title, Depth::TopLevel);

    let mut pages = vec![
        Page::new(PageTemplate::Home, "index.html", &base, top("Home"))?,
        Page::new(PageTemplate::Schedule, "schedule.html", &base, top("Schedule"))?
            .with("schedule", &content.schedule)?,
        map_page(content, &base)?,
    ];
    for (template, output, title) in SINGLETON_PAGES {
        pages.push(Page::new(*template, *output, &base, top(*title))?);
    }
    for collection in content.collections.iter() {
        pages.extend(collection_pages(collection, &base)?);
    }
    Ok(pages)
}

fn map_page(content: &GuideContent, base: &Map<String, Value>) -> Result<Page, BuildError> {
    let map_data = map_payload(content)?
        .to_script_json()
        .map_err(RenderError::from)?;
    let page = Page::new(
        PageTemplate::Map,
        "map.html",
        base,
        PageMeta::new("Map", Depth::TopLevel),
    )?
    .with("map_data", map_data)?;
    Ok(page)
}

/// The list page of `collection` followed by one detail page per record.
///
/// Records handed to these pages carry an extra `url` field (`<id>.html`),
/// relative to the collection directory.
pub fn collection_pages(
    collection: &Collection,
    base: &Map<String, Value>,
) -> Result<Vec<Page>, BuildError> {
    let kind = collection.kind;
    let entries = collection.entries()?;
    let dir = PathBuf::from(kind.as_str());

    let items: Vec<Record> = entries
        .iter()
        .map(|entry| {
            let mut item = entry.record.clone();
            item.insert("url", record_page_name(&entry.fields.id));
            item
        })
        .collect();

    let mut pages = Vec::with_capacity(items.len() + 1);
    pages.push(
        Page::new(
            PageTemplate::List,
            dir.join("index.html"),
            base,
            PageMeta::new(kind.title(), Depth::Section),
        )?
        .with("items", &items)?
        .with("section", kind.as_str())?
        .with("section_title", kind.title())?
        .with("section_intro", kind.intro())?,
    );

    for (entry, item) in entries.iter().zip(&items) {
        pages.push(
            Page::new(
                PageTemplate::Detail,
                dir.join(record_page_name(&entry.fields.id)),
                base,
                PageMeta::new(&*entry.fields.name, Depth::Section),
            )?
            .with("item", item)?
            .with("section", kind.as_str())?
            .with("back_link", "index.html")?
            .with("back_label", kind.title())?,
        );
    }
    Ok(pages)
}
