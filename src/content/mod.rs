//! Builtin content tools
//!
//! Registers the site/page/section CRUD tools over a ContentStore. These go
//! through the same catalog API as user-supplied tools; the registry knows
//! nothing special about them.

pub mod store;

pub use store::ContentStore;

use std::path::PathBuf;
use std::sync::Arc;

use eyre::bail;
use serde_json::Value;

use crate::tools::{ParamKind, ParamSpec, ToolCatalog, ToolSpec, Visibility, handler_fn};

/// Extract a required string argument by position
fn req_str(args: &[Value], idx: usize, name: &str) -> eyre::Result<String> {
    match args.get(idx).and_then(Value::as_str) {
        Some(s) => Ok(s.to_string()),
        None => bail!("argument '{}' must be a string", name),
    }
}

/// Extract an optional string argument by position
fn opt_str(args: &[Value], idx: usize) -> Option<String> {
    args.get(idx).and_then(Value::as_str).map(str::to_string)
}

/// Build the builtin tool catalog over a content directory
pub fn builtin_catalog(root: impl Into<PathBuf>) -> ToolCatalog {
    let store = Arc::new(ContentStore::new(root));
    let mut catalog = ToolCatalog::new();

    // --- site module ---

    let s = store.clone();
    catalog.add(
        ToolSpec::new("addSite", "site")
            .with_description("Create a new site")
            .with_param(ParamSpec::string("name").with_description("Site name"))
            .with_param(
                ParamSpec::string("description")
                    .with_description("Short description")
                    .optional(),
            )
            .with_example("addSite blog \"Team blog\"")
            .with_returns(ParamKind::Object, "The created site"),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let name = req_str(&args, 0, "name")?;
                store.add_site(&name, opt_str(&args, 1).as_deref())
            }
        }),
    );

    let s = store.clone();
    catalog.add(
        ToolSpec::new("listSites", "site")
            .with_description("List all sites")
            .with_returns(ParamKind::Array, "Site names"),
        handler_fn(move |_args| {
            let store = s.clone();
            async move { store.list_sites() }
        }),
    );

    let s = store.clone();
    catalog.add(
        ToolSpec::new("getSiteConfig", "site")
            .with_description("Read a site's configuration")
            .with_param(ParamSpec::string("site").with_description("Site name"))
            .with_example("getSiteConfig blog")
            .with_returns(ParamKind::Object, "The configuration record"),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                store.get_site_config(&site)
            }
        }),
    );

    let s = store.clone();
    catalog.add(
        ToolSpec::new("setSiteConfig", "site")
            .with_description("Set one key in a site's configuration")
            .with_param(ParamSpec::string("site").with_description("Site name"))
            .with_param(ParamSpec::string("key").with_description("Configuration key"))
            .with_param(
                ParamSpec::new("value", ParamKind::Any).with_description("New value"),
            )
            .with_returns(ParamKind::Object, "The updated configuration"),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                let key = req_str(&args, 1, "key")?;
                let value = args.get(2).cloned().unwrap_or(Value::Null);
                store.set_site_config(&site, &key, value)
            }
        }),
    );

    let s = store.clone();
    catalog.add(
        ToolSpec::new("removeSite", "site")
            .with_description("Delete a site and all of its pages")
            .with_param(ParamSpec::string("site").with_description("Site name")),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                store.remove_site(&site)
            }
        }),
    );

    // --- page module ---

    let s = store.clone();
    catalog.add(
        ToolSpec::new("addPage", "page")
            .with_description("Create a page in a site")
            .with_param(ParamSpec::string("site").with_description("Site name"))
            .with_param(ParamSpec::string("path").with_description("Page path, may nest with '/'"))
            .with_param(ParamSpec::string("title").with_description("Page title").optional())
            .with_param(
                ParamSpec::string("content")
                    .with_description("Initial body text")
                    .optional(),
            )
            .with_example("addPage blog about \"About us\""),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                let path = req_str(&args, 1, "path")?;
                store.add_page(
                    &site,
                    &path,
                    opt_str(&args, 2).as_deref(),
                    opt_str(&args, 3).as_deref(),
                )
            }
        }),
    );

    let s = store.clone();
    catalog.add(
        ToolSpec::new("getPage", "page")
            .with_description("Read a page's metadata and body")
            .with_param(ParamSpec::string("site").with_description("Site name"))
            .with_param(ParamSpec::string("path").with_description("Page path"))
            .with_returns(ParamKind::Object, "Front matter and body"),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                let path = req_str(&args, 1, "path")?;
                store.get_page(&site, &path)
            }
        }),
    );

    let s = store.clone();
    catalog.add(
        ToolSpec::new("listPages", "page")
            .with_description("List the pages of a site")
            .with_param(ParamSpec::string("site").with_description("Site name"))
            .with_returns(ParamKind::Array, "Page paths"),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                store.list_pages(&site)
            }
        }),
    );

    let s = store.clone();
    catalog.add(
        ToolSpec::new("removePage", "page")
            .with_description("Delete a page")
            .with_param(ParamSpec::string("site").with_description("Site name"))
            .with_param(ParamSpec::string("path").with_description("Page path")),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                let path = req_str(&args, 1, "path")?;
                store.remove_page(&site, &path)
            }
        }),
    );

    // --- section module ---

    let s = store.clone();
    catalog.add(
        ToolSpec::new("addSection", "section")
            .with_description("Append a section to a page")
            .with_param(ParamSpec::string("site").with_description("Site name"))
            .with_param(ParamSpec::string("path").with_description("Page path"))
            .with_param(ParamSpec::string("heading").with_description("Section heading"))
            .with_param(
                ParamSpec::string("content")
                    .with_description("Section body text")
                    .optional(),
            ),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                let path = req_str(&args, 1, "path")?;
                let heading = req_str(&args, 2, "heading")?;
                store.add_section(&site, &path, &heading, opt_str(&args, 3).as_deref())
            }
        }),
    );

    let s = store.clone();
    catalog.add(
        ToolSpec::new("listSections", "section")
            .with_description("List the section headings of a page")
            .with_param(ParamSpec::string("site").with_description("Site name"))
            .with_param(ParamSpec::string("path").with_description("Page path"))
            .with_returns(ParamKind::Array, "Section headings"),
        handler_fn(move |args| {
            let store = s.clone();
            async move {
                let site = req_str(&args, 0, "site")?;
                let path = req_str(&args, 1, "path")?;
                store.list_sections(&site, &path)
            }
        }),
    );

    // Diagnostics only; hidden from both surfaces
    let s = store.clone();
    catalog.add(
        ToolSpec::new("dumpContentState", "content")
            .with_description("Dump the full site/page tree")
            .with_visibility(Visibility::Private),
        handler_fn(move |_args| {
            let store = s.clone();
            async move { store.dump_state() }
        }),
    );

    catalog
}
