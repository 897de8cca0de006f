//! Tool catalog
//!
//! Pairs tool descriptors with their invocable handlers by name. Built once
//! at startup and read-only afterwards; handlers without a matching
//! descriptor (and descriptors without a handler) are silently excluded.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::descriptor::ToolSpec;

/// An invocable tool implementation. Arguments arrive positionally in the
/// descriptor's declared parameter order; absent optionals are Null.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, args: Vec<Value>) -> eyre::Result<Value>;
}

struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = eyre::Result<Value>> + Send,
{
    async fn invoke(&self, args: Vec<Value>) -> eyre::Result<Value> {
        (self.f)(args).await
    }
}

/// Wrap an async closure as a ToolHandler
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn ToolHandler>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = eyre::Result<Value>> + Send + 'static,
{
    Arc::new(FnHandler { f })
}

/// One catalog entry: descriptor plus handler
#[derive(Clone)]
pub struct CatalogEntry {
    pub spec: ToolSpec,
    pub handler: Arc<dyn ToolHandler>,
}

/// Catalog of registered tools, keyed by unique name
#[derive(Clone, Default)]
pub struct ToolCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a catalog from a list of (name, handler) pairs and a parallel
    /// list of descriptors, pairing by name. A handler with no descriptor is
    /// never invocable and is dropped; a descriptor with no handler is
    /// dropped for the same reason.
    pub fn build(handlers: Vec<(String, Arc<dyn ToolHandler>)>, specs: Vec<ToolSpec>) -> Self {
        let mut specs_by_name: HashMap<String, ToolSpec> =
            specs.into_iter().map(|s| (s.name.clone(), s)).collect();

        let mut entries = HashMap::new();
        for (name, handler) in handlers {
            match specs_by_name.remove(&name) {
                Some(spec) => {
                    entries.insert(name, CatalogEntry { spec, handler });
                }
                None => debug!("excluding handler '{}' with no descriptor", name),
            }
        }
        for name in specs_by_name.keys() {
            debug!("excluding descriptor '{}' with no handler", name);
        }

        Self { entries }
    }

    /// Register one tool
    pub fn add(&mut self, spec: ToolSpec, handler: Arc<dyn ToolHandler>) {
        self.entries
            .insert(spec.name.clone(), CatalogEntry { spec, handler });
    }

    /// Get a catalog entry by tool name
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Get a tool's descriptor by name
    pub fn spec(&self, name: &str) -> Option<&ToolSpec> {
        self.entries.get(name).map(|e| &e.spec)
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All descriptors, sorted by name for deterministic output
    pub fn specs(&self) -> Vec<&ToolSpec> {
        let mut specs: Vec<&ToolSpec> = self.entries.values().map(|e| &e.spec).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// List all tool names, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Descriptors of all tools in a module, sorted by name
    pub fn specs_in_module(&self, module: &str) -> Vec<&ToolSpec> {
        let mut specs: Vec<&ToolSpec> = self
            .entries
            .values()
            .map(|e| &e.spec)
            .filter(|s| s.module == module)
            .collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Check if any registered tool declares this module label
    pub fn has_module(&self, module: &str) -> bool {
        self.entries.values().any(|e| e.spec.module == module)
    }

    /// Get number of tools
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop_handler() -> Arc<dyn ToolHandler> {
        handler_fn(|_args| async { Ok(Value::Null) })
    }

    fn sample_specs() -> Vec<ToolSpec> {
        vec![
            ToolSpec::new("addSite", "site"),
            ToolSpec::new("listSites", "site"),
            ToolSpec::new("addPage", "page"),
        ]
    }

    #[test]
    fn test_catalog_new_empty() {
        let catalog = ToolCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_catalog_build_pairs_by_name() {
        let handlers = vec![
            ("addSite".to_string(), noop_handler()),
            ("listSites".to_string(), noop_handler()),
            ("addPage".to_string(), noop_handler()),
        ];
        let catalog = ToolCatalog::build(handlers, sample_specs());

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("addSite"));
        assert!(catalog.contains("addPage"));
    }

    #[test]
    fn test_catalog_build_excludes_handler_without_descriptor() {
        let handlers = vec![
            ("addSite".to_string(), noop_handler()),
            ("orphan".to_string(), noop_handler()),
        ];
        let catalog = ToolCatalog::build(handlers, sample_specs());

        assert!(!catalog.contains("orphan"));
        assert!(catalog.contains("addSite"));
    }

    #[test]
    fn test_catalog_build_excludes_descriptor_without_handler() {
        let handlers = vec![("addSite".to_string(), noop_handler())];
        let catalog = ToolCatalog::build(handlers, sample_specs());

        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains("listSites"));
    }

    #[test]
    fn test_catalog_get_and_spec() {
        let mut catalog = ToolCatalog::new();
        catalog.add(ToolSpec::new("addSite", "site"), noop_handler());

        assert!(catalog.get("addSite").is_some());
        assert_eq!(catalog.spec("addSite").unwrap().module, "site");
        assert!(catalog.get("nonexistent").is_none());
        assert!(catalog.spec("nonexistent").is_none());
    }

    #[test]
    fn test_catalog_list_sorted() {
        let handlers = vec![
            ("listSites".to_string(), noop_handler()),
            ("addPage".to_string(), noop_handler()),
            ("addSite".to_string(), noop_handler()),
        ];
        let catalog = ToolCatalog::build(handlers, sample_specs());
        assert_eq!(catalog.list(), vec!["addPage", "addSite", "listSites"]);
    }

    #[test]
    fn test_catalog_specs_in_module() {
        let handlers = vec![
            ("addSite".to_string(), noop_handler()),
            ("listSites".to_string(), noop_handler()),
            ("addPage".to_string(), noop_handler()),
        ];
        let catalog = ToolCatalog::build(handlers, sample_specs());

        let site_specs = catalog.specs_in_module("site");
        assert_eq!(site_specs.len(), 2);
        assert_eq!(site_specs[0].name, "addSite");
        assert_eq!(site_specs[1].name, "listSites");

        assert!(catalog.specs_in_module("section").is_empty());
    }

    #[test]
    fn test_catalog_has_module() {
        let handlers = vec![("addSite".to_string(), noop_handler())];
        let catalog = ToolCatalog::build(handlers, sample_specs());

        assert!(catalog.has_module("site"));
        assert!(!catalog.has_module("page"));
    }

    #[tokio::test]
    async fn test_handler_fn_invokes_closure() {
        let handler = handler_fn(|args| async move {
            let name = args[0].as_str().unwrap_or_default().to_string();
            Ok(json!({"created": name}))
        });

        let result = handler.invoke(vec![json!("blog")]).await.unwrap();
        assert_eq!(result, json!({"created": "blog"}));
    }

    #[tokio::test]
    async fn test_handler_fn_propagates_error() {
        let handler = handler_fn(|_args| async { Err(eyre::eyre!("boom")) });
        let err = handler.invoke(vec![]).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
