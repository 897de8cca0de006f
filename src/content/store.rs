//! Content store
//!
//! Filesystem CRUD behind the builtin site/page/section tools. A site is a
//! directory with a `site.yml` config; pages are markdown files with YAML
//! front matter under `pages/`; sections are `## ` headings in a page body.
//! The layout is deliberately minimal and carries no compatibility promise.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result, bail};
use serde_json::{Value, json};

const SITE_CONFIG: &str = "site.yml";
const PAGES_DIR: &str = "pages";
const FRONT_MATTER_DELIM: &str = "---";

/// Filesystem-backed content store rooted at one directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // --- sites ---

    /// Create a site directory with its config file
    pub fn add_site(&self, name: &str, description: Option<&str>) -> Result<Value> {
        check_segment(name)?;
        let dir = self.site_dir(name);
        if dir.exists() {
            bail!("site '{}' already exists", name);
        }
        fs::create_dir_all(dir.join(PAGES_DIR))
            .wrap_err_with(|| format!("failed to create site '{}'", name))?;

        let config = json!({
            "name": name,
            "description": description.unwrap_or_default(),
        });
        self.write_site_config(name, &config)?;
        Ok(json!({"site": name}))
    }

    /// List site names (directories carrying a config file)
    pub fn list_sites(&self) -> Result<Value> {
        let mut sites = Vec::new();
        if self.root.exists() {
            for entry in fs::read_dir(&self.root).wrap_err("failed to read content root")? {
                let entry = entry?;
                let path = entry.path();
                if path.is_dir()
                    && path.join(SITE_CONFIG).exists()
                    && let Some(name) = path.file_name().and_then(|n| n.to_str())
                {
                    sites.push(name.to_string());
                }
            }
        }
        sites.sort();
        Ok(json!(sites))
    }

    /// Read a site's configuration record
    pub fn get_site_config(&self, site: &str) -> Result<Value> {
        check_segment(site)?;
        let path = self.site_dir(site).join(SITE_CONFIG);
        let raw = fs::read_to_string(&path)
            .wrap_err_with(|| format!("site '{}' not found", site))?;
        let config: Value =
            serde_yaml::from_str(&raw).wrap_err_with(|| format!("invalid config for '{}'", site))?;
        Ok(config)
    }

    /// Set one key in a site's configuration
    pub fn set_site_config(&self, site: &str, key: &str, value: Value) -> Result<Value> {
        let mut config = self.get_site_config(site)?;
        match config.as_object_mut() {
            Some(map) => {
                map.insert(key.to_string(), value);
            }
            None => bail!("config for '{}' is not a mapping", site),
        }
        self.write_site_config(site, &config)?;
        Ok(config)
    }

    /// Delete a site and everything under it
    pub fn remove_site(&self, site: &str) -> Result<Value> {
        check_segment(site)?;
        let dir = self.site_dir(site);
        if !dir.join(SITE_CONFIG).exists() {
            bail!("site '{}' not found", site);
        }
        fs::remove_dir_all(&dir).wrap_err_with(|| format!("failed to remove '{}'", site))?;
        Ok(json!({"removed": site}))
    }

    // --- pages ---

    /// Create a page with YAML front matter
    pub fn add_page(
        &self,
        site: &str,
        path: &str,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Value> {
        check_page_path(path)?;
        let file = self.page_file(site, path)?;
        if file.exists() {
            bail!("page '{}' already exists in site '{}'", path, site);
        }
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }

        let front = json!({"title": title.unwrap_or(path)});
        let body = content.unwrap_or_default();
        fs::write(&file, render_page(&front, body)?)
            .wrap_err_with(|| format!("failed to write page '{}'", path))?;
        Ok(json!({"site": site, "page": path}))
    }

    /// Read a page's front matter and body
    pub fn get_page(&self, site: &str, path: &str) -> Result<Value> {
        check_page_path(path)?;
        let file = self.page_file(site, path)?;
        let raw = fs::read_to_string(&file)
            .wrap_err_with(|| format!("page '{}' not found in site '{}'", path, site))?;
        let (front, body) = parse_page(&raw)?;
        Ok(json!({"path": path, "meta": front, "body": body}))
    }

    /// List page paths of a site, relative to its pages directory
    pub fn list_pages(&self, site: &str) -> Result<Value> {
        check_segment(site)?;
        let pages_dir = self.site_dir(site).join(PAGES_DIR);
        if !self.site_dir(site).join(SITE_CONFIG).exists() {
            bail!("site '{}' not found", site);
        }

        let mut pages = Vec::new();
        collect_pages(&pages_dir, &pages_dir, &mut pages)?;
        pages.sort();
        Ok(json!(pages))
    }

    /// Delete a page
    pub fn remove_page(&self, site: &str, path: &str) -> Result<Value> {
        check_page_path(path)?;
        let file = self.page_file(site, path)?;
        if !file.exists() {
            bail!("page '{}' not found in site '{}'", path, site);
        }
        fs::remove_file(&file)?;
        Ok(json!({"removed": path}))
    }

    // --- sections ---

    /// Append a `## heading` section to a page body
    pub fn add_section(
        &self,
        site: &str,
        path: &str,
        heading: &str,
        content: Option<&str>,
    ) -> Result<Value> {
        let file = self.page_file(site, path)?;
        let raw = fs::read_to_string(&file)
            .wrap_err_with(|| format!("page '{}' not found in site '{}'", path, site))?;

        let section = match content {
            Some(text) if !text.is_empty() => format!("\n\n## {}\n\n{}", heading, text),
            _ => format!("\n\n## {}", heading),
        };
        fs::write(&file, format!("{}{}", raw.trim_end(), section))?;
        Ok(json!({"page": path, "section": heading}))
    }

    /// List the `## ` headings of a page body
    pub fn list_sections(&self, site: &str, path: &str) -> Result<Value> {
        let file = self.page_file(site, path)?;
        let raw = fs::read_to_string(&file)
            .wrap_err_with(|| format!("page '{}' not found in site '{}'", path, site))?;
        let (_, body) = parse_page(&raw)?;

        let sections: Vec<String> = body
            .lines()
            .filter_map(|line| line.strip_prefix("## "))
            .map(|h| h.trim().to_string())
            .collect();
        Ok(json!(sections))
    }

    /// Full tree of sites and their pages, for diagnostics
    pub fn dump_state(&self) -> Result<Value> {
        let mut state = serde_json::Map::new();
        if let Value::Array(sites) = self.list_sites()? {
            for site in sites {
                if let Some(name) = site.as_str() {
                    state.insert(name.to_string(), self.list_pages(name)?);
                }
            }
        }
        Ok(Value::Object(state))
    }

    fn site_dir(&self, site: &str) -> PathBuf {
        self.root.join(site)
    }

    fn page_file(&self, site: &str, path: &str) -> Result<PathBuf> {
        check_segment(site)?;
        check_page_path(path)?;
        Ok(self
            .site_dir(site)
            .join(PAGES_DIR)
            .join(format!("{}.md", path)))
    }

    fn write_site_config(&self, site: &str, config: &Value) -> Result<()> {
        let raw = serde_yaml::to_string(config)?;
        fs::write(self.site_dir(site).join(SITE_CONFIG), raw)?;
        Ok(())
    }
}

/// Names must be a single, safe path segment
fn check_segment(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        bail!("invalid name '{}'", name);
    }
    Ok(())
}

/// Page paths may nest, but every segment must be safe
fn check_page_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("invalid page path ''");
    }
    for segment in path.split('/') {
        check_segment(segment)?;
    }
    Ok(())
}

fn render_page(front: &Value, body: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(front)?;
    Ok(format!(
        "{}\n{}{}\n{}",
        FRONT_MATTER_DELIM, yaml, FRONT_MATTER_DELIM, body
    ))
}

/// Split a page file into front matter (as JSON) and body
fn parse_page(raw: &str) -> Result<(Value, String)> {
    let Some(rest) = raw.strip_prefix(FRONT_MATTER_DELIM) else {
        return Ok((json!({}), raw.to_string()));
    };
    match rest.split_once(FRONT_MATTER_DELIM) {
        Some((front, body)) => {
            let meta: Value = serde_yaml::from_str(front).wrap_err("invalid front matter")?;
            Ok((meta, body.trim_start_matches('\n').to_string()))
        }
        None => Ok((json!({}), raw.to_string())),
    }
}

fn collect_pages(base: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_pages(base, &path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "md")
            && let Ok(rel) = path.strip_prefix(base)
            && let Some(rel) = rel.to_str()
        {
            out.push(rel.trim_end_matches(".md").to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_store() -> (ContentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ContentStore::new(temp_dir.path());
        (store, temp_dir)
    }

    #[test]
    fn test_add_and_list_sites() {
        let (store, _dir) = create_store();
        store.add_site("blog", Some("My blog")).unwrap();
        store.add_site("docs", None).unwrap();

        assert_eq!(store.list_sites().unwrap(), json!(["blog", "docs"]));
    }

    #[test]
    fn test_add_site_twice_fails() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        let err = store.add_site("blog", None).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_add_site_rejects_bad_name() {
        let (store, _dir) = create_store();
        assert!(store.add_site("../escape", None).is_err());
        assert!(store.add_site("a/b", None).is_err());
        assert!(store.add_site("", None).is_err());
    }

    #[test]
    fn test_list_sites_empty_root() {
        let (store, _dir) = create_store();
        assert_eq!(store.list_sites().unwrap(), json!([]));
    }

    #[test]
    fn test_get_site_config() {
        let (store, _dir) = create_store();
        store.add_site("blog", Some("My blog")).unwrap();

        let config = store.get_site_config("blog").unwrap();
        assert_eq!(config["name"], "blog");
        assert_eq!(config["description"], "My blog");
    }

    #[test]
    fn test_get_site_config_missing_site() {
        let (store, _dir) = create_store();
        assert!(store.get_site_config("nope").is_err());
    }

    #[test]
    fn test_set_site_config() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();

        let config = store
            .set_site_config("blog", "theme", json!("dark"))
            .unwrap();
        assert_eq!(config["theme"], "dark");

        // Persisted, not just returned
        let config = store.get_site_config("blog").unwrap();
        assert_eq!(config["theme"], "dark");
        assert_eq!(config["name"], "blog");
    }

    #[test]
    fn test_remove_site() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        store.remove_site("blog").unwrap();

        assert_eq!(store.list_sites().unwrap(), json!([]));
        assert!(store.remove_site("blog").is_err());
    }

    #[test]
    fn test_add_and_get_page() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        store
            .add_page("blog", "about", Some("About us"), Some("We write things."))
            .unwrap();

        let page = store.get_page("blog", "about").unwrap();
        assert_eq!(page["path"], "about");
        assert_eq!(page["meta"]["title"], "About us");
        assert_eq!(page["body"], "We write things.");
    }

    #[test]
    fn test_add_page_title_defaults_to_path() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        store.add_page("blog", "about", None, None).unwrap();

        let page = store.get_page("blog", "about").unwrap();
        assert_eq!(page["meta"]["title"], "about");
    }

    #[test]
    fn test_add_page_twice_fails() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        store.add_page("blog", "about", None, None).unwrap();
        assert!(store.add_page("blog", "about", None, None).is_err());
    }

    #[test]
    fn test_nested_page_paths() {
        let (store, _dir) = create_store();
        store.add_site("docs", None).unwrap();
        store.add_page("docs", "guide/intro", None, None).unwrap();
        store.add_page("docs", "guide/setup", None, None).unwrap();

        assert_eq!(
            store.list_pages("docs").unwrap(),
            json!(["guide/intro", "guide/setup"])
        );
    }

    #[test]
    fn test_page_path_traversal_rejected() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        assert!(store.add_page("blog", "../escape", None, None).is_err());
        assert!(store.add_page("blog", "a/../b", None, None).is_err());
    }

    #[test]
    fn test_list_pages_missing_site() {
        let (store, _dir) = create_store();
        assert!(store.list_pages("nope").is_err());
    }

    #[test]
    fn test_remove_page() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        store.add_page("blog", "about", None, None).unwrap();
        store.remove_page("blog", "about").unwrap();

        assert_eq!(store.list_pages("blog").unwrap(), json!([]));
        assert!(store.remove_page("blog", "about").is_err());
    }

    #[test]
    fn test_add_and_list_sections() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        store
            .add_page("blog", "about", None, Some("Intro text."))
            .unwrap();
        store
            .add_section("blog", "about", "History", Some("Founded long ago."))
            .unwrap();
        store.add_section("blog", "about", "Team", None).unwrap();

        assert_eq!(
            store.list_sections("blog", "about").unwrap(),
            json!(["History", "Team"])
        );

        let page = store.get_page("blog", "about").unwrap();
        let body = page["body"].as_str().unwrap();
        assert!(body.contains("Intro text."));
        assert!(body.contains("## History"));
        assert!(body.contains("Founded long ago."));
    }

    #[test]
    fn test_add_section_missing_page() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        assert!(store.add_section("blog", "nope", "X", None).is_err());
    }

    #[test]
    fn test_dump_state() {
        let (store, _dir) = create_store();
        store.add_site("blog", None).unwrap();
        store.add_page("blog", "about", None, None).unwrap();

        let state = store.dump_state().unwrap();
        assert_eq!(state["blog"], json!(["about"]));
    }

    #[test]
    fn test_page_without_front_matter_parses() {
        let (raw_meta, body) = parse_page("just a body").unwrap();
        assert_eq!(raw_meta, json!({}));
        assert_eq!(body, "just a body");
    }
}
