use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

use crate::catalog::{CatalogProvider, FileCatalog, SeedCatalog};
use crate::model::{CategoryFilter, ParseEnumError, SortOption};
use crate::state::CartPolicy;

/// Per-project storefront settings, read from `.fazer/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default)]
    pub cart: CartConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file to load instead of the built-in seed. Relative paths are
    /// resolved against the project root.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub default_sort: SortOption,
    #[serde(default)]
    pub default_category: CategoryFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
    #[serde(default = "default_true")]
    pub remove_below_floor: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            min_quantity: default_min_quantity(),
            remove_below_floor: default_true(),
        }
    }
}

impl CartConfig {
    #[must_use]
    pub const fn policy(&self) -> CartPolicy {
        CartPolicy {
            min_quantity: self.min_quantity,
            remove_below_floor: self.remove_below_floor,
        }
    }
}

/// Storefront chrome: desktop-style top navigation, or the narrow layout with
/// a bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Web,
    Mobile,
}

impl LayoutMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Web => Self::Mobile,
            Self::Mobile => Self::Web,
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" | "desktop" => Ok(Self::Web),
            "mobile" | "narrow" => Ok(Self::Mobile),
            _ => Err(ParseEnumError {
                expected: "layout",
                got: s.to_string(),
            }),
        }
    }
}

/// Per-user preferences, read from `<config dir>/fazer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub layout: LayoutMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
    /// Catalog file after CLI override and path resolution; `None` means seed.
    pub catalog_path: Option<PathBuf>,
}

impl EffectiveConfig {
    /// Provider for the configured catalog source.
    #[must_use]
    pub fn catalog_provider(&self) -> Box<dyn CatalogProvider> {
        match &self.catalog_path {
            Some(path) => Box::new(FileCatalog::new(path.clone())),
            None => Box::new(SeedCatalog),
        }
    }
}

/// Load `.fazer/config.toml` under `project_root`, or an explicit file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if an
/// explicit `override_path` is missing.
pub fn load_project_config(
    project_root: &Path,
    override_path: Option<&Path>,
) -> Result<ProjectConfig> {
    let path = match override_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            path.to_path_buf()
        }
        None => project_root.join(".fazer/config.toml"),
    };
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the per-user config, or defaults if there is none.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("fazer/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Command-line overrides applied on top of the config files.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides<'a> {
    pub config_file: Option<&'a Path>,
    pub catalog: Option<&'a Path>,
    pub json: bool,
    pub layout: Option<LayoutMode>,
}

/// Merge defaults, user config, project config and CLI overrides.
///
/// # Errors
///
/// Returns an error if any config file is present but invalid.
pub fn resolve_config(project_root: &Path, overrides: &ConfigOverrides<'_>) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root, overrides.config_file)?;
    let mut user = load_user_config()?;
    if let Some(layout) = overrides.layout {
        user.layout = layout;
    }

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(overrides.json, user.output.clone(), env_format)?;

    let catalog_path = overrides
        .catalog
        .map(Path::to_path_buf)
        .or_else(|| {
            project.catalog.path.as_ref().map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    project_root.join(path)
                }
            })
        });

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
        catalog_path,
    })
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<String>,
    env_format: Option<String>,
) -> Result<String> {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return Ok("json".to_string());
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return Ok(mode.to_string());
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return Ok(mode.to_string());
    }

    if std::io::stdout().is_terminal() {
        Ok("pretty".to_string())
    } else {
        Ok("text".to_string())
    }
}

const fn default_true() -> bool {
    true
}

const fn default_min_quantity() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn write_project_config(root: &Path, content: &str) {
        let dir = root.join(".fazer");
        std::fs::create_dir_all(&dir).expect("create .fazer");
        std::fs::write(dir.join("config.toml"), content).expect("write config");
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = load_project_config(root.path(), None).expect("load should succeed");
        assert_eq!(cfg, ProjectConfig::default());
        assert_eq!(cfg.cart.min_quantity, 1);
        assert!(cfg.cart.remove_below_floor);
        assert_eq!(cfg.shop.default_sort, SortOption::RatingDesc);
        assert_eq!(cfg.shop.default_category, CategoryFilter::All);
        assert!(cfg.catalog.path.is_none());
    }

    #[test]
    fn project_config_parses_all_sections() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(
            root.path(),
            r#"
[catalog]
path = "data/catalog.toml"

[shop]
default_sort = "price-asc"
default_category = "Optics"

[cart]
min_quantity = 2
remove_below_floor = false
"#,
        );

        let cfg = load_project_config(root.path(), None).expect("load");
        assert_eq!(cfg.catalog.path, Some(PathBuf::from("data/catalog.toml")));
        assert_eq!(cfg.shop.default_sort, SortOption::PriceAsc);
        assert_eq!(
            cfg.shop.default_category,
            CategoryFilter::Only(Category::Optics)
        );
        let policy = cfg.cart.policy();
        assert_eq!(policy.min_quantity, 2);
        assert!(!policy.remove_below_floor);
    }

    #[test]
    fn partial_cart_section_keeps_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[cart]\nmin_quantity = 3\n");
        let cfg = load_project_config(root.path(), None).expect("load");
        assert_eq!(cfg.cart.min_quantity, 3);
        assert!(cfg.cart.remove_below_floor);
    }

    #[test]
    fn invalid_sort_value_fails_to_parse() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[shop]\ndefault_sort = \"newest\"\n");
        let err = load_project_config(root.path(), None).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let root = tempfile::tempdir().expect("tempdir");
        let missing = root.path().join("nope.toml");
        assert!(load_project_config(root.path(), Some(&missing)).is_err());
    }

    #[test]
    fn explicit_config_file_replaces_project_file() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[shop]\ndefault_sort = \"price-desc\"\n");
        let other = root.path().join("alt.toml");
        std::fs::write(&other, "[shop]\ndefault_sort = \"price-asc\"\n").unwrap();

        let cfg = load_project_config(root.path(), Some(&other)).expect("load");
        assert_eq!(cfg.shop.default_sort, SortOption::PriceAsc);
    }

    #[test]
    fn relative_catalog_path_resolves_against_root() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[catalog]\npath = \"cat.json\"\n");
        let cfg = resolve_config(root.path(), &ConfigOverrides::default()).expect("resolve");
        assert_eq!(cfg.catalog_path, Some(root.path().join("cat.json")));
    }

    #[test]
    fn cli_catalog_overrides_project_catalog() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[catalog]\npath = \"cat.json\"\n");
        let cli_path = PathBuf::from("/tmp/other.toml");
        let overrides = ConfigOverrides {
            catalog: Some(&cli_path),
            ..ConfigOverrides::default()
        };
        let cfg = resolve_config(root.path(), &overrides).expect("resolve");
        assert_eq!(cfg.catalog_path, Some(cli_path));
        assert!(cfg.catalog_provider().describe().contains("other.toml"));
    }

    #[test]
    fn no_catalog_path_uses_seed() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = resolve_config(root.path(), &ConfigOverrides::default()).expect("resolve");
        assert!(cfg.catalog_path.is_none());
        let catalog = cfg.catalog_provider().load().expect("seed loads");
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn layout_override_wins() {
        let root = tempfile::tempdir().expect("tempdir");
        let overrides = ConfigOverrides {
            layout: Some(LayoutMode::Mobile),
            ..ConfigOverrides::default()
        };
        let cfg = resolve_config(root.path(), &overrides).expect("resolve");
        assert_eq!(cfg.user.layout, LayoutMode::Mobile);
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        let output = resolve_output(true, Some("pretty".to_string()), Some("text".to_string()))
            .expect("resolve should succeed");
        assert_eq!(output, "json");
    }

    #[test]
    fn legacy_aliases_are_normalized() {
        let pretty = resolve_output(false, Some("table".to_string()), Some("human".to_string()))
            .expect("resolve should succeed");
        assert_eq!(pretty, "pretty");

        let text = resolve_output(false, Some("human".to_string()), Some("table".to_string()))
            .expect("resolve should succeed");
        assert_eq!(text, "text");
    }

    #[test]
    fn user_config_parses_layout_and_output() {
        let cfg: UserConfig = toml::from_str("output = \"json\"\nlayout = \"mobile\"\n").unwrap();
        assert_eq!(cfg.output.as_deref(), Some("json"));
        assert_eq!(cfg.layout, LayoutMode::Mobile);
    }

    #[test]
    fn layout_parse_accepts_aliases() {
        assert_eq!("desktop".parse::<LayoutMode>().unwrap(), LayoutMode::Web);
        assert_eq!("NARROW".parse::<LayoutMode>().unwrap(), LayoutMode::Mobile);
        assert!("tablet".parse::<LayoutMode>().is_err());
        assert_eq!(LayoutMode::Web.toggled(), LayoutMode::Mobile);
    }
}
