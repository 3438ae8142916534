use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// How a configured container recognises its opening line.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    /// `::: name` only; trailing text after the name is ignored.
    #[default]
    None,
    /// `::: name [header text]`, with the bracket text rendered as a header.
    Bracketed,
}

/// A container registered from configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContainerConfig {
    pub name: String,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default)]
    pub header: HeaderStyle,
}

fn default_marker() -> String {
    ":".to_string()
}

impl ContainerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marker: default_marker(),
            header: HeaderStyle::None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Block nesting depth at which the tokenizer stops descending.
    pub max_nesting: usize,
    /// Write `<br />` and `<hr />` instead of `<br>` and `<hr>`.
    pub xhtml_out: bool,
    /// Render soft line breaks as `<br>`.
    pub breaks: bool,
    /// Class prefix for the language of fenced code blocks.
    pub lang_prefix: String,
    pub containers: Vec<ContainerConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nesting: 100,
            xhtml_out: false,
            breaks: false,
            lang_prefix: "language-".to_string(),
            containers: Vec::new(),
        }
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn max_nesting(mut self, depth: usize) -> Self {
        self.config.max_nesting = depth;
        self
    }

    pub fn xhtml_out(mut self, enabled: bool) -> Self {
        self.config.xhtml_out = enabled;
        self
    }

    pub fn breaks(mut self, enabled: bool) -> Self {
        self.config.breaks = enabled;
        self
    }

    pub fn lang_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.lang_prefix = prefix.into();
        self
    }

    pub fn container(mut self, container: ContainerConfig) -> Self {
        self.config.containers.push(container);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".markdown-containers.toml", "markdown-containers.toml"];
const APP_DIR: &str = "markdown-containers";

pub fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join(APP_DIR).join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join(APP_DIR)
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .markdown-containers.toml, markdown-containers.toml
/// 3) XDG: $XDG_CONFIG_HOME/markdown-containers/config.toml or
///    ~/.config/markdown-containers/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir)
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    if let Some(p) = xdg_config_path()
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg = toml::from_str::<Config>("breaks = true").unwrap();
        assert!(cfg.breaks);
        assert_eq!(cfg.max_nesting, 100);
        assert_eq!(cfg.lang_prefix, "language-");
    }

    #[test]
    fn containers_table() {
        let toml_str = r#"
            [[containers]]
            name = "warning"

            [[containers]]
            name = "spoiler"
            marker = "+"
            header = "bracketed"
        "#;
        let cfg = toml::from_str::<Config>(toml_str).unwrap();
        assert_eq!(cfg.containers.len(), 2);
        assert_eq!(cfg.containers[0], ContainerConfig::new("warning"));
        assert_eq!(cfg.containers[1].marker, "+");
        assert_eq!(cfg.containers[1].header, HeaderStyle::Bracketed);
    }

    #[test]
    fn invalid_config_is_invalid_data() {
        let err = parse_config_str("max_nesting = \"deep\"", Path::new("x.toml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = ConfigBuilder::default()
            .xhtml_out(true)
            .lang_prefix("lang-")
            .container(ContainerConfig::new("note"))
            .build();
        assert!(cfg.xhtml_out);
        assert_eq!(cfg.lang_prefix, "lang-");
        assert_eq!(cfg.containers[0].name, "note");
    }

    #[test]
    fn load_finds_config_in_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        let path = dir.path().join(".markdown-containers.toml");
        fs::write(&path, "max_nesting = 5\n").unwrap();

        let (cfg, found) = load(None, &nested).unwrap();
        assert_eq!(cfg.max_nesting, 5);
        assert_eq!(found, Some(path));
    }

    #[test]
    fn load_explicit_path_errors_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn load_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("markdown-containers.toml"), "breaks = true\n").unwrap();
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "xhtml_out = true\n").unwrap();

        let (cfg, found) = load(Some(&explicit), dir.path()).unwrap();
        assert!(cfg.xhtml_out);
        assert!(!cfg.breaks);
        assert_eq!(found, Some(explicit));
    }
}
