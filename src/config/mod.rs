use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(alias = "file_path")]
    pub target: Option<String>,
    pub marker: Option<String>,
    pub payload: Option<String>,
    pub payload_inline: Option<String>,
    pub dry_run: Option<bool>,
    pub skip_if_present: Option<bool>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".scriptsplice").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn parse_config(contents: &str, path: &Path) -> Result<ConfigFile, String> {
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents)
        .map_err(|e| format!("failed to parse config '{}': {e}", path.display()))
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

fn default_config_yaml() -> String {
    r#"# scriptsplice config
#
# Location (default):
#   ~/.scriptsplice/config.yml

# Document to patch
# target: ./callsanta/index.html

# Insertion point: the payload goes right before the LAST occurrence.
marker: "</script>"

# Payload (optional). Without either key the built-in checkout block is used.
# payload: ./restored.js
# payload_inline: "console.log('patched');"

# Behavior
dry_run: false
# Refuse to insert a payload the document already contains.
skip_if_present: false

# Output
output_format: text
no_color: false
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &Path) -> Result<bool, String> {
    if path.exists() {
        return Ok(false);
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    let contents = default_config_yaml();
    std::fs::write(path, contents)
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(true)
}
