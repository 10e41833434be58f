use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::{ProjectDirs, UserDirs};
use git_version::git_version;

pub fn version() -> String {
    format!(
        "{} ({})",
        env!("CARGO_PKG_VERSION"),
        git_version!(fallback = "unknown commit"),
    )
}

/// Default config path, usually `$XDG_CONFIG_HOME/column-block/config.kdl`.
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = ProjectDirs::from("", "", "column-block")?
        .config_dir()
        .to_owned();
    path.push("config.kdl");
    Some(path)
}

pub fn expand_home(path: &Path) -> anyhow::Result<Option<PathBuf>> {
    if let Ok(rest) = path.strip_prefix("~") {
        let dirs = UserDirs::new().context("error retrieving home directory")?;
        Ok(Some([dirs.home_dir(), rest].iter().collect()))
    } else {
        Ok(None)
    }
}
