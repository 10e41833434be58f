#[macro_use]
extern crate tracing;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};

pub mod width;

pub use crate::width::{Width, DEFAULT_PRECISION};

#[derive(knuffel::Decode, Debug, Default, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub width: Width,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }

    /// Parses the commented config shipped in `resources/`.
    pub fn shipped() -> Result<Self, knuffel::Error> {
        Self::parse(
            "default-config.kdl",
            include_str!("../../resources/default-config.kdl"),
        )
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn shipped_config_matches_default() {
        let shipped = Config::shipped().map_err(miette::Report::new).unwrap();
        assert_eq!(shipped, Config::default());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let parsed = do_parse("");
        assert_eq!(parsed.width.precision, DEFAULT_PRECISION);
        assert!(!parsed.width.clamp_input);
    }

    #[test]
    fn empty_width_section_uses_defaults() {
        let parsed = do_parse("width {}");
        assert_eq!(parsed.width, Width::default());
    }

    #[test]
    fn parse() {
        let parsed = do_parse(
            r##"
            width {
                precision 2
                clamp-input
            }
            "##,
        );

        assert_debug_snapshot!(parsed, @r"
        Config {
            width: Width {
                precision: 2,
                clamp_input: true,
            },
        }
        ");
    }

    #[test]
    fn unknown_node_is_an_error() {
        assert!(Config::parse("test.kdl", "height { precision 1; }").is_err());
    }

    #[test]
    fn negative_precision_is_an_error() {
        assert!(Config::parse("test.kdl", "width { precision -1; }").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/column-block/config.kdl")).unwrap_err();
        assert!(err.to_string().starts_with("error reading"));
    }
}
