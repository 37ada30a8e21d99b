use crate::params::LfsParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON configuration of the `ridge_maps` tool.
#[derive(Debug, Deserialize)]
pub struct MapsToolConfig {
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub params: LfsParams,
    #[serde(default = "default_binarize")]
    pub binarize: bool,
    pub output: MapsOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct MapsOutputConfig {
    /// Directory receiving one report (and optional images) per input.
    pub dir: PathBuf,
    /// Also write the quality/direction maps and the binarized image as PNGs.
    #[serde(default)]
    pub save_images: bool,
}

fn default_binarize() -> bool {
    true
}

impl MapsOutputConfig {
    /// `<dir>/<input stem><suffix>`.
    pub fn path_for(&self, input: &Path, suffix: &str) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        self.dir.join(format!("{stem}{suffix}"))
    }
}

pub fn load_config(path: &Path) -> Result<MapsToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<MapsToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{"inputs": ["a.png"], "output": {"dir": "out"}}"#).unwrap();
        assert!(cfg.binarize);
        assert!(!cfg.output.save_images);
        assert_eq!(cfg.params, LfsParams::default());
        assert_eq!(
            cfg.output.path_for(Path::new("scans/a.png"), "_report.json"),
            PathBuf::from("out/a_report.json")
        );
    }

    #[test]
    fn params_override_is_partial() {
        let cfg = parse_config(
            r#"{"inputs": [], "binarize": false, "params": {"block_size": 16},
                "output": {"dir": "out", "save_images": true}}"#,
        )
        .unwrap();
        assert!(!cfg.binarize);
        assert_eq!(cfg.params.block_size, 16);
        assert_eq!(cfg.params.window_size, 24);
    }
}
