use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::similarity::Measure;

/// File name of the bundled ontology.
pub const OBO_FILE_NAME: &str = "go-basic.obo";

/// File name of the bundled UniProt/Swiss-Prot association table.
pub const ASSOCIATIONS_FILE_NAME: &str = "associations-uniprot-sp-20200116.tab";

/// Where `download-data` fetches the ontology from by default.
pub const DEFAULT_OBO_URL: &str = "http://purl.obolibrary.org/obo/go/go-basic.obo";

/// Returns the default directory for resource data.
/// Uses the platform data directory: ~/.local/share/megago/ on Linux.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("megago")
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Command-line flags are
/// applied on top with `with_overrides`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the resource files (MEGAGO_DATA_DIR)
    pub data_dir: PathBuf,
    /// OBO ontology file (MEGAGO_OBO_PATH, defaults to `<data_dir>/go-basic.obo`)
    pub obo_path: PathBuf,
    /// Association table (MEGAGO_ASSOCIATIONS_PATH)
    pub associations_path: PathBuf,
    /// Download source for the ontology (MEGAGO_OBO_URL)
    pub obo_url: String,
    /// Download source for the association table (MEGAGO_ASSOCIATIONS_URL).
    /// There is no public copy of the bundled table, so this has no default.
    pub associations_url: Option<String>,
    /// Similarity measure (MEGAGO_MEASURE, default simRel)
    pub measure: Measure,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from any variable lookup. Empty values count as unset.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let data_dir = var("MEGAGO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let obo_path = var("MEGAGO_OBO_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(OBO_FILE_NAME));
        let associations_path = var("MEGAGO_ASSOCIATIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(ASSOCIATIONS_FILE_NAME));
        let measure = match var("MEGAGO_MEASURE") {
            Some(value) => value.parse()?,
            None => Measure::default(),
        };

        Ok(Self {
            data_dir,
            obo_path,
            associations_path,
            obo_url: var("MEGAGO_OBO_URL").unwrap_or_else(|| DEFAULT_OBO_URL.to_string()),
            associations_url: var("MEGAGO_ASSOCIATIONS_URL"),
            measure,
        })
    }

    /// Apply command-line flags on top of the environment.
    pub fn with_overrides(
        mut self,
        obo: Option<PathBuf>,
        associations: Option<PathBuf>,
        measure: Option<Measure>,
    ) -> Self {
        if let Some(path) = obo {
            self.obo_path = path;
        }
        if let Some(path) = associations {
            self.associations_path = path;
        }
        if let Some(measure) = measure {
            self.measure = measure;
        }
        self
    }

    /// Check that both resource files exist.
    /// Call this before any command that computes similarities.
    pub fn require_resources(&self) -> Result<()> {
        if !self.obo_path.exists() {
            anyhow::bail!(
                "Ontology file not found: {}\n\
                 Run `megago download-data` to fetch it, or point MEGAGO_OBO_PATH / --obo at a go-basic.obo.",
                self.obo_path.display()
            );
        }
        if !self.associations_path.exists() {
            anyhow::bail!(
                "Association file not found: {}\n\
                 Set MEGAGO_ASSOCIATIONS_PATH or pass --associations with a protein → GO table or GAF file.",
                self.associations_path.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_data_dir_is_under_megago() {
        let dir = default_data_dir();
        assert!(dir.ends_with("megago"), "got {}", dir.display());
    }

    #[test]
    fn test_paths_default_into_data_dir() {
        let config = config_from(&[("MEGAGO_DATA_DIR", "/tmp/megago-data")]).unwrap();
        assert_eq!(config.obo_path, PathBuf::from("/tmp/megago-data/go-basic.obo"));
        assert_eq!(
            config.associations_path,
            PathBuf::from("/tmp/megago-data").join(ASSOCIATIONS_FILE_NAME)
        );
        assert_eq!(config.obo_url, DEFAULT_OBO_URL);
        assert!(config.associations_url.is_none());
        assert_eq!(config.measure, Measure::Rel);
    }

    #[test]
    fn test_explicit_paths_and_measure() {
        let config = config_from(&[
            ("MEGAGO_OBO_PATH", "/data/go.obo"),
            ("MEGAGO_MEASURE", "lin"),
            ("MEGAGO_ASSOCIATIONS_URL", ""),
        ])
        .unwrap();
        assert_eq!(config.obo_path, PathBuf::from("/data/go.obo"));
        assert_eq!(config.measure, Measure::Lin);
        assert!(config.associations_url.is_none());
    }

    #[test]
    fn test_invalid_measure_is_an_error() {
        assert!(config_from(&[("MEGAGO_MEASURE", "cosine")]).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = config_from(&[])
            .unwrap()
            .with_overrides(Some(PathBuf::from("a.obo")), None, Some(Measure::Resnik));
        assert_eq!(config.obo_path, PathBuf::from("a.obo"));
        assert_eq!(config.measure, Measure::Resnik);
    }

    #[test]
    fn test_require_resources_names_missing_file() {
        let config = config_from(&[("MEGAGO_DATA_DIR", "/nonexistent/megago-test")]).unwrap();
        let err = config.require_resources().unwrap_err().to_string();
        assert!(err.contains("go-basic.obo"), "got {err}");
    }
}
