//! Generator Options
//!
//! Configuration threaded in from the host build; every field has a default
//! so an empty option set is valid.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Name of the concurrent scope generated bodies launch onto.
    pub scope_name: String,
    /// Output directory of the generated unit, excluding the package path.
    pub output_directory: String,
    /// Target package of the generated unit. Empty means "use the package of
    /// the first discovered declaration".
    pub package_name: String,
    /// Additional import statements, `&`-delimited fully-qualified names.
    pub imports: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            scope_name: "mainScope".to_string(),
            output_directory: "src/commonMain/kotlin".to_string(),
            package_name: String::new(),
            imports: String::new(),
        }
    }
}

impl GeneratorOptions {
    /// Parses options from the JSON blob the host build hands over.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let options: GeneratorOptions = serde_json::from_str(json)?;
        Ok(options)
    }

    /// Splits the `&`-delimited import list into (package, simple name)
    /// pairs. Blank entries are dropped.
    pub fn split_imports(&self) -> Vec<(String, String)> {
        self.imports
            .split('&')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.rfind('.') {
                Some(dot) => (entry[..dot].to_string(), entry[dot + 1..].to_string()),
                None => (String::new(), entry.to_string()),
            })
            .collect()
    }
}
