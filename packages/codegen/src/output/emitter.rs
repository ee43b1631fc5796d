//! Emitter
//!
//! Serializes a finalized generation unit to disk, once, at the end of the
//! round. An empty unit produces no write at all.

use crate::config::GeneratorOptions;
use crate::error::EmitError;
use crate::logging::Logger;
use crate::output::kotlin::GenerationUnit;
use std::fs;
use std::path::PathBuf;

pub struct Emitter<'a> {
    options: &'a GeneratorOptions,
    logger: &'a dyn Logger,
}

impl<'a> Emitter<'a> {
    pub fn new(options: &'a GeneratorOptions, logger: &'a dyn Logger) -> Self {
        Emitter { options, logger }
    }

    /// Writes the unit under
    /// `<project root>/<output directory>/<package path>/<unit>.kt`,
    /// creating directories as needed and overwriting an existing file.
    /// Returns the written path, or `None` for an empty unit.
    pub fn emit(&self, unit: &GenerationUnit) -> Result<Option<PathBuf>, EmitError> {
        if unit.is_empty() {
            return Ok(None);
        }

        // The recorded project folder may already point inside the output
        // directory (Android builds do); truncate back to the project root.
        let root = match unit.project_folder.find(&self.options.output_directory) {
            Some(index) => &unit.project_folder[..index],
            None => unit.project_folder.as_str(),
        };

        let mut dir = PathBuf::from(root).join(&self.options.output_directory);
        for segment in unit.package_name.split('.').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        fs::create_dir_all(&dir).map_err(|source| EmitError::CreateDir {
            dir: dir.clone(),
            source,
        })?;

        let file = dir.join(unit.file_name());
        fs::write(&file, unit.render()).map_err(|source| EmitError::Write {
            unit: unit.unit_name.clone(),
            file: file.clone(),
            source,
        })?;

        self.logger.info(&format!(
            "wrote {} generated function(s) to {}",
            unit.functions.len(),
            file.display()
        ));
        Ok(Some(file))
    }
}
