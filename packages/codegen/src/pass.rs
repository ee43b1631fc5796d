//! Bridge Pass
//!
//! Host-facing driver: runs discovery over one compilation round, then emits
//! the accumulated unit. Emission failures are logged with full context and
//! the round's output is skipped; they never abort the host compilation.

use crate::config::GeneratorOptions;
use crate::declaration::CompilationRound;
use crate::discovery::DiscoveryPass;
use crate::logging::Logger;
use crate::output::Emitter;
use anyhow::Context as _;
use std::path::PathBuf;

pub struct BridgePass<'a> {
    options: GeneratorOptions,
    logger: &'a dyn Logger,
}

impl<'a> BridgePass<'a> {
    pub fn new(options: GeneratorOptions, logger: &'a dyn Logger) -> Self {
        BridgePass { options, logger }
    }

    /// Processes one round end to end. Returns the path of the written unit,
    /// or `None` when the round produced nothing or emission failed.
    pub fn process(&self, round: &CompilationRound) -> Option<PathBuf> {
        let unit = DiscoveryPass::new(&self.options, self.logger).run(round)?;

        match Emitter::new(&self.options, self.logger)
            .emit(&unit)
            .with_context(|| format!("skipping emission of generated unit `{}`", unit.unit_name))
        {
            Ok(path) => path,
            Err(err) => {
                self.logger.error(&format!("{:#}", err));
                None
            }
        }
    }
}
