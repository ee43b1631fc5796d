//! Discovery Pass
//!
//! Scans the declaration set of one compilation round for marker-annotated
//! functions and forwards them to the generator in encounter order. Owns the
//! round's accumulator: the generation unit is created by the generator on
//! the first match and returned once the scan completes.

use crate::config::GeneratorOptions;
use crate::declaration::{CompilationRound, Declaration, FLOW_BRIDGE, SUSPEND_BRIDGE};
use crate::generator::Generator;
use crate::logging::Logger;
use crate::output::kotlin::GenerationUnit;
use once_cell::sync::Lazy;
use std::collections::HashSet;

static SUPPORTED_ANNOTATION_TYPES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| [SUSPEND_BRIDGE, FLOW_BRIDGE].into_iter().collect());

/// The marker names this pass reacts to.
pub fn supported_annotation_types() -> &'static HashSet<&'static str> {
    &SUPPORTED_ANNOTATION_TYPES
}

pub struct DiscoveryPass<'a> {
    options: &'a GeneratorOptions,
    logger: &'a dyn Logger,
}

impl<'a> DiscoveryPass<'a> {
    pub fn new(options: &'a GeneratorOptions, logger: &'a dyn Logger) -> Self {
        DiscoveryPass { options, logger }
    }

    /// Runs the scan. Returns the accumulated unit, or `None` when the round
    /// holds no qualifying declaration. Unmatched declarations are never an
    /// error.
    pub fn run(&self, round: &CompilationRound) -> Option<GenerationUnit> {
        let mut generator = Generator::new(self.options, self.logger);

        for declaration in &round.declarations {
            let func = match declaration {
                Declaration::Function(func) => func,
                Declaration::Other { name, annotations } => {
                    if annotations.iter().any(|annotation| {
                        SUPPORTED_ANNOTATION_TYPES
                            .contains(annotation.type_ref.fq_name().as_str())
                    }) {
                        self.logger
                            .debug(&format!("`{}` is not a function, skipping", name));
                    }
                    continue;
                }
            };

            if func.has_annotation(SUSPEND_BRIDGE) {
                // Sanity check: the marker on a non-suspending declaration is
                // skipped, not reported.
                if func.is_suspend {
                    self.logger.info(&format!(
                        "found suspended function `{}` in module `{}`",
                        func.name, func.module_name
                    ));
                    generator.synthesize(func, false);
                } else {
                    self.logger.warn(&format!(
                        "`{}` carries the suspend marker but does not suspend, skipping",
                        func.name
                    ));
                }
            } else if func.has_annotation(FLOW_BRIDGE) {
                self.logger.info(&format!(
                    "found flow function `{}` in module `{}`",
                    func.name, func.module_name
                ));
                generator.synthesize(func, true);
            }
        }

        generator.finish()
    }
}
