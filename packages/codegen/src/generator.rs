//! Generator
//!
//! Synthesizes one callback-based wrapper per discovered declaration and
//! accumulates them into the round's generation unit. The unit is established
//! lazily on the first match; every later match is merged into it, whatever
//! package it comes from.

use crate::config::GeneratorOptions;
use crate::declaration::{
    FunctionDecl, TypeRef, FLOW_BRIDGE, RESULT_TYPE, RUNTIME_PACKAGE, RUN_CATCHING, SUSPEND_BRIDGE,
};
use crate::logging::Logger;
use crate::output::kotlin::{
    AnnotationSpec, FunctionSpec, GenerationUnit, ParameterSpec, WrapperKind,
};

pub struct Generator<'a> {
    options: &'a GeneratorOptions,
    logger: &'a dyn Logger,
    unit: Option<GenerationUnit>,
}

impl<'a> Generator<'a> {
    pub fn new(options: &'a GeneratorOptions, logger: &'a dyn Logger) -> Self {
        Generator {
            options,
            logger,
            unit: None,
        }
    }

    /// Derives the callback-based sibling of `func` and appends it to the
    /// round's unit. Called once per discovered declaration, in discovery
    /// order.
    pub fn synthesize(&mut self, func: &FunctionDecl, is_stream: bool) {
        let mut unit = match self.unit.take() {
            Some(unit) => unit,
            None => self.new_unit(func),
        };

        // The owner may live outside the unit's target package.
        unit.add_import(&func.package, &func.owner.name);

        let element = self.resolve_element_type(func, is_stream);

        let annotations = func
            .annotations
            .iter()
            .filter(|annotation| {
                let fq_name = annotation.type_ref.fq_name();
                fq_name != SUSPEND_BRIDGE && fq_name != FLOW_BRIDGE
            })
            .map(|annotation| AnnotationSpec {
                type_ref: annotation.type_ref.clone(),
                arguments: annotation.arguments.clone(),
            })
            .collect();

        let parameters = func
            .parameters
            .iter()
            .map(|parameter| ParameterSpec {
                name: parameter.name.clone(),
                nullable: parameter.nullable,
                type_ref: parameter.type_ref.clone(),
            })
            .collect();

        unit.push_function(FunctionSpec {
            name: func.name.clone(),
            receiver: func.owner.clone(),
            visibility: func.visibility,
            annotations,
            parameters,
            element,
            kind: if is_stream {
                WrapperKind::Stream
            } else {
                WrapperKind::Suspend
            },
            scope_name: self.options.scope_name.clone(),
        });

        self.unit = Some(unit);
    }

    /// Hands the accumulated unit back to the pass; `None` when nothing was
    /// synthesized.
    pub fn finish(self) -> Option<GenerationUnit> {
        self.unit
    }

    /// Stamps the unit from configuration and the first discovered
    /// declaration. Runs exactly once per round.
    fn new_unit(&self, func: &FunctionDecl) -> GenerationUnit {
        let package_name = if self.options.package_name.is_empty() {
            func.package.clone()
        } else {
            self.options.package_name.clone()
        };

        let mut unit = GenerationUnit::new(package_name, func.project_folder.clone());
        unit.add_import(RUNTIME_PACKAGE, RESULT_TYPE);
        unit.add_import(RUNTIME_PACKAGE, RUN_CATCHING);
        unit.add_import("kotlin", "Unit");
        unit.add_import("kotlinx.coroutines", "launch");
        unit.add_import("kotlinx.coroutines.flow", "collect");
        for (package, name) in self.options.split_imports() {
            unit.add_import(&package, &name);
        }

        self.logger.debug(&format!(
            "generation unit `{}` created for package `{}`",
            unit.unit_name, unit.package_name
        ));
        unit
    }

    /// Resolves the type delivered to the callback: the declared return type
    /// for suspend wrappers, the stripped element type for stream wrappers,
    /// the Unit sentinel when the declaration returns nothing.
    fn resolve_element_type(&self, func: &FunctionDecl, is_stream: bool) -> TypeRef {
        let Some(return_type) = &func.return_type else {
            return TypeRef::unit();
        };
        if !is_stream {
            return return_type.clone();
        }
        match &return_type.argument {
            Some(element) => (**element).clone(),
            None => {
                // The host gave no structured element type; keep the outer
                // type as a best-effort guess rather than failing the round.
                self.logger.warn(&format!(
                    "`{}` is marked as a flow function but its return type `{}` \
                     carries no element type; using it verbatim",
                    func.name,
                    return_type.fq_name()
                ));
                TypeRef::new(return_type.package.clone(), return_type.name.clone())
            }
        }
    }
}
