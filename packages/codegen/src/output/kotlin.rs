//! Kotlin Output Model
//!
//! In-memory form of the generated unit: one file-level buffer of wrapper
//! functions plus the import set they need, and the rendering that turns it
//! into Kotlin source.

use crate::declaration::{TypeRef, Visibility, RESULT_TYPE, RUN_CATCHING};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Write as _;

const INDENT_WITH: &str = "    ";

lazy_static::lazy_static! {
    static ref LEGAL_IDENTIFIER_RE: regex::Regex =
        regex::Regex::new(r"^[a-zA-Z_][0-9a-zA-Z_]*$").unwrap();

    /// Kotlin hard keywords; identifiers colliding with these need backticks.
    static ref KOTLIN_KEYWORDS: HashSet<&'static str> = [
        "as", "break", "class", "continue", "do", "else", "false", "for",
        "fun", "if", "in", "interface", "is", "null", "object", "package",
        "return", "super", "this", "throw", "true", "try", "typealias",
        "typeof", "val", "var", "when", "while",
    ]
    .into_iter()
    .collect();
}

/// Escapes an identifier with backticks when Kotlin would reject it bare.
pub fn escape_identifier(name: &str) -> String {
    if LEGAL_IDENTIFIER_RE.is_match(name) && !KOTLIN_KEYWORDS.contains(name) {
        name.to_string()
    } else {
        format!("`{}`", name)
    }
}

/// Line-oriented writer tracking the current indent level.
pub struct EmitterContext {
    out: String,
    indent: usize,
}

impl EmitterContext {
    pub fn create_root() -> Self {
        EmitterContext {
            out: String::new(),
            indent: 0,
        }
    }

    pub fn println(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str(INDENT_WITH);
            }
            self.out.push_str(line);
        }
        self.out.push('\n');
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn to_source(self) -> String {
        self.out
    }
}

/// Which wrapper shape a function gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperKind {
    /// Single value or failure, delivered once through the result container.
    Suspend,
    /// Zero or more raw elements, one callback invocation each.
    Stream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub nullable: bool,
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    pub type_ref: TypeRef,
    pub arguments: IndexMap<String, String>,
}

impl AnnotationSpec {
    fn render(&self) -> String {
        if self.arguments.is_empty() {
            format!("@{}", self.type_ref)
        } else {
            let arguments = self
                .arguments
                .iter()
                .map(|(key, value)| format!("{} = {}", key, value))
                .collect::<Vec<_>>()
                .join(", ");
            format!("@{}({})", self.type_ref, arguments)
        }
    }
}

/// One synthesized callback-based wrapper function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Same name as the wrapped declaration; the callback parameter keeps the
    /// signatures distinct.
    pub name: String,
    /// Extension receiver, the owner type of the wrapped declaration.
    pub receiver: TypeRef,
    pub visibility: Visibility,
    pub annotations: Vec<AnnotationSpec>,
    pub parameters: Vec<ParameterSpec>,
    /// Payload type delivered to the callback.
    pub element: TypeRef,
    pub kind: WrapperKind,
    /// Scope the body launches onto.
    pub scope_name: String,
}

impl FunctionSpec {
    fn callback_payload(&self) -> String {
        match self.kind {
            WrapperKind::Suspend => format!("{}<{}>", RESULT_TYPE, self.element),
            WrapperKind::Stream => self.element.to_string(),
        }
    }

    fn original_call(&self) -> String {
        let arguments = self
            .parameters
            .iter()
            .map(|parameter| escape_identifier(&parameter.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", escape_identifier(&self.name), arguments)
    }

    fn write(&self, ctx: &mut EmitterContext) {
        for annotation in &self.annotations {
            ctx.println(&annotation.render());
        }

        let mut signature = String::new();
        if self.visibility == Visibility::Internal {
            signature.push_str("internal ");
        }
        let _ = write!(
            signature,
            "fun {}.{}(",
            self.receiver,
            escape_identifier(&self.name)
        );
        for parameter in &self.parameters {
            let _ = write!(
                signature,
                "{}: {}{}, ",
                escape_identifier(&parameter.name),
                parameter.type_ref,
                if parameter.nullable { "?" } else { "" }
            );
        }
        let _ = write!(
            signature,
            "callback: ({}) -> Unit) = {}.launch {{",
            self.callback_payload(),
            self.scope_name
        );
        ctx.println(&signature);

        ctx.inc_indent();
        match self.kind {
            WrapperKind::Suspend => {
                ctx.println(&format!(
                    "callback({}<{}> {{ {} }})",
                    RUN_CATCHING,
                    self.element,
                    self.original_call()
                ));
            }
            WrapperKind::Stream => {
                ctx.println(&format!("{}.collect {{", self.original_call()));
                ctx.inc_indent();
                ctx.println("callback(it)");
                ctx.dec_indent();
                ctx.println("}");
            }
        }
        ctx.dec_indent();
        ctx.println("}");
    }

    fn collect_imports(&self, unit_package: &str, imports: &mut BTreeSet<String>) {
        collect_type_imports(&self.receiver, unit_package, imports);
        collect_type_imports(&self.element, unit_package, imports);
        for parameter in &self.parameters {
            collect_type_imports(&parameter.type_ref, unit_package, imports);
        }
        for annotation in &self.annotations {
            collect_type_imports(&annotation.type_ref, unit_package, imports);
        }
    }
}

fn collect_type_imports(type_ref: &TypeRef, unit_package: &str, imports: &mut BTreeSet<String>) {
    if !type_ref.package.is_empty() && type_ref.package != unit_package {
        imports.insert(type_ref.fq_name());
    }
    if let Some(argument) = &type_ref.argument {
        collect_type_imports(argument, unit_package, imports);
    }
}

/// The accumulated buffer of synthesized wrappers for one compilation round.
///
/// Created lazily on the first discovered declaration and merged across all
/// matches of the round, whatever package they come from; the target package
/// is stamped exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationUnit {
    pub package_name: String,
    pub unit_name: String,
    /// Project folder of the first discovered declaration; roots the output
    /// path when the unit is emitted.
    pub project_folder: String,
    imports: BTreeSet<String>,
    pub functions: Vec<FunctionSpec>,
}

/// Fixed simple name of the generated unit.
pub const GENERATED_UNIT_NAME: &str = "BridgeExtensions";

impl GenerationUnit {
    pub fn new(package_name: impl Into<String>, project_folder: impl Into<String>) -> Self {
        GenerationUnit {
            package_name: package_name.into(),
            unit_name: GENERATED_UNIT_NAME.to_string(),
            project_folder: project_folder.into(),
            imports: BTreeSet::new(),
            functions: Vec::new(),
        }
    }

    /// Records an import. Unpackaged names need no import and are ignored.
    pub fn add_import(&mut self, package: &str, name: &str) {
        if !package.is_empty() {
            self.imports.insert(format!("{}.{}", package, name));
        }
    }

    pub fn push_function(&mut self, function: FunctionSpec) {
        self.functions.push(function);
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn file_name(&self) -> String {
        format!("{}.kt", self.unit_name)
    }

    /// Renders the unit as Kotlin source: package header, sorted imports,
    /// then every wrapper in synthesis order.
    pub fn render(&self) -> String {
        let mut imports = self.imports.clone();
        for function in &self.functions {
            function.collect_imports(&self.package_name, &mut imports);
        }
        imports.retain(|import| {
            import.rsplit_once('.').map(|(package, _)| package) != Some(self.package_name.as_str())
        });

        let mut ctx = EmitterContext::create_root();
        ctx.println(&format!("package {}", self.package_name));
        ctx.println("");
        for import in &imports {
            ctx.println(&format!("import {}", import));
        }
        if !imports.is_empty() {
            ctx.println("");
        }
        for (index, function) in self.functions.iter().enumerate() {
            if index > 0 {
                ctx.println("");
            }
            function.write(&mut ctx);
        }
        ctx.to_source()
    }
}
