//! Declaration Model
//!
//! Plain-data descriptions of the declarations a host compiler exposes during
//! one compilation round. The generator only consumes this surface; it never
//! defines how a host populates it, so fixtures can stand in for a live
//! compiler in tests.

use indexmap::IndexMap;
use std::fmt;

/// Fully-qualified name of the marker selecting suspend functions.
pub const SUSPEND_BRIDGE: &str = "io.kotbridge.annotations.SuspendBridge";

/// Fully-qualified name of the marker selecting flow functions.
pub const FLOW_BRIDGE: &str = "io.kotbridge.annotations.FlowBridge";

/// Kotlin package of the runtime collaborators referenced by generated code.
pub const RUNTIME_PACKAGE: &str = "io.kotbridge.runtime";

/// Simple name of the success/failure container used in generated callbacks.
pub const RESULT_TYPE: &str = "BridgeResult";

/// Simple name of the run-and-capture helper wrapped around suspend calls.
pub const RUN_CATCHING: &str = "suspendRunCatching";

/// A Kotlin type as package + simple name, with at most one generic argument.
///
/// One argument is all the generated shapes need: the element of a
/// `Flow<T>`, the payload of a `BridgeResult<T>`, the element of a
/// collection parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub package: String,
    pub name: String,
    pub argument: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef {
            package: package.into(),
            name: name.into(),
            argument: None,
        }
    }

    pub fn with_argument(
        package: impl Into<String>,
        name: impl Into<String>,
        argument: TypeRef,
    ) -> Self {
        TypeRef {
            package: package.into(),
            name: name.into(),
            argument: Some(Box::new(argument)),
        }
    }

    /// The sentinel used when a declaration has no return type.
    pub fn unit() -> Self {
        TypeRef::new("kotlin", "Unit")
    }

    /// Fully-qualified name without generic arguments.
    pub fn fq_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Best-effort parse of a textual fully-qualified type.
    ///
    /// Splits on `.` for the package boundary and unwraps a single level of
    /// `<...>` for the generic argument. This cannot tell a nested class from
    /// a package segment, does not resolve type aliases, and keeps only the
    /// first level of nested generics. Hosts that expose a structured type
    /// representation should build [`TypeRef`] values directly and leave this
    /// for textual-only adapters.
    pub fn parse(text: &str) -> TypeRef {
        let text = text.trim();
        let (raw, argument) = match (text.find('<'), text.rfind('>')) {
            (Some(open), Some(close)) if open < close => (
                text[..open].trim(),
                Some(Box::new(TypeRef::parse(&text[open + 1..close]))),
            ),
            _ => (text, None),
        };
        match raw.rfind('.') {
            Some(dot) => TypeRef {
                package: raw[..dot].to_string(),
                name: raw[dot + 1..].to_string(),
                argument,
            },
            None => TypeRef {
                package: String::new(),
                name: raw.to_string(),
                argument,
            },
        }
    }
}

impl fmt::Display for TypeRef {
    /// Kotlin rendering by simple name; imports carry the package.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(argument) = &self.argument {
            write!(f, "<{}>", argument)?;
        }
        Ok(())
    }
}

/// Visibility tiers the generator distinguishes. Everything that is not
/// internal is treated as public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Internal,
}

/// One value parameter of a function declaration, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub name: String,
    pub nullable: bool,
    pub type_ref: TypeRef,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, type_ref: TypeRef, nullable: bool) -> Self {
        ParameterDecl {
            name: name.into(),
            nullable,
            type_ref,
        }
    }
}

/// An annotation on a declaration, with its arguments in source order.
///
/// Argument values are kept as verbatim source text; the generator copies
/// them through without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDecl {
    pub type_ref: TypeRef,
    pub arguments: IndexMap<String, String>,
}

impl AnnotationDecl {
    pub fn new(fq_name: &str) -> Self {
        AnnotationDecl {
            type_ref: TypeRef::parse(fq_name),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_arguments(fq_name: &str, arguments: IndexMap<String, String>) -> Self {
        AnnotationDecl {
            type_ref: TypeRef::parse(fq_name),
            arguments,
        }
    }
}

/// A function declaration as seen mid-compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Simple name of the function.
    pub name: String,
    /// The type the function is declared on.
    pub owner: TypeRef,
    /// Package of the owning declaration.
    pub package: String,
    /// Whether the declaration is a suspending function.
    pub is_suspend: bool,
    pub visibility: Visibility,
    /// Declared return type, `None` for no-value functions.
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<ParameterDecl>,
    pub annotations: Vec<AnnotationDecl>,
    /// Name of the module the declaration was compiled in. Logging only.
    pub module_name: String,
    /// Folder of the project the declaration originates from; roots the
    /// output path of the generated unit.
    pub project_folder: String,
}

impl FunctionDecl {
    pub fn has_annotation(&self, fq_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|annotation| annotation.type_ref.fq_name() == fq_name)
    }
}

/// A declaration visible in a compilation round. Only functions qualify for
/// generation; other kinds exist so discovery can classify and skip them.
#[derive(Debug, Clone)]
pub enum Declaration {
    Function(FunctionDecl),
    /// A class, property or other non-function declaration.
    Other {
        name: String,
        annotations: Vec<AnnotationDecl>,
    },
}

impl Declaration {
    pub fn annotations(&self) -> &[AnnotationDecl] {
        match self {
            Declaration::Function(func) => &func.annotations,
            Declaration::Other { annotations, .. } => annotations,
        }
    }
}

/// The complete declaration set of one compilation round, in encounter order.
#[derive(Debug, Clone, Default)]
pub struct CompilationRound {
    pub declarations: Vec<Declaration>,
}

impl CompilationRound {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        CompilationRound { declarations }
    }

    /// All declarations carrying the given annotation, in encounter order.
    pub fn elements_annotated_with<'a>(
        &'a self,
        fq_name: &'a str,
    ) -> impl Iterator<Item = &'a Declaration> {
        self.declarations.iter().filter(move |declaration| {
            declaration
                .annotations()
                .iter()
                .any(|annotation| annotation.type_ref.fq_name() == fq_name)
        })
    }
}
