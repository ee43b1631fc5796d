//! Test Support
//!
//! Builder for fixture function declarations, standing in for a live host
//! compiler in tests.

use crate::declaration::{
    AnnotationDecl, Declaration, FunctionDecl, ParameterDecl, TypeRef, Visibility,
};
use indexmap::IndexMap;

pub struct FunctionFixture {
    func: FunctionDecl,
}

impl FunctionFixture {
    /// Starts a public, non-suspending, no-parameter, no-return function on
    /// `com.example.Owner` in module `common` of project folder `/project`.
    pub fn new(name: &str) -> Self {
        FunctionFixture {
            func: FunctionDecl {
                name: name.to_string(),
                owner: TypeRef::new("com.example", "Owner"),
                package: "com.example".to_string(),
                is_suspend: false,
                visibility: Visibility::Public,
                return_type: None,
                parameters: Vec::new(),
                annotations: Vec::new(),
                module_name: "common".to_string(),
                project_folder: "/project".to_string(),
            },
        }
    }

    pub fn owner(mut self, package: &str, name: &str) -> Self {
        self.func.owner = TypeRef::new(package, name);
        self.func.package = package.to_string();
        self
    }

    pub fn suspending(mut self) -> Self {
        self.func.is_suspend = true;
        self
    }

    pub fn internal(mut self) -> Self {
        self.func.visibility = Visibility::Internal;
        self
    }

    /// Sets the return type from its textual fully-qualified form.
    pub fn returns(mut self, fq_type: &str) -> Self {
        self.func.return_type = Some(TypeRef::parse(fq_type));
        self
    }

    pub fn param(mut self, name: &str, fq_type: &str) -> Self {
        self.func
            .parameters
            .push(ParameterDecl::new(name, TypeRef::parse(fq_type), false));
        self
    }

    pub fn nullable_param(mut self, name: &str, fq_type: &str) -> Self {
        self.func
            .parameters
            .push(ParameterDecl::new(name, TypeRef::parse(fq_type), true));
        self
    }

    pub fn annotation(mut self, fq_name: &str) -> Self {
        self.func.annotations.push(AnnotationDecl::new(fq_name));
        self
    }

    pub fn annotation_with_args(mut self, fq_name: &str, args: &[(&str, &str)]) -> Self {
        let arguments: IndexMap<String, String> = args
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self.func
            .annotations
            .push(AnnotationDecl::with_arguments(fq_name, arguments));
        self
    }

    pub fn project_folder(mut self, folder: &str) -> Self {
        self.func.project_folder = folder.to_string();
        self
    }

    pub fn build(self) -> FunctionDecl {
        self.func
    }

    pub fn into_declaration(self) -> Declaration {
        Declaration::Function(self.func)
    }
}
