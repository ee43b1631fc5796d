//! Emitter Tests

use kotbridge_codegen::declaration::{CompilationRound, SUSPEND_BRIDGE};
use kotbridge_codegen::logging::NullLogger;
use kotbridge_codegen::output::{Emitter, GenerationUnit};
use kotbridge_codegen::testing::FunctionFixture;
use kotbridge_codegen::{BridgePass, GeneratorOptions};
use std::fs;
use std::path::{Path, PathBuf};

fn temp_project(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "kotbridge-emitter-{}-{}",
        tag,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn round_in(project: &Path) -> CompilationRound {
    CompilationRound::new(vec![FunctionFixture::new("fetchValue")
        .suspending()
        .annotation(SUSPEND_BRIDGE)
        .param("id", "kotlin.Int")
        .returns("kotlin.String")
        .project_folder(project.to_str().unwrap())
        .into_declaration()])
}

#[test]
fn should_not_write_anything_for_an_empty_unit() {
    let project = temp_project("empty-unit");
    let unit = GenerationUnit::new("com.example", project.to_str().unwrap());
    let options = GeneratorOptions::default();
    let logger = NullLogger::new();

    let written = Emitter::new(&options, &logger).emit(&unit).unwrap();
    assert!(written.is_none());
    assert!(!project.join("src").exists());
    let _ = fs::remove_dir_all(&project);
}

#[test]
fn should_not_write_anything_for_a_round_without_matches() {
    let project = temp_project("no-match");
    let round = CompilationRound::new(vec![FunctionFixture::new("plain")
        .project_folder(project.to_str().unwrap())
        .into_declaration()]);
    let logger = NullLogger::new();

    let written = BridgePass::new(GeneratorOptions::default(), &logger).process(&round);
    assert!(written.is_none());
    assert!(!project.join("src").exists());
    let _ = fs::remove_dir_all(&project);
}

#[test]
fn should_write_the_unit_under_the_package_path() {
    let project = temp_project("write");
    let logger = NullLogger::new();

    let written = BridgePass::new(GeneratorOptions::default(), &logger)
        .process(&round_in(&project))
        .expect("a written unit");
    assert_eq!(
        written,
        project
            .join("src/commonMain/kotlin")
            .join("com/example")
            .join("BridgeExtensions.kt")
    );

    let source = fs::read_to_string(&written).unwrap();
    assert!(source.starts_with("package com.example\n"));
    assert!(source.contains("fun Owner.fetchValue("));
    let _ = fs::remove_dir_all(&project);
}

#[test]
fn should_overwrite_an_existing_unit() {
    let project = temp_project("overwrite");
    let logger = NullLogger::new();
    let pass = BridgePass::new(GeneratorOptions::default(), &logger);

    let written = pass.process(&round_in(&project)).expect("first write");
    fs::write(&written, "stale content").unwrap();

    let rewritten = pass.process(&round_in(&project)).expect("second write");
    assert_eq!(written, rewritten);
    let source = fs::read_to_string(&rewritten).unwrap();
    assert!(source.starts_with("package com.example\n"));
    assert!(!source.contains("stale content"));
    let _ = fs::remove_dir_all(&project);
}

#[test]
fn should_truncate_a_project_folder_that_points_into_the_output_directory() {
    let project = temp_project("truncate");
    // Hosts sometimes report the folder of the declaration itself, which
    // already sits inside the output directory.
    let reported = project
        .join("src/commonMain/kotlin")
        .join("com/example");
    let round = CompilationRound::new(vec![FunctionFixture::new("fetchValue")
        .suspending()
        .annotation(SUSPEND_BRIDGE)
        .project_folder(reported.to_str().unwrap())
        .into_declaration()]);
    let logger = NullLogger::new();

    let written = BridgePass::new(GeneratorOptions::default(), &logger)
        .process(&round)
        .expect("a written unit");
    assert_eq!(
        written,
        project
            .join("src/commonMain/kotlin")
            .join("com/example")
            .join("BridgeExtensions.kt")
    );
    let _ = fs::remove_dir_all(&project);
}

#[test]
fn should_respect_a_configured_output_directory() {
    let project = temp_project("custom-dir");
    let options =
        GeneratorOptions::from_json(r#"{"outputDirectory": "generated/kotlin"}"#).unwrap();
    let logger = NullLogger::new();

    let written = BridgePass::new(options, &logger)
        .process(&round_in(&project))
        .expect("a written unit");
    assert_eq!(
        written,
        project
            .join("generated/kotlin")
            .join("com/example")
            .join("BridgeExtensions.kt")
    );
    let _ = fs::remove_dir_all(&project);
}
