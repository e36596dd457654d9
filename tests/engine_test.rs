//! End-to-end engine tests against real external tools. Each test skips
//! gracefully when the required tool is not installed, so the suite stays
//! runnable on minimal machines.

use anyhow::Result;
use std::io::Write;
use std::sync::LazyLock;

use stepviz::config::Config;
use stepviz::engines::{EngineRequest, Tracer};
use stepviz::error::TraceError;

// The engines share fixed artifact paths, so tests that really run an
// engine must not overlap (same discipline the orchestrator enforces
// within one Tracer).
static ENGINE_GATE: LazyLock<tokio::sync::Mutex<()>> = LazyLock::new(|| tokio::sync::Mutex::new(()));

fn tool_available(program: &str) -> bool {
    std::process::Command::new(program)
        .arg("--version")
        .output()
        .is_ok()
}

#[tokio::test]
async fn python_trace_matches_line_by_line_execution() -> Result<()> {
    let _gate = ENGINE_GATE.lock().await;
    let cfg = Config::load();
    if !tool_available(&cfg.python_bin()) {
        println!("Skipping test - {} not available", cfg.python_bin());
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let source_path = dir.path().join("demo.py");
    let mut f = std::fs::File::create(&source_path)?;
    write!(f, "x = 1\ny = x + 1\nprint(y)\n")?;
    drop(f);

    let request = EngineRequest::from_path(source_path)?;
    let trace = Tracer::new(cfg).run(&request).await?;

    assert_eq!(trace.len(), 3);
    assert!(trace.steps.iter().all(|s| s.line >= 1 && s.line <= 3));
    assert_eq!(
        trace.steps.iter().map(|s| s.line).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    // x is unset before line 1 executes, then visible as "1"; y appears
    // from the step after its assignment.
    assert!(trace.steps[0].vars.get("x").is_none());
    assert_eq!(trace.steps[1].vars.get("x").map(String::as_str), Some("1"));
    assert_eq!(trace.steps[2].vars.get("x").map(String::as_str), Some("1"));
    assert!(trace.steps[1].vars.get("y").is_none());
    assert_eq!(trace.steps[2].vars.get("y").map(String::as_str), Some("2"));
    Ok(())
}

#[tokio::test]
async fn python_trace_is_idempotent_for_deterministic_programs() -> Result<()> {
    let _gate = ENGINE_GATE.lock().await;
    let cfg = Config::load();
    if !tool_available(&cfg.python_bin()) {
        println!("Skipping test - {} not available", cfg.python_bin());
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let source_path = dir.path().join("loop.py");
    std::fs::write(&source_path, "total = 0\nfor i in range(3):\n    total += i\n")?;

    let request = EngineRequest::from_path(source_path)?;
    let tracer = Tracer::new(cfg);
    let first = tracer.run(&request).await?;
    let second = tracer.run(&request).await?;

    assert_eq!(first.len(), second.len());
    assert_eq!(
        first.steps.iter().map(|s| s.line).collect::<Vec<_>>(),
        second.steps.iter().map(|s| s.line).collect::<Vec<_>>()
    );
    Ok(())
}

#[tokio::test]
async fn native_compile_error_surfaces_compiler_diagnostics() -> Result<()> {
    let _gate = ENGINE_GATE.lock().await;
    let cfg = Config::load();
    if !tool_available(&cfg.c_compiler()) {
        println!("Skipping test - {} not available", cfg.c_compiler());
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let source_path = dir.path().join("broken.c");
    std::fs::write(&source_path, "int main() { this is not C }\n")?;

    let request = EngineRequest::from_path(source_path)?;
    let err = Tracer::new(cfg).run(&request).await.unwrap_err();
    match err {
        // The compile step fails before any debugger is launched.
        TraceError::CompilationFailed { diagnostics } => {
            assert!(diagnostics.contains("error"), "diagnostics: {diagnostics}");
        }
        other => panic!("expected CompilationFailed, got: {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn unsupported_extension_fails_without_spawning_anything() -> Result<()> {
    let err = EngineRequest::from_path("/tmp/script.rb".into()).unwrap_err();
    match err {
        TraceError::UnsupportedLanguage { extension } => assert_eq!(extension, "rb"),
        other => panic!("expected UnsupportedLanguage, got: {other}"),
    }
    Ok(())
}
