//! Native engine: compile with debug symbols, then drive gdb through a
//! non-interactive batch script.
//!
//! The generated script turns off pretty-printing and array truncation so
//! composite values serialize on one line (the parser is line-oriented),
//! breaks at `main` and then steps in a capped loop. gdb stops producing
//! stepping output once the target exits, so the cap only has to exceed
//! the program's real step count; overshoot is harmless trailing noise.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::TraceError;
use crate::parse;
use crate::process;
use crate::trace::Trace;

pub async fn run(cfg: &Config, file_path: &Path, is_cpp: bool) -> Result<Trace, TraceError> {
    let compiler = if is_cpp {
        cfg.cpp_compiler()
    } else {
        cfg.c_compiler()
    };
    let exe_path = cfg.native_executable_path();
    let cwd = file_path.parent();

    tokio::fs::create_dir_all(cfg.artifact_dir())
        .await
        .map_err(|e| artifact_error(&compiler, e))?;

    info!(%compiler, source = %file_path.display(), "compiling with debug symbols");
    let compile = process::run_batch(
        &compiler,
        &[
            "-g",
            &file_path.to_string_lossy(),
            "-o",
            &exe_path.to_string_lossy(),
        ],
        cwd,
    )
    .await?;
    if !compile.success {
        return Err(TraceError::CompilationFailed {
            diagnostics: compile.stderr,
        });
    }

    let script = render_debugger_script(&exe_path, cfg.step_limit());
    let script_path = cfg.debugger_script_path();
    let gdb = cfg.gdb_bin();
    tokio::fs::write(&script_path, script)
        .await
        .map_err(|e| artifact_error(&gdb, e))?;

    info!("stepping target under gdb");
    let session = process::run_batch(
        &gdb,
        &["--batch", "-x", &script_path.to_string_lossy()],
        None,
    )
    .await?;
    debug!(stdout_len = session.stdout.len(), "gdb session finished");

    // gdb often exits non-zero when the target ends mid-script; the
    // transcript decides success, not the exit code.
    let steps = parse::parse_gdb_transcript(&session.stdout)?;
    Ok(Trace::from_steps(steps))
}

/// Render the gdb command script for one run.
///
/// The step loop is bounded by a convenience-variable counter instead of
/// `while 1`; gdb itself stops emitting step output once the inferior
/// exits, the counter just guarantees the session cannot run away.
fn render_debugger_script(exe_path: &Path, step_limit: usize) -> String {
    let exe = exe_path.to_string_lossy().replace('\\', "/");
    format!(
        "file \"{exe}\"\n\
         set print pretty off\n\
         set print array off\n\
         set pagination off\n\
         break main\n\
         run\n\
         set $steps = 0\n\
         while $steps < {step_limit}\n\
         \x20   info source\n\
         \x20   info locals\n\
         \x20   step\n\
         \x20   set $steps = $steps + 1\n\
         end\n\
         quit\n"
    )
}

fn artifact_error(program: &str, err: std::io::Error) -> TraceError {
    TraceError::ProcessLaunchError {
        program: program.to_string(),
        detail: format!("cannot write driver artifact: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn script_disables_pretty_printing_and_caps_the_loop() {
        let script = render_debugger_script(&PathBuf::from("/tmp/stepviz/target.out"), 50);
        assert!(script.contains("set print pretty off"));
        assert!(script.contains("set pagination off"));
        assert!(script.contains("break main"));
        assert!(script.contains("while $steps < 50"));
        assert!(script.ends_with("quit\n"));
    }

    #[test]
    fn script_normalizes_backslashes_in_the_executable_path() {
        let script = render_debugger_script(&PathBuf::from(r"C:\tmp\target.out"), 10);
        assert!(script.contains("file \"C:/tmp/target.out\""));
    }
}
