//! Managed engine: compile with `javac -g`, then drive jdb through a
//! scripted stdin session.
//!
//! jdb has no batch-script mode, and its protocol gives no structural
//! end-of-program signal to wait on, so the session writes a fixed number
//! of `locals`/`step` pairs up front. A bound beyond the program's real
//! length yields trailing no-op output; premature truncation of very long
//! programs is an accepted limitation.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::TraceError;
use crate::parse;
use crate::process;
use crate::trace::Trace;

pub async fn run(cfg: &Config, file_path: &Path) -> Result<Trace, TraceError> {
    let jdb = cfg.jdb_bin();
    let cwd = file_path.parent();
    let class_name = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| TraceError::ProcessLaunchError {
            program: jdb.clone(),
            detail: format!("cannot derive class name from {}", file_path.display()),
        })?
        .to_string();

    let javac = cfg.javac_bin();
    info!(%javac, source = %file_path.display(), "compiling with debug symbols");
    let compile = process::run_batch(&javac, &["-g", &file_path.to_string_lossy()], cwd).await?;
    if !compile.success {
        return Err(TraceError::CompilationFailed {
            diagnostics: compile.stderr,
        });
    }

    let script = render_session_script(&class_name, cfg.step_limit());

    info!(%class_name, "stepping target under jdb");
    let session = process::run_scripted(&jdb, &["-classpath", ".", &class_name], cwd, &script).await?;
    debug!(stdout_len = session.stdout.len(), "jdb session finished");

    let steps = parse::parse_jdb_transcript(&session.stdout)?;
    Ok(Trace::from_steps(steps))
}

/// Build the full command sequence fed to jdb's stdin: break at the entry
/// point, run, a bounded series of inspect/step pairs, then quit.
fn render_session_script(class_name: &str, step_limit: usize) -> String {
    let mut script = String::new();
    script.push_str(&format!("stop in {class_name}.main\n"));
    script.push_str("run\n");
    for _ in 0..step_limit {
        script.push_str("locals\n");
        script.push_str("step\n");
    }
    script.push_str("quit\n");
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_script_is_bounded_and_terminated() {
        let script = render_session_script("Main", 3);
        assert!(script.starts_with("stop in Main.main\nrun\n"));
        assert_eq!(script.matches("locals\n").count(), 3);
        assert_eq!(script.matches("step\n").count(), 3);
        assert!(script.ends_with("quit\n"));
    }
}
