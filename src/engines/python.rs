//! Python engine: trace via the interpreter's line-trace hook.
//!
//! A driver script is rendered around the target path, written to the fixed
//! artifact location and run in batch mode. The driver installs a
//! `sys.settrace` callback confined to the target file, records
//! `{line, vars}` per executed line, and prints the whole log as JSON
//! between two sentinel markers. Locating the sentinels in stdout is the
//! success signal; the interpreter's exit code is not.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::TraceError;
use crate::process;
use crate::trace::{Trace, TraceStep};

const PAYLOAD_BEGIN: &str = "---STEPVIZ_TRACE_BEGIN---";
const PAYLOAD_END: &str = "---STEPVIZ_TRACE_END---";

pub async fn run(cfg: &Config, file_path: &Path) -> Result<Trace, TraceError> {
    let driver = render_driver(file_path);
    let driver_path = cfg.tracer_script_path();

    let python = cfg.python_bin();
    tokio::fs::create_dir_all(cfg.artifact_dir())
        .await
        .map_err(|e| artifact_error(&python, e))?;
    tokio::fs::write(&driver_path, driver)
        .await
        .map_err(|e| artifact_error(&python, e))?;

    info!(target_file = %file_path.display(), "running python tracer");
    let out = process::run_batch(&python, &[&driver_path.to_string_lossy()], None).await?;
    debug!(stdout_len = out.stdout.len(), "python tracer finished");

    let payload = extract_payload(&out.stdout).ok_or_else(|| TraceError::NoTraceOutput {
        detail: if out.stderr.trim().is_empty() {
            "sentinel markers absent from interpreter output".to_string()
        } else {
            out.stderr.trim().to_string()
        },
    })?;

    let steps: Vec<TraceStep> =
        serde_json::from_str(payload).map_err(|e| TraceError::MalformedTracePayload {
            detail: e.to_string(),
        })?;
    if steps.is_empty() {
        return Err(TraceError::EmptyTrace);
    }
    Ok(Trace::from_steps(steps))
}

/// Render the tracer driver around the target path.
///
/// The path is interpolated into a quoted Python string literal, so
/// backslashes and quotes are escaped rather than substituted textually.
fn render_driver(file_path: &Path) -> String {
    let escaped = escape_python_str(&file_path.to_string_lossy());
    format!(
        r#"import sys, json, os

target_file = "{escaped}"
execution_log = []

def trace_lines(frame, event, arg):
    if event != 'line':
        return trace_lines
    # Only trace the target file, not imported modules
    if os.path.abspath(frame.f_code.co_filename) != os.path.abspath(target_file):
        return trace_lines

    local_vars = {{}}
    for k, v in frame.f_locals.items():
        if not k.startswith('__'):
            local_vars[k] = str(v)

    execution_log.append({{"line": frame.f_lineno, "vars": local_vars}})
    return trace_lines

sys.settrace(trace_lines)
try:
    with open(target_file) as f:
        exec(compile(f.read(), target_file, 'exec'), {{'__name__': '__main__'}})
except Exception:
    pass
finally:
    sys.settrace(None)
    print("{begin}")
    print(json.dumps(execution_log))
    print("{end}")
"#,
        escaped = escaped,
        begin = PAYLOAD_BEGIN,
        end = PAYLOAD_END,
    )
}

fn escape_python_str(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Slice the JSON payload out of the interpreter's stdout.
fn extract_payload(stdout: &str) -> Option<&str> {
    let start = stdout.find(PAYLOAD_BEGIN)? + PAYLOAD_BEGIN.len();
    let rest = &stdout[start..];
    let end = rest.find(PAYLOAD_END)?;
    Some(rest[..end].trim())
}

fn artifact_error(program: &str, err: std::io::Error) -> TraceError {
    TraceError::ProcessLaunchError {
        program: program.to_string(),
        detail: format!("cannot write driver artifact: {err}"),
    }
}
