//! Transcript parsers for the native and managed debugger engines.
//!
//! Both debuggers emit loosely structured, human-oriented text. Each parser
//! is a single forward scan over the raw transcript carrying two pieces of
//! state: the currently open step's line number (0 = none open yet) and a
//! mutable variable accumulator. Variables persist across steps unless
//! overwritten, because the debuggers echo only the locals visible at each
//! stop rather than a full snapshot every time.
//!
//! A step is emitted only when the *next* boundary line arrives, so the
//! final open step before the debugger exits is dropped. The Python engine
//! emits structured data directly and bypasses this module entirely.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::TraceError;
use crate::trace::TraceStep;

/// gdb step boundary: a line number token at the start of the line, as
/// printed when stepping ("10\t    x = 5;").
static GDB_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\s+").unwrap());

/// gdb local: "name = value" at the start of the line. The value side is
/// free-form so composite values like "arr = {1, 2, 3}" survive intact
/// (the engine disables pretty-printing so they stay on one line).
static GDB_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+) = (.+)$").unwrap());

/// jdb step boundary: an explicit "line=N" token anywhere in the line.
static JDB_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"line=(\d+)").unwrap());

/// jdb local: leading-whitespace-tolerant "name = value".
static JDB_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9_]+) = (.+)$").unwrap());

/// Parse a gdb batch-session transcript into ordered trace steps.
pub fn parse_gdb_transcript(raw: &str) -> Result<Vec<TraceStep>, TraceError> {
    let mut steps: Vec<TraceStep> = Vec::new();
    let mut current_line: u32 = 0;
    let mut current_vars: BTreeMap<String, String> = BTreeMap::new();

    for line in raw.lines() {
        if let Some(caps) = GDB_BOUNDARY.captures(line) {
            if let Ok(n) = caps[1].parse::<u32>() {
                if current_line > 0 {
                    steps.push(TraceStep {
                        line: current_line,
                        vars: current_vars.clone(),
                    });
                }
                current_line = n;
            }
        }

        if let Some(caps) = GDB_VARIABLE.captures(line) {
            if current_line > 0 {
                current_vars.insert(caps[1].to_string(), caps[2].trim().to_string());
            }
        }
    }

    if steps.is_empty() {
        return Err(TraceError::EmptyTrace);
    }
    Ok(steps)
}

/// Parse a jdb scripted-session transcript into ordered trace steps.
pub fn parse_jdb_transcript(raw: &str) -> Result<Vec<TraceStep>, TraceError> {
    let mut steps: Vec<TraceStep> = Vec::new();
    let mut current_line: u32 = 0;
    let mut current_vars: BTreeMap<String, String> = BTreeMap::new();

    for line in raw.lines() {
        if line.contains("line=") {
            if let Some(caps) = JDB_BOUNDARY.captures(line) {
                if let Ok(n) = caps[1].parse::<u32>() {
                    if current_line > 0 {
                        steps.push(TraceStep {
                            line: current_line,
                            vars: current_vars.clone(),
                        });
                    }
                    current_line = n;
                }
            }
        }

        // jdb echoes method-frame headers in "name = value" shape too;
        // the "method" filter keeps those out of the variable map.
        if let Some(caps) = JDB_VARIABLE.captures(line) {
            if current_line > 0 && !line.contains("method") {
                current_vars.insert(caps[1].to_string(), caps[2].trim().to_string());
            }
        }
    }

    if steps.is_empty() {
        return Err(TraceError::EmptyTrace);
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gdb_flushes_only_on_next_boundary() {
        // Three boundary lines yield two steps: the last open step is
        // dropped because no further boundary follows it.
        let raw = "5\t    int x = 1;\nx = 1\n6\t    int y = 2;\ny = 2\n7\t    return 0;\n";
        let steps = parse_gdb_transcript(raw).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].line, 5);
        assert_eq!(steps[1].line, 6);
    }

    #[test]
    fn gdb_vars_accumulate_across_steps() {
        let raw = "5\tint x = 1;\nx = 1\n6\tint y = 2;\ny = 2\n7\tdone\n";
        let steps = parse_gdb_transcript(raw).unwrap();
        // Step opened at line 5 saw only x; step at line 6 keeps x and
        // gains y.
        assert_eq!(steps[0].vars.get("x").map(String::as_str), Some("1"));
        assert!(steps[0].vars.get("y").is_none());
        assert_eq!(steps[1].vars.get("x").map(String::as_str), Some("1"));
        assert_eq!(steps[1].vars.get("y").map(String::as_str), Some("2"));
    }

    #[test]
    fn gdb_overwrite_replaces_value() {
        let raw = "5\t..\nx = 1\n6\t..\nx = 9\n7\t..\n";
        let steps = parse_gdb_transcript(raw).unwrap();
        assert_eq!(steps[0].vars.get("x").map(String::as_str), Some("1"));
        assert_eq!(steps[1].vars.get("x").map(String::as_str), Some("9"));
    }

    #[test]
    fn gdb_composite_values_stay_whole() {
        let raw = "5\t..\narr = {1, 2, 3}\n6\t..\n7\t..\n";
        let steps = parse_gdb_transcript(raw).unwrap();
        assert_eq!(
            steps[0].vars.get("arr").map(String::as_str),
            Some("{1, 2, 3}")
        );
    }

    #[test]
    fn gdb_ignores_noise_lines() {
        let raw = "Reading symbols from /tmp/a.out...\n\
                   Breakpoint 1, main () at a.c:5\n\
                   5\t    int x = 1;\n\
                   No locals.\n\
                   6\t    x = 2;\n\
                   7\t    return 0;\n";
        let steps = parse_gdb_transcript(raw).unwrap();
        assert_eq!(steps.len(), 2);
        assert!(steps[0].vars.is_empty());
    }

    #[test]
    fn gdb_variable_before_first_boundary_is_dropped() {
        let raw = "stray = 42\n5\t..\n6\t..\n";
        let steps = parse_gdb_transcript(raw).unwrap();
        assert!(steps[0].vars.is_empty());
    }

    #[test]
    fn gdb_empty_transcript_is_empty_trace() {
        let err = parse_gdb_transcript("some banner\nno boundaries here\n").unwrap_err();
        assert!(matches!(err, TraceError::EmptyTrace));
    }

    #[test]
    fn gdb_single_boundary_is_empty_trace() {
        // One boundary opens a step that is never flushed.
        let err = parse_gdb_transcript("5\t    int x = 1;\n").unwrap_err();
        assert!(matches!(err, TraceError::EmptyTrace));
    }

    #[test]
    fn jdb_boundary_and_locals() {
        let raw = "Step completed: \"thread=main\", Main.main(), line=4 bci=3\n\
                   Local variables:\n\
                     x = 5\n\
                   Step completed: \"thread=main\", Main.main(), line=5 bci=8\n\
                     x = 5\n\
                     y = 6\n\
                   Step completed: \"thread=main\", Main.main(), line=6 bci=12\n";
        let steps = parse_jdb_transcript(raw).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].line, 4);
        assert_eq!(steps[0].vars.get("x").map(String::as_str), Some("5"));
        assert_eq!(steps[1].line, 5);
        assert_eq!(steps[1].vars.get("y").map(String::as_str), Some("6"));
    }

    #[test]
    fn jdb_method_lines_are_filtered() {
        let raw = "line=4 bci=0\n  frame = Main.main method\n  x = 1\nline=5 bci=4\nline=6 bci=8\n";
        let steps = parse_jdb_transcript(raw).unwrap();
        assert!(steps[0].vars.get("frame").is_none());
        assert_eq!(steps[0].vars.get("x").map(String::as_str), Some("1"));
    }

    #[test]
    fn jdb_no_boundaries_is_empty_trace() {
        let err = parse_jdb_transcript("Initializing jdb ...\n> \n").unwrap_err();
        assert!(matches!(err, TraceError::EmptyTrace));
    }
}
