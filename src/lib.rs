//! stepviz core: multi-engine execution trace acquisition.
//!
//! Three engines coerce very different external tools into one canonical
//! `(line, variable snapshot)` step sequence: a Python line-trace hook, a
//! gdb batch session for C/C++, and a scripted jdb stdin session for Java.
//! The binary wraps this with a clap CLI and a ratatui viewer.

pub mod cli;
pub mod config;
pub mod engines;
pub mod error;
pub mod parse;
pub mod process;
pub mod trace;
pub mod tui;
