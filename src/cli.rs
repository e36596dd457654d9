use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "stepviz", about = "Step-through execution trace visualizer", version)]
pub struct Cli {
    /// Source file to trace (.py, .c, .cpp or .java).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the trace as JSON instead of opening the viewer.
    ///
    /// Implied automatically when stdout is not a terminal.
    #[arg(long)]
    pub json: bool,

    /// Cap on debugger step iterations for the C/C++ and Java engines.
    #[arg(long = "step-limit")]
    pub step_limit: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
