use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use stepviz::cli;
use stepviz::config::Config;
use stepviz::engines::{EngineRequest, Tracer};
use stepviz::tui;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Logging goes to stderr so --json output stays parseable
    let default_filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();

    // Optional: override step limit via CLI before loading config
    if let Some(limit) = args.step_limit {
        std::env::set_var("STEP_LIMIT", limit.to_string());
    }

    let cfg = Config::load();

    let file_path = std::fs::canonicalize(&args.file)
        .with_context(|| format!("cannot open {}", args.file.display()))?;
    let request = EngineRequest::from_path(file_path.clone())?;

    // The engines may take seconds (compilation plus interactive stepping);
    // keep the user informed for the whole run. Not cancellable.
    eprintln!("{}", "Compiling & tracing...".cyan());

    let tracer = Tracer::new(cfg);
    let trace = tracer.run(&request).await?;

    if args.json || !std::io::stdout().is_terminal() {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    let source = std::fs::read_to_string(&file_path)
        .with_context(|| format!("cannot read {}", file_path.display()))?;
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.display().to_string());
    tui::run_viewer(trace, &source, &file_name)
}
