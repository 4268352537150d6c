use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use exam_session::backend::LocalBackend;
use exam_session::data::load_exam_from_json;
use exam_session::session::ExamSessionController;
use exam_session::{app, SessionError};

#[derive(Parser, Debug)]
#[command(version, about = "Take an exam from a local definition file", long_about = None)]
struct Args {
    /// JSON exam definition to load
    #[arg(short, long, default_value = "demos/exam.json")]
    exam: PathBuf,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never land inside the TUI.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), SessionError> {
    let definition = load_exam_from_json(&args.exam)?;
    let exam_id = definition.id.clone();
    let backend = LocalBackend::new(definition);

    let controller = ExamSessionController::load(backend, &exam_id).await?;
    app::run(controller).await
}
