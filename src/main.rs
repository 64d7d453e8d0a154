use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use phpctor_lsp::{
    Backend, DEFAULT_PROPERTY_NAME, InserterConfig, Visibility, apply_text_edit, plan_document,
};

#[derive(Parser)]
#[command(version, about = "Insert constructor-assigned properties into PHP classes")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the language server over stdio (the default).
    Serve,
    /// Print the insertion plan for a PHP file.
    Plan(PlanArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// The PHP file to plan against.
    file: PathBuf,

    /// Property name to fill the placeholder with.
    #[arg(long, default_value = DEFAULT_PROPERTY_NAME)]
    name: String,

    #[arg(long, value_enum)]
    visibility: Option<Visibility>,

    #[arg(long, value_enum)]
    constructor_visibility: Option<Visibility>,

    /// Print the file with the edit applied instead of the plan.
    #[arg(long)]
    apply: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let (service, socket) = LspService::new(Backend::new);
            Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
                .serve(service)
                .await;
            ExitCode::SUCCESS
        }
        Command::Plan(args) => match run_plan(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("{e}");
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_plan(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&args.file)?;

    let workspace = std::env::current_dir().ok();
    let mut config = InserterConfig::load(workspace.as_deref())?;
    if let Some(visibility) = args.visibility {
        config.visibility = visibility;
    }
    if let Some(visibility) = args.constructor_visibility {
        config.constructor_visibility = visibility;
    }

    let plan = plan_document(&content, &config, &args.name)?;
    if args.apply {
        print!("{}", apply_text_edit(&content, &plan.to_text_edit()));
    } else {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }
    Ok(())
}
