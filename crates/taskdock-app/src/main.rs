mod boot;
mod bridge;
mod cli;
mod replay;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use taskdock_common::TaskdockError;
use taskdock_config::{toml_loader, DockConfig};
use taskdock_core::AppResolver;
use taskdock_platform::XdgDirectory;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use cli::Command;

const DEFAULT_DIRECTIVE: &str = "taskdock=info";

fn init_logging(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_DIRECTIVE.parse::<Directive>())
    {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn resolve(config: &DockConfig, identities: &[String]) {
    let directory = XdgDirectory::from_environment(&config.directory.extra_dirs);
    let mut resolver = AppResolver::new(boot::launcher_overrides(config));
    for identity in identities {
        let (key, kind) = resolver.resolve_with_kind(identity, &directory);
        let name = resolver
            .application(&key)
            .map(|app| app.name.clone())
            .unwrap_or_default();
        println!("{identity} -> {key} ({name}) [{kind:?}]");
    }
}

fn replay(config: &DockConfig, file: &std::path::Path) -> Result<(), TaskdockError> {
    let steps = replay::load_script(file)?;
    let directory = XdgDirectory::from_environment(&config.directory.extra_dirs);
    let dock = replay::replay(steps, Box::new(directory), boot::dock_settings(config));
    print!("{}", replay::render(&dock));
    Ok(())
}

fn config_path(args: &cli::Args) -> Result<PathBuf, TaskdockError> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => Ok(toml_loader::default_config_path()?),
    }
}

fn run(args: cli::Args) -> Result<(), TaskdockError> {
    let path = config_path(&args)?;
    // Read before the subscriber exists; the outcome is logged below.
    let loaded = toml_loader::load_from_path(&path);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let directive = match &args.log_level {
        Some(level) => format!("taskdock={level}"),
        None => format!("taskdock={}", config.logging.level.as_directive()),
    };
    init_logging(&directive);
    tracing::info!("Taskdock v{} starting...", env!("CARGO_PKG_VERSION"));
    match &loaded {
        Ok(_) => tracing::info!("using config {}", path.display()),
        Err(e) => tracing::warn!("config load failed, using defaults: {e}"),
    }

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run::run(path))?;
            tracing::info!("shutdown complete");
        }
        Command::Resolve { identities } => resolve(&config, &identities),
        Command::Replay { file } => replay(&config, &file)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = cli::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("taskdock: {e}");
            ExitCode::FAILURE
        }
    }
}
