mod args;
mod logging;
mod op;
mod ops;
mod state;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use args::Args;
use op::Op;
use ops::{Cat, Check, Init, Ls, Mkdir, Mv, Put, Rm, Stat, Version};
use state::AppState;

command_enum! {
    (Init, Init),
    (Check, Check),
    (Stat, Stat),
    (Ls, Ls),
    (Cat, Cat),
    (Put, Put),
    (Rm, Rm),
    (Mv, Mv),
    (Mkdir, Mkdir),
    (Version, Version),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logging follows the saved config when there is one; `init` runs
    // before any config exists
    let (level, log_dir) = match AppState::load(args.config_path.clone()) {
        Ok(state) => (state.config.log_level(), state.config.log_dir),
        Err(_) => (tracing::Level::WARN, None),
    };
    // Queued log lines are flushed when the guards drop on return
    let _guards = logging::init_logging(level, log_dir.as_deref());

    let ctx = op::OpContext::new(args.config_path);

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
