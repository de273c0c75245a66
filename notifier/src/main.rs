use std::{io, process::ExitCode};

use notify_common::{cli::run, config::load_config, notifier::Notifier};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let notifier = Notifier::system(load_config());
    let mut stdout = io::stdout();

    run(std::env::args(), &notifier, &mut stdout).await.into()
}
