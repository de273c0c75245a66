use std::{io::Write, process::ExitCode};

use crate::{
    bus::{NotificationBus, Privilege},
    config::flags::{ArgParse, Command, USAGE},
    notifier::Notifier,
    utils::errors::NotifyErrorKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}
impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::Failure => ExitCode::FAILURE,
        }
    }
}

fn emit<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = writeln!(out, "{}", text) {
        tracing::warn!("could not write output: {}", e);
    }
}

/// Runs one invocation: parse `args`, send at most one notification, map the
/// outcome to a process status.
///
/// Usage problems fail without touching the bus. A failed send only fails the
/// run when `exit_on_failure` is set.
pub async fn run<I, P, B, W>(args: I, notifier: &Notifier<P, B>, out: &mut W) -> RunStatus
where
    I: IntoIterator<Item = String>,
    P: Privilege,
    B: NotificationBus,
    W: Write,
{
    let request = match ArgParse::parse(args) {
        Ok(Command::Send(request)) => request,
        Ok(Command::Help) => {
            emit(out, USAGE);
            return RunStatus::Success;
        }
        Ok(Command::Version) => {
            emit(out, &format!("backup-notify {}", env!("CARGO_PKG_VERSION")));
            return RunStatus::Success;
        }
        Err(e) => {
            if e.kind == NotifyErrorKind::InvalidTimeout {
                emit(out, &e.message);
            }
            emit(out, USAGE);
            return RunStatus::Failure;
        }
    };

    match notifier.send_notification(&request, out).await {
        Ok(id) => {
            tracing::info!("notification {} delivered", id);
            RunStatus::Success
        }
        Err(_) if notifier.config().exit_on_failure => RunStatus::Failure,
        Err(_) => RunStatus::Success,
    }
}
