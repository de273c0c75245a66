use crate::{
    notification::NotificationRequest,
    notify_err,
    utils::errors::{NotifyError, NotifyErrorKind},
};

pub const USAGE: &str = "Usage: backup-notify <app_name> <title> <message> [icon] [timeout]\n\
Example: backup-notify 'System Backup' 'Backup Started' 'Backup in progress'";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Send(NotificationRequest),
}

pub struct ArgParse;
impl ArgParse {
    /// Parses the full argument list, program name included.
    ///
    /// `-h`/`--help` and `-V`/`--version` are only flags when fewer than
    /// three arguments are given, otherwise they are taken as an app name.
    /// Positionals past the fifth are ignored.
    pub fn parse<I>(args: I) -> Result<Command, NotifyError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().skip(1).collect();

        if args.len() < 3 {
            match args.first().map(String::as_str) {
                Some("-h" | "--help") => return Ok(Command::Help),
                Some("-V" | "--version") => return Ok(Command::Version),
                _ => {}
            }
        }

        let mut args = args.into_iter();
        let (Some(app_name), Some(title), Some(message)) = (args.next(), args.next(), args.next())
        else {
            return Err(notify_err!(
                NotifyErrorKind::MissingArgument,
                "expected at least 3 arguments"
            ));
        };

        let mut request = NotificationRequest::new(app_name, title, message);
        if let Some(icon) = args.next() {
            request = request.with_icon(icon);
        }
        if let Some(raw) = args.next() {
            let timeout = raw.trim().parse::<i32>().map_err(|e| {
                notify_err!(NotifyErrorKind::InvalidTimeout, "Invalid timeout '{}': {}", raw, e)
            })?;
            request = request.with_timeout(timeout);
        }

        Ok(Command::Send(request))
    }
}
