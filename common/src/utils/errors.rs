use std::fmt;

#[macro_export]
macro_rules! notify_err {
    // Case with just a message literal
    ($kind:expr, $msg:expr) => {
        $crate::utils::errors::NotifyError {
            kind: $kind,
            message: $msg.into(),
            file: file!(),
            line: line!(),
        }
    };
    // Case with message + format arguments
    ($kind:expr, $fmt:expr, $($args:tt)*) => {
        $crate::utils::errors::NotifyError {
            kind: $kind,
            message: format!($fmt, $($args)*),
            file: file!(),
            line: line!(),
        }
    };
}

#[derive(Debug)]
pub struct NotifyError {
    pub kind: NotifyErrorKind,
    pub message: String,
    pub file: &'static str,
    pub line: u32,
}
impl NotifyError {
    pub fn stage(&self) -> FailureStage {
        self.kind.stage()
    }
}
impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl std::error::Error for NotifyError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyErrorKind {
    MissingArgument,
    InvalidTimeout,

    EnvVar,
    DirRead,
    FileOpen,
    Deserialize,

    InvalidAddress,
    DBusConnect,
    ProxyCreate,
    DBusProxyCall,
    DBusMethodError,
}
impl NotifyErrorKind {
    pub fn stage(self) -> FailureStage {
        match self {
            Self::MissingArgument | Self::InvalidTimeout => FailureStage::Argument,
            Self::EnvVar | Self::DirRead | Self::FileOpen | Self::Deserialize => {
                FailureStage::Config
            }
            Self::InvalidAddress | Self::DBusConnect | Self::ProxyCreate => {
                FailureStage::Connection
            }
            Self::DBusProxyCall | Self::DBusMethodError => FailureStage::RemoteCall,
        }
    }
}

/// Where in the invocation an error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Argument,
    Config,
    /// The bus endpoint could not be reached.
    Connection,
    /// The bus was reached but the service call failed or was rejected.
    RemoteCall,
}
