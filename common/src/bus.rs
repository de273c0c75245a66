use std::fmt::Display;

use async_trait::async_trait;
use zbus::{Connection, Proxy, connection};

use crate::{
    config::NotifierConfig,
    notification::{NotificationId, NotifyCall},
    notify_err,
    protocol::{DEFAULT_ELEVATED_UID, NotificationsService, session_bus_address},
    utils::errors::{NotifyError, NotifyErrorKind},
};

pub trait Privilege {
    fn is_elevated(&self) -> bool;
}

/// Checks the effective uid of the running process.
pub struct EffectiveUser;
impl Privilege for EffectiveUser {
    fn is_elevated(&self) -> bool {
        unsafe { libc::geteuid() == 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// The caller's own session bus, discovered by zbus.
    Session,
    /// An explicit bus address, used when running as root.
    Address(String),
}
impl Display for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session => write!(f, "session bus"),
            Self::Address(addr) => write!(f, "{}", addr),
        }
    }
}

/// Picks the bus to talk to.
///
/// As root there is no session bus of our own, so the target user's bus is
/// chosen from, in order: `elevated_bus_address`, `elevated_uid`, the uid in
/// `SUDO_UID`, and finally uid 1000.
pub fn resolve_target<P: Privilege + ?Sized>(
    privilege: &P,
    config: &NotifierConfig,
    sudo_uid: Option<&str>,
) -> ConnectionTarget {
    if !privilege.is_elevated() {
        return ConnectionTarget::Session;
    }

    if let Some(addr) = &config.elevated_bus_address {
        return ConnectionTarget::Address(addr.clone());
    }
    if let Some(uid) = config.elevated_uid {
        return ConnectionTarget::Address(session_bus_address(uid));
    }

    match sudo_uid.map(|raw| raw.trim().parse::<u32>()) {
        Some(Ok(uid)) if uid != 0 => {
            return ConnectionTarget::Address(session_bus_address(uid));
        }
        Some(Ok(_)) => {}
        Some(Err(e)) => tracing::warn!("ignoring SUDO_UID: {}", e),
        None => {}
    }

    ConnectionTarget::Address(session_bus_address(DEFAULT_ELEVATED_UID))
}

#[async_trait]
pub trait NotificationBus: Send + Sync {
    /// Issues one `Notify` call on `target` and returns the server assigned id.
    async fn notify(
        &self,
        target: &ConnectionTarget,
        call: &NotifyCall,
    ) -> Result<NotificationId, NotifyError>;
}

pub struct DBusNotificationBus;
impl DBusNotificationBus {
    async fn connect(target: &ConnectionTarget) -> Result<Connection, NotifyError> {
        match target {
            ConnectionTarget::Session => Connection::session()
                .await
                .map_err(|e| notify_err!(NotifyErrorKind::DBusConnect, e.to_string())),
            ConnectionTarget::Address(addr) => connection::Builder::address(addr.as_str())
                .map_err(|e| notify_err!(NotifyErrorKind::InvalidAddress, e.to_string()))?
                .build()
                .await
                .map_err(|e| notify_err!(NotifyErrorKind::DBusConnect, e.to_string())),
        }
    }
}

#[async_trait]
impl NotificationBus for DBusNotificationBus {
    async fn notify(
        &self,
        target: &ConnectionTarget,
        call: &NotifyCall,
    ) -> Result<NotificationId, NotifyError> {
        let conn = Self::connect(target).await?;
        tracing::debug!("connected to {}", target);

        let proxy = Proxy::new(
            &conn,
            NotificationsService::DESTINATION,
            NotificationsService::PATH,
            NotificationsService::INTERFACE,
        )
        .await
        .map_err(|e| notify_err!(NotifyErrorKind::ProxyCreate, e.to_string()))?;

        let id: u32 = proxy
            .call(NotificationsService::NOTIFY, &call.as_body())
            .await
            .map_err(|e| match e {
                zbus::Error::MethodError(name, msg, _) => notify_err!(
                    NotifyErrorKind::DBusMethodError,
                    "{}: {}",
                    name,
                    msg.unwrap_or_default()
                ),
                e => notify_err!(NotifyErrorKind::DBusProxyCall, e.to_string()),
            })?;

        Ok(NotificationId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notification::NotificationRequest, testing::Fixed, utils::errors::FailureStage,
    };

    #[test]
    fn regular_user_gets_own_session() {
        let config = NotifierConfig {
            elevated_bus_address: Some("unix:path=/tmp/other".into()),
            elevated_uid: Some(1001),
            exit_on_failure: false,
        };
        assert_eq!(
            resolve_target(&Fixed(false), &config, Some("1002")),
            ConnectionTarget::Session
        );
    }

    #[test]
    fn root_defaults_to_uid_1000() {
        assert_eq!(
            resolve_target(&Fixed(true), &NotifierConfig::default(), None),
            ConnectionTarget::Address("unix:path=/run/user/1000/bus".into())
        );
    }

    #[test]
    fn root_follows_sudo_uid() {
        let config = NotifierConfig::default();
        assert_eq!(
            resolve_target(&Fixed(true), &config, Some("1003")),
            ConnectionTarget::Address("unix:path=/run/user/1003/bus".into())
        );
        assert_eq!(
            resolve_target(&Fixed(true), &config, Some("0")),
            ConnectionTarget::Address("unix:path=/run/user/1000/bus".into())
        );
        assert_eq!(
            resolve_target(&Fixed(true), &config, Some("nobody")),
            ConnectionTarget::Address("unix:path=/run/user/1000/bus".into())
        );
    }

    #[test]
    fn config_wins_over_discovery() {
        let config = NotifierConfig {
            elevated_uid: Some(1001),
            ..Default::default()
        };
        assert_eq!(
            resolve_target(&Fixed(true), &config, Some("1003")),
            ConnectionTarget::Address("unix:path=/run/user/1001/bus".into())
        );

        let config = NotifierConfig {
            elevated_bus_address: Some("unix:path=/tmp/backup-bus".into()),
            elevated_uid: Some(1001),
            ..Default::default()
        };
        assert_eq!(
            resolve_target(&Fixed(true), &config, Some("1003")),
            ConnectionTarget::Address("unix:path=/tmp/backup-bus".into())
        );
    }

    #[tokio::test]
    async fn unreachable_socket_is_a_connection_error() {
        let target = ConnectionTarget::Address(format!(
            "unix:path=/tmp/backup-notify-missing-{}/bus",
            std::process::id()
        ));
        let call = NotifyCall::from_request(&NotificationRequest::new("a", "b", "c"));
        let err = DBusNotificationBus.notify(&target, &call).await.unwrap_err();
        assert_eq!(err.stage(), FailureStage::Connection);
    }

    #[tokio::test]
    async fn malformed_address_is_a_connection_error() {
        let target = ConnectionTarget::Address("not-an-address".into());
        let call = NotifyCall::from_request(&NotificationRequest::new("a", "b", "c"));
        let err = DBusNotificationBus.notify(&target, &call).await.unwrap_err();
        assert_eq!(err.kind, NotifyErrorKind::InvalidAddress);
    }
}
