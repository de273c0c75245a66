use std::io::Write;

use crate::{
    bus::{
        ConnectionTarget, DBusNotificationBus, EffectiveUser, NotificationBus, Privilege,
        resolve_target,
    },
    config::NotifierConfig,
    notification::{NotificationId, NotificationRequest, NotifyCall},
    utils::errors::NotifyError,
};

/// Sends exactly one notification per `send_notification` call.
pub struct Notifier<P, B> {
    privilege: P,
    bus: B,
    config: NotifierConfig,
    sudo_uid: Option<String>,
}

impl Notifier<EffectiveUser, DBusNotificationBus> {
    /// Real privilege check, real D-Bus and `SUDO_UID` from the environment.
    pub fn system(config: NotifierConfig) -> Self {
        Self::new(EffectiveUser, DBusNotificationBus, config)
            .with_sudo_uid(std::env::var("SUDO_UID").ok())
    }
}

impl<P: Privilege, B: NotificationBus> Notifier<P, B> {
    pub fn new(privilege: P, bus: B, config: NotifierConfig) -> Self {
        Self {
            privilege,
            bus,
            config,
            sudo_uid: None,
        }
    }

    pub fn with_sudo_uid(mut self, sudo_uid: Option<String>) -> Self {
        self.sudo_uid = sudo_uid;
        self
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    pub fn target(&self) -> ConnectionTarget {
        resolve_target(&self.privilege, &self.config, self.sudo_uid.as_deref())
    }

    /// Sends `request` and writes a one line outcome to `out`.
    ///
    /// Failures are reported on `out` as well and handed back to the caller,
    /// which decides whether they matter for the exit status.
    pub async fn send_notification<W: Write>(
        &self,
        request: &NotificationRequest,
        out: &mut W,
    ) -> Result<NotificationId, NotifyError> {
        let target = self.target();
        let call = NotifyCall::from_request(request);
        tracing::debug!(
            "sending '{}' from '{}' via {}",
            call.summary,
            call.app_name,
            target
        );

        let result = self.bus.notify(&target, &call).await;
        let line = match &result {
            Ok(id) => format!("Notification sent successfully with ID: {}", id),
            Err(e) => {
                tracing::debug!("{:?} failure at {}:{}", e.stage(), e.file, e.line);
                format!("Error sending notification: {}", e)
            }
        };
        if let Err(e) = writeln!(out, "{}", line) {
            tracing::warn!("could not write outcome: {}", e);
        }

        result
    }
}
