use std::sync::{
    Mutex,
    atomic::{AtomicU32, Ordering},
};

use async_trait::async_trait;

use crate::{
    bus::{ConnectionTarget, NotificationBus, Privilege},
    notification::{NotificationId, NotifyCall},
    notify_err,
    utils::errors::{NotifyError, NotifyErrorKind},
};

pub struct Fixed(pub bool);
impl Privilege for Fixed {
    fn is_elevated(&self) -> bool {
        self.0
    }
}

/// Records every call and hands out increasing ids, or fails with `fail`.
#[derive(Default)]
pub struct RecordingBus {
    calls: Mutex<Vec<(ConnectionTarget, NotifyCall)>>,
    next_id: AtomicU32,
    fail: Option<NotifyErrorKind>,
}
impl RecordingBus {
    pub fn failing(kind: NotifyErrorKind) -> Self {
        Self {
            fail: Some(kind),
            ..Default::default()
        }
    }
    pub fn calls(&self) -> Vec<(ConnectionTarget, NotifyCall)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationBus for RecordingBus {
    async fn notify(
        &self,
        target: &ConnectionTarget,
        call: &NotifyCall,
    ) -> Result<NotificationId, NotifyError> {
        self.calls
            .lock()
            .unwrap()
            .push((target.clone(), call.clone()));
        match self.fail {
            Some(NotifyErrorKind::DBusConnect) => Err(notify_err!(
                NotifyErrorKind::DBusConnect,
                "No such file or directory (os error 2)"
            )),
            Some(kind) => Err(notify_err!(
                kind,
                "org.freedesktop.DBus.Error.InvalidArgs: bad hints"
            )),
            None => Ok(NotificationId(
                self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            )),
        }
    }
}
