use std::{collections::HashMap, fmt};

use strum::{AsRefStr, EnumIter};
use zbus::zvariant::Value;

pub const DEFAULT_ICON: &str = "drive-harddisk";
/// Lets the notification server pick the expiry. `0` would mean "never expire".
pub const DEFAULT_TIMEOUT: i32 = -1;

/// What the user asked to show. Lives for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub app_name: String,
    pub title: String,
    pub body: String,
    pub icon_name: String,
    pub timeout_ms: i32,
}
impl NotificationRequest {
    pub fn new(
        app_name: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            title: title.into(),
            body: body.into(),
            icon_name: DEFAULT_ICON.into(),
            timeout_ms: DEFAULT_TIMEOUT,
        }
    }
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon_name = icon.into();
        self
    }
    pub fn with_timeout(mut self, timeout_ms: i32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Urgency {
    Low = 0,
    Normal = 1,
    Critical = 2,
}
impl Urgency {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Metadata attached to every notification. Not user configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationHints {
    pub desktop_entry: &'static str,
    pub category: &'static str,
    pub urgency: Urgency,
}
impl NotificationHints {
    pub const DESKTOP_ENTRY: &'static str = "system-backup";
    pub const CATEGORY: &'static str = "transfer";

    pub fn fixed() -> Self {
        Self {
            desktop_entry: Self::DESKTOP_ENTRY,
            category: Self::CATEGORY,
            urgency: Urgency::Normal,
        }
    }

    /// The `a{sv}` dictionary sent on the wire.
    pub fn to_map(&self) -> HashMap<&'static str, Value<'static>> {
        HashMap::from([
            ("desktop-entry", Value::from(self.desktop_entry)),
            ("category", Value::from(self.category)),
            ("urgency", Value::from(self.urgency.as_byte())),
        ])
    }
}
impl Default for NotificationHints {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Argument tuple of `org.freedesktop.Notifications.Notify`, signature `susssasa{sv}i`.
pub type NotifyBody<'a> = (
    &'a str,
    u32,
    &'a str,
    &'a str,
    &'a str,
    &'a [String],
    HashMap<&'static str, Value<'static>>,
    i32,
);

/// A fully built `Notify` call.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyCall {
    pub app_name: String,
    pub replaces_id: u32,
    pub app_icon: String,
    pub summary: String,
    pub body: String,
    pub actions: Vec<String>,
    pub hints: NotificationHints,
    pub expire_timeout: i32,
}
impl NotifyCall {
    /// Always asks for a fresh notification (`replaces_id = 0`) with no actions.
    pub fn from_request(request: &NotificationRequest) -> Self {
        Self {
            app_name: request.app_name.clone(),
            replaces_id: 0,
            app_icon: request.icon_name.clone(),
            summary: request.title.clone(),
            body: request.body.clone(),
            actions: Vec::new(),
            hints: NotificationHints::fixed(),
            expire_timeout: request.timeout_ms,
        }
    }

    pub fn as_body(&self) -> NotifyBody<'_> {
        (
            self.app_name.as_str(),
            self.replaces_id,
            self.app_icon.as_str(),
            self.summary.as_str(),
            self.body.as_str(),
            self.actions.as_slice(),
            self.hints.to_map(),
            self.expire_timeout,
        )
    }
}

/// Id handed out by the notification server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u32);
impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
