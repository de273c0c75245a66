pub struct NotificationsService;
impl NotificationsService {
    pub const DESTINATION: &'static str = "org.freedesktop.Notifications";
    pub const PATH: &'static str = "/org/freedesktop/Notifications";
    pub const INTERFACE: &'static str = "org.freedesktop.Notifications";
    pub const NOTIFY: &'static str = "Notify";
}

/// Uid whose session is targeted as root when nothing else is known.
pub const DEFAULT_ELEVATED_UID: u32 = 1000;

/// Address of the per-user session bus socket under `/run/user/<uid>`.
pub fn session_bus_address(uid: u32) -> String {
    format!("unix:path=/run/user/{}/bus", uid)
}
