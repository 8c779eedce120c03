//! # Notification bus signals
//!
//! Minimal emitter for the signals a notification daemon sends on
//! [`org.freedesktop.Notifications`] when the user interacts with a popup. The bar uses this to
//! report back which action was picked, or why it went away.
//!
//! [`org.freedesktop.Notifications`]: https://specifications.freedesktop.org/notification-spec/latest/protocol.html

mod error;
pub use error::*;

mod signal;
pub use signal::*;

pub const NOTIFICATIONS_DBUS_INTERFACE: &str = "org.freedesktop.Notifications";
pub const NOTIFICATIONS_DBUS_OBJECT: &str = "/org/freedesktop/Notifications";

/// A session bus connection used to broadcast notification signals.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    con: zbus::Connection,
}

impl NotificationBus {
    /// Connect to the session bus.
    pub async fn connect() -> Result<Self> {
        let con = zbus::Connection::session().await?;
        log::debug!("connected to session bus as {:?}", con.unique_name());
        Ok(Self { con })
    }

    /// Emit the `ActionInvoked` signal for the notification `id`.
    pub async fn action_invoked(&self, id: u32, action_key: &str) -> Result<()> {
        log::debug!("emitting ActionInvoked({}, {:?})", id, action_key);
        self.con
            .emit_signal(None::<&str>, NOTIFICATIONS_DBUS_OBJECT, NOTIFICATIONS_DBUS_INTERFACE, "ActionInvoked", &(id, action_key))
            .await?;
        Ok(())
    }

    /// Emit the `NotificationClosed` signal for the notification `id`.
    pub async fn notification_closed(&self, id: u32, reason: CloseReason) -> Result<()> {
        log::debug!("emitting NotificationClosed({}, {})", id, reason);
        self.con
            .emit_signal(
                None::<&str>,
                NOTIFICATIONS_DBUS_OBJECT,
                NOTIFICATIONS_DBUS_INTERFACE,
                "NotificationClosed",
                &(id, u32::from(reason)),
            )
            .await?;
        Ok(())
    }

    pub async fn emit(&self, signal: &Signal) -> Result<()> {
        match signal {
            Signal::ActionInvoked { id, action_key } => self.action_invoked(*id, action_key).await,
            Signal::NotificationClosed { id, reason } => self.notification_closed(*id, *reason).await,
        }
    }

    /// Emit all given signals in order, stopping at the first failure.
    pub async fn emit_all(&self, signals: &[Signal]) -> Result<()> {
        for signal in signals {
            self.emit(signal).await?;
        }
        Ok(())
    }
}
