use std::fmt;

/// The reason passed along with `NotificationClosed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The notification expired.
    Expired,
    /// The notification was dismissed by the user.
    Dismissed,
    /// The notification was closed by a call to `CloseNotification`.
    ClosedByCall,
    Undefined,
}

impl From<CloseReason> for u32 {
    fn from(reason: CloseReason) -> u32 {
        match reason {
            CloseReason::Expired => 1,
            CloseReason::Dismissed => 2,
            CloseReason::ClosedByCall => 3,
            CloseReason::Undefined => 4,
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CloseReason::Expired => "expired",
            CloseReason::Dismissed => "dismissed",
            CloseReason::ClosedByCall => "closed-by-call",
            CloseReason::Undefined => "undefined",
        };
        write!(f, "{}", name)
    }
}

/// A single signal on the notifications interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    ActionInvoked { id: u32, action_key: String },
    NotificationClosed { id: u32, reason: CloseReason },
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::ActionInvoked { id, action_key } => write!(f, "ActionInvoked({}, {:?})", id, action_key),
            Signal::NotificationClosed { id, reason } => write!(f, "NotificationClosed({}, {})", id, reason),
        }
    }
}
