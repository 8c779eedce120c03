use std::{convert::Infallible, fmt, str};

use anyhow::{Context, Result};
use gdk::prelude::*;

use crate::geometry::Rect;

/// The type of the identifier used to select a monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorIdentifier {
    Numeric(i32),
    Name(String),
}

impl MonitorIdentifier {
    /// Returns the [Monitor][gdk::Monitor] corresponding to the identifier
    pub fn get_monitor(&self, display: &gdk::Display) -> Option<gdk::Monitor> {
        match self {
            Self::Numeric(num) => display.monitor(*num),
            Self::Name(name) => {
                (0..display.n_monitors()).filter_map(|m| display.monitor(m)).find(|mon| mon.model().is_some_and(|model| model == *name))
            }
        }
    }
}

impl fmt::Display for MonitorIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Name(n) => write!(f, "{}", n),
        }
    }
}

impl str::FromStr for MonitorIdentifier {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i32>() {
            Ok(n) => Ok(Self::Numeric(n)),
            Err(_) => Ok(Self::Name(s.to_owned())),
        }
    }
}

/// Log the geometry of every monitor of the display.
pub fn log_monitors(display: &gdk::Display) {
    let n_monitors = display.n_monitors();
    log::info!("there are {} monitors", n_monitors);
    for (index, monitor) in (0..n_monitors).filter_map(|m| display.monitor(m).map(|mon| (m, mon))) {
        let geometry = Rect::from(monitor.geometry());
        log::info!("monitor {} ({}): {}", index, monitor.model().as_deref().unwrap_or("unknown model"), geometry);
    }
}

/// Find the monitor the bar should be shown on.
///
/// An explicit identifier wins. Otherwise this is the monitor of the active window,
/// then the one under the pointer, then the primary monitor, then the first one.
pub fn select_monitor(display: &gdk::Display, ident: Option<&MonitorIdentifier>) -> Result<gdk::Monitor> {
    if let Some(ident) = ident {
        return ident.get_monitor(display).with_context(|| format!("Failed to get monitor {}", ident));
    }

    #[allow(deprecated)]
    let active_window_monitor = gdk::Screen::default()
        // gtk-rs 0.18 dropped the deprecated `active_window` binding; call the C function directly.
        .and_then(|screen| unsafe {
            use glib::translate::{from_glib_full, ToGlibPtr};
            from_glib_full::<_, Option<gdk::Window>>(gdk::ffi::gdk_screen_get_active_window(screen.to_glib_none().0))
        })
        .and_then(|window| display.monitor_at_window(&window));
    if let Some(monitor) = active_window_monitor {
        log::debug!("using monitor of the active window");
        return Ok(monitor);
    }

    let pointer_monitor = display
        .default_seat()
        .and_then(|seat| seat.pointer())
        .map(|pointer| pointer.position())
        .and_then(|(_, x, y)| display.monitor_at_point(x, y));
    if let Some(monitor) = pointer_monitor {
        log::debug!("no active window, using the monitor under the pointer");
        return Ok(monitor);
    }

    display.primary_monitor().or_else(|| display.monitor(0)).context("Failed to find any monitor")
}
