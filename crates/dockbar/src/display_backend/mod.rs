#[cfg(not(feature = "x11"))]
mod no_backend {
    use anyhow::Result;

    use crate::geometry::{Rect, StrutDefinition};

    pub fn set_xprops(_window: &gtk::Window, _monitor: Rect, _strut: StrutDefinition) -> Result<()> {
        log::warn!("dockbar was compiled without x11 support, not reserving any screen space");
        Ok(())
    }
}
#[cfg(not(feature = "x11"))]
pub use no_backend::*;

#[cfg(feature = "x11")]
mod x11;
#[cfg(feature = "x11")]
pub use x11::*;

use gtk::prelude::*;

/// Name of the bar window, used by the built-in stylesheet.
pub const BAR_WIDGET_NAME: &str = "bar";

/// Create the undecorated dock window the bar lives in.
pub fn initialize_window() -> gtk::Window {
    let window = gtk::Window::new(gtk::WindowType::Toplevel);
    window.set_widget_name(BAR_WIDGET_NAME);
    // gtk-rs 0.18 dropped the deprecated `set_wmclass` binding; call the C function directly.
    unsafe {
        use glib::translate::ToGlibPtr;
        gtk::ffi::gtk_window_set_wmclass(window.to_glib_none().0, "dockbar".to_glib_none().0, "dockbar".to_glib_none().0);
    }
    window.set_type_hint(gdk::WindowTypeHint::Dock);
    window.set_decorated(false);
    window.set_resizable(false);
    window.set_keep_above(true);
    window.stick();
    window
}
