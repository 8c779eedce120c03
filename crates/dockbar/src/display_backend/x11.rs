use anyhow::{Context, Result};
use gtk::{self, prelude::*};
use x11rb::{
    self,
    connection::Connection,
    protocol::xproto::{ConnectionExt, PropMode},
    rust_connection::{DefaultStream, RustConnection},
};

use crate::geometry::{Rect, StrutDefinition};

/// Reserve screen space for the bar and mark it as a dock.
/// The window has to be shown before calling this, as it needs an X window to exist.
pub fn set_xprops(window: &gtk::Window, monitor: Rect, strut: StrutDefinition) -> Result<()> {
    let backend = X11Backend::new()?;
    backend.set_xprops_for(window, monitor, strut)?;
    Ok(())
}

struct X11Backend {
    conn: RustConnection<DefaultStream>,
    root_window: u32,
    atoms: AtomCollection,
}

impl X11Backend {
    fn new() -> Result<Self> {
        let (conn, screen_num) = RustConnection::connect(None).context("Failed to connect to the X server")?;
        let screen = conn.setup().roots[screen_num].clone();
        let atoms = AtomCollection::new(&conn)?.reply()?;
        Ok(X11Backend { conn, root_window: screen.root, atoms })
    }

    fn set_xprops_for(&self, window: &gtk::Window, monitor: Rect, strut: StrutDefinition) -> Result<()> {
        let gdk_window = window.window().context("Couldn't get gdk window from gtk window")?;
        let win_id =
            gdk_window.downcast_ref::<gdkx11::X11Window>().context("Failed to get x11 window for gtk window")?.xid() as u32;
        let root_window_geometry = self.conn.get_geometry(self.root_window)?.reply()?;

        let root_height = root_window_geometry.height as u32;
        let strut_partial = strut.strut_partial(monitor, root_height);
        log::debug!("setting struts of window {:#x}: {:?}", win_id, strut_partial);

        // window managers that understand the partial strut ignore the plain one
        x11rb::wrapper::ConnectionExt::change_property32(
            &self.conn,
            PropMode::REPLACE,
            win_id,
            self.atoms._NET_WM_STRUT,
            self.atoms.CARDINAL,
            &strut.strut(monitor, root_height),
        )?
        .check()?;
        x11rb::wrapper::ConnectionExt::change_property32(
            &self.conn,
            PropMode::REPLACE,
            win_id,
            self.atoms._NET_WM_STRUT_PARTIAL,
            self.atoms.CARDINAL,
            &strut_partial,
        )?
        .check()?;
        x11rb::wrapper::ConnectionExt::change_property32(
            &self.conn,
            PropMode::REPLACE,
            win_id,
            self.atoms._NET_WM_WINDOW_TYPE,
            self.atoms.ATOM,
            &[self.atoms._NET_WM_WINDOW_TYPE_DOCK],
        )?
        .check()?;

        self.conn.flush().context("Failed to send requests to X server")
    }
}

x11rb::atom_manager! {
    pub AtomCollection: AtomCollectionCookie {
        _NET_WM_WINDOW_TYPE,
        _NET_WM_WINDOW_TYPE_DOCK,
        _NET_WM_STRUT,
        _NET_WM_STRUT_PARTIAL,
        CARDINAL,
        ATOM,
    }
}
