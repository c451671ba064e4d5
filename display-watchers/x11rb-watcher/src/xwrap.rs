use tartwm_core::models::Rect;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{self, ChangeWindowAttributesAux};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

use crate::error::Result;

/// Mask registered on the root window. Structure notifications report every
/// child created or destroyed; button events arrive for presses on the bare
/// root.
#[inline]
#[must_use]
pub fn root_event_mask() -> xproto::EventMask {
    xproto::EventMask::SUBSTRUCTURE_NOTIFY
        | xproto::EventMask::BUTTON_PRESS
        | xproto::EventMask::BUTTON_RELEASE
}

/// Mask registered on every tracked window.
#[inline]
#[must_use]
pub fn window_event_mask() -> xproto::EventMask {
    xproto::EventMask::KEY_PRESS
        | xproto::EventMask::KEY_RELEASE
        | xproto::EventMask::BUTTON_PRESS
        | xproto::EventMask::BUTTON_RELEASE
        | xproto::EventMask::ENTER_WINDOW
}

/// Contains the Xserver connection and the root window.
pub(crate) struct XWrap {
    conn: RustConnection,
    root: xproto::Window,
}

impl XWrap {
    /// Connects to the display named by `DISPLAY`.
    pub fn new() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let root = conn.setup().roots[screen_num].root;
        Ok(Self { conn, root })
    }

    pub const fn root(&self) -> xproto::Window {
        self.root
    }

    /// Registers `mask` on a window, replacing any previous registration by
    /// this client.
    pub fn subscribe_to_event(
        &self,
        window: xproto::Window,
        mask: xproto::EventMask,
    ) -> Result<()> {
        xproto::change_window_attributes(
            &self.conn,
            window,
            &ChangeWindowAttributesAux::new().event_mask(mask),
        )?
        .check()?;
        Ok(())
    }

    /// The current children of the root window, bottom-most first.
    pub fn child_windows(&self) -> Result<Vec<xproto::Window>> {
        let reply = xproto::query_tree(&self.conn, self.root)?.reply()?;
        Ok(reply.children)
    }

    /// A window's geometry as the server reports it.
    pub fn window_geometry(&self, window: xproto::Window) -> Result<Rect> {
        let geo = xproto::get_geometry(&self.conn, window)?.reply()?;
        Ok(Rect::new(
            geo.x.into(),
            geo.y.into(),
            geo.width.into(),
            geo.height.into(),
        ))
    }

    /// Blocks until the server delivers the next event.
    pub fn wait_for_event(&self) -> Result<Event> {
        Ok(self.conn.wait_for_event()?)
    }

    /// Flush the xserver.
    pub fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}
