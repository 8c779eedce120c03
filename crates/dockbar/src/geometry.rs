use derive_more::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
#[display("{x}+{y}:{width}x{height}")]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn end_x(&self) -> i32 {
        self.x + self.width - 1
    }
}

impl From<gdk::Rectangle> for Rect {
    fn from(rect: gdk::Rectangle) -> Self {
        Rect { x: rect.x(), y: rect.y(), width: rect.width(), height: rect.height() }
    }
}

/// Screen edge a bar is docked to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Display, clap::ValueEnum)]
pub enum Side {
    #[default]
    #[display("top")]
    Top,
    #[display("bottom")]
    Bottom,
}

/// The space a bar reserves along one edge of its monitor.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StrutDefinition {
    pub side: Side,
    pub dist: u32,
}

impl StrutDefinition {
    /// Values of `_NET_WM_STRUT_PARTIAL` for a bar on `monitor`, in the order
    /// left, right, top, bottom, left_start_y, left_end_y, right_start_y, right_end_y, top_start_x, top_end_x, bottom_start_x, bottom_end_x.
    ///
    /// Struts are relative to the root window, which spans all monitors.
    pub fn strut_partial(&self, monitor: Rect, root_height: u32) -> [u32; 12] {
        let mon_start_x = monitor.x.max(0) as u32;
        let mon_end_x = monitor.end_x().max(0) as u32;
        match self.side {
            Side::Top => {
                let top = self.dist.saturating_add(monitor.y.max(0) as u32);
                [0, 0, top, 0, 0, 0, 0, 0, mon_start_x, mon_end_x, 0, 0]
            }
            Side::Bottom => {
                let mon_end_y = (monitor.y + monitor.height).max(0) as u32;
                let bottom = root_height.saturating_sub(mon_end_y).saturating_add(self.dist);
                [0, 0, 0, bottom, 0, 0, 0, 0, 0, 0, mon_start_x, mon_end_x]
            }
        }
    }

    /// Values of the older `_NET_WM_STRUT`, which is the first four entries of the partial strut.
    pub fn strut(&self, monitor: Rect, root_height: u32) -> [u32; 4] {
        let partial = self.strut_partial(monitor, root_height);
        [partial[0], partial[1], partial[2], partial[3]]
    }

    /// The area the bar itself covers on `monitor`.
    pub fn bar_rect(&self, monitor: Rect) -> Rect {
        let height = i32::try_from(self.dist).unwrap_or(i32::MAX);
        let y = match self.side {
            Side::Top => monitor.y,
            Side::Bottom => monitor.y.saturating_add(monitor.height).saturating_sub(height),
        };
        Rect { x: monitor.x, y, width: monitor.width, height }
    }
}
