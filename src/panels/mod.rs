//! Panel system with trait-based composition
//!
//! Each panel implements the Panel trait for consistent behavior. Panels
//! hold only view state; documents and tabs belong to the session.

mod editor;
mod tab_strip;

pub use editor::EditorPanel;
pub use tab_strip::TabStrip;

use crate::core::Result;
use crate::events::Event;
use crate::state::{AppState, ViewSettings};
use crate::ui::Theme;
use ratatui::layout::Rect;
use ratatui::Frame;
use tabpad_core::Session;

/// Panel trait - defines the interface for all panels
pub trait Panel {
    /// Get the panel's display name
    fn name(&self) -> &str;

    /// Handle an input event
    ///
    /// Returns Ok(true) if the event was consumed, Ok(false) to propagate.
    fn handle_input(
        &mut self,
        event: &Event,
        session: &mut Session,
        state: &mut AppState,
    ) -> Result<bool>;

    /// Render the panel to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session, theme: &Theme, focused: bool);

    /// Called when the panel area is resized
    fn on_resize(&mut self, _cols: u16, _rows: u16) {}
}

/// Container for the window's panels
pub struct PanelRegistry {
    pub tab_strip: TabStrip,
    pub editor: EditorPanel,
}

impl PanelRegistry {
    pub fn new(view: ViewSettings) -> Self {
        Self {
            tab_strip: TabStrip::new(),
            editor: EditorPanel::new(view),
        }
    }

    /// Notify all panels of resize with full layout
    pub fn notify_resize_all(&mut self, layout: &crate::ui::AppLayout) {
        self.tab_strip
            .on_resize(layout.tab_strip.width, layout.tab_strip.height);
        self.editor.on_resize(layout.editor.width, layout.editor.height);
    }
}
