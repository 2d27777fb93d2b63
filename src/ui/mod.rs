//! UI rendering module

mod dialogs;
mod file_picker;
mod layout;
mod menu;
mod render;
pub mod theme;

pub use dialogs::{ConfirmDialog, MessageBox};
pub use file_picker::{FilePicker, PickerAction, PickerEntry, PickerMode};
pub use layout::{centered_rect, get_layout, AppLayout, Region};
pub use menu::{MenuAction, MenuBar, MenuClick};
pub use render::render;
pub use theme::Theme;
