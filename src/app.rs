//! Application controller
//!
//! Routes terminal events to the menu bar, the tab strip, the editor or the
//! dialog on screen, and mirrors the session's pending dialog as an overlay.

use crate::clipboard;
use crate::core::Result;
use crate::events::Event;
use crate::panels::{Panel, PanelRegistry};
use crate::state::{AppState, ViewSettings};
use crate::ui::{
    get_layout, AppLayout, ConfirmDialog, FilePicker, MenuAction, MenuBar, MenuClick, MessageBox,
    PickerAction, PickerMode, Region,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::path::PathBuf;
use tabpad_core::{Command, Dialog, EditCommand, Session};

/// Modal widget drawn over the window
pub enum Overlay {
    None,
    Picker(FilePicker),
    Confirm(ConfirmDialog),
    Message(MessageBox),
}

pub struct App {
    pub session: Session,
    pub state: AppState,
    pub panels: PanelRegistry,
    pub menu: MenuBar,
    pub overlay: Overlay,
    /// Row areas from the last render
    pub layout: AppLayout,
}

impl App {
    pub fn new(session: Session, view: ViewSettings) -> Self {
        let mut app = Self {
            session,
            state: AppState::new(view),
            panels: PanelRegistry::new(view),
            menu: MenuBar::new(),
            overlay: Overlay::None,
            layout: AppLayout::default(),
        };
        app.sync_dialog();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Recompute the layout for a terminal of `width` x `height`
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = get_layout(Rect::new(0, 0, width, height));
        self.panels.notify_resize_all(&self.layout);
    }

    /// Run a command against the session and refresh the overlay
    pub fn execute(&mut self, command: Command) {
        self.session.execute(command);
        self.sync_dialog();
    }

    /// Show the session's front dialog, or clear the overlay when none is left
    pub fn sync_dialog(&mut self) {
        match self.session.pending_dialog() {
            None => {
                if self.state.input_mode.is_modal() {
                    self.state.input_mode.to_normal();
                }
                self.overlay = Overlay::None;
            }
            Some(pending) if self.state.input_mode.is_modal_open(pending.id) => {}
            Some(pending) => {
                let id = pending.id;
                self.overlay = match &pending.dialog {
                    Dialog::OpenFile => Overlay::Picker(FilePicker::new(PickerMode::Open, &self.state.cwd, None)),
                    Dialog::SaveFile { tab, .. } => {
                        let path = self.session.tabs().document(*tab).and_then(|d| d.path());
                        let dir = path
                            .and_then(|p| p.parent())
                            .filter(|p| p.is_dir())
                            .map(PathBuf::from)
                            .unwrap_or_else(|| self.state.cwd.clone());
                        let name = path
                            .and_then(|p| p.file_name())
                            .map(|n| n.to_string_lossy().to_string());
                        Overlay::Picker(FilePicker::new(PickerMode::Save, &dir, name.as_deref()))
                    }
                    dialog @ Dialog::ConfirmSave { .. } => Overlay::Confirm(ConfirmDialog::new(
                        dialog.heading(),
                        dialog.message().unwrap_or_default(),
                    )),
                    dialog @ Dialog::Error { .. } => Overlay::Message(MessageBox::new(
                        dialog.heading(),
                        dialog.message().unwrap_or_default(),
                    )),
                };
                self.menu.close();
                self.state.input_mode.open_modal(id);
            }
        }

        if self.session.should_exit() {
            self.state.quit();
        }
    }

    /// Handle one input event
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Resize(width, height) = event {
            self.resize(width, height);
            return Ok(());
        }

        if self.state.input_mode.is_modal() {
            self.handle_modal(&event);
        } else if self.state.input_mode.is_menu() {
            self.handle_menu(&event);
        } else {
            self.handle_normal(&event)?;
        }

        self.sync_dialog();
        Ok(())
    }

    fn handle_normal(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                if self.open_menu_from_key(key) {
                    return Ok(());
                }
                if let Some(action) = MenuAction::from_key(key) {
                    self.run_menu_action(action);
                    return Ok(());
                }
                if self.panels.tab_strip.handle_input(event, &mut self.session, &mut self.state)? {
                    return Ok(());
                }
                self.panels.editor.handle_input(event, &mut self.session, &mut self.state)?;
            }
            Event::Mouse(mouse) => {
                if self.panels.tab_strip.handle_input(event, &mut self.session, &mut self.state)? {
                    return Ok(());
                }
                let region = self.layout.region_at(mouse.column, mouse.row);
                if region == Some(Region::MenuBar) {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        self.menu.handle_click(mouse.column, mouse.row);
                        if self.menu.is_open() {
                            self.state.input_mode.open_menu();
                        }
                    }
                    return Ok(());
                }
                self.panels.editor.handle_input(event, &mut self.session, &mut self.state)?;
            }
            Event::Resize(..) => {}
        }
        Ok(())
    }

    /// F10 opens the first menu, Alt+letter the menu with that hotkey
    fn open_menu_from_key(&mut self, key: &KeyEvent) -> bool {
        let opened = match key.code {
            KeyCode::F(10) => {
                self.menu.open(0);
                true
            }
            KeyCode::Char(c) if key.modifiers == KeyModifiers::ALT => self.menu.open_by_hotkey(c),
            _ => false,
        };
        if opened {
            self.state.input_mode.open_menu();
        }
        opened
    }

    fn handle_menu(&mut self, event: &Event) {
        let action = match event {
            Event::Key(key) => self.menu.handle_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => match self.menu.handle_click(mouse.column, mouse.row) {
                    MenuClick::Action(action) => Some(action),
                    MenuClick::Handled => None,
                    MenuClick::Outside => {
                        self.menu.close();
                        None
                    }
                },
                MouseEventKind::Moved => {
                    self.menu.handle_hover(mouse.column, mouse.row);
                    None
                }
                _ => None,
            },
            Event::Resize(..) => None,
        };

        if !self.menu.is_open() {
            self.state.input_mode.to_normal();
        }
        if let Some(action) = action {
            self.run_menu_action(action);
        }
    }

    fn handle_modal(&mut self, event: &Event) {
        let (key, click) = match event {
            Event::Key(key) => (Some(key), None),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => (None, Some((*column, *row))),
            _ => return,
        };

        let answered = match &mut self.overlay {
            Overlay::None => false,
            Overlay::Picker(picker) => {
                let action = match (key, click) {
                    (Some(key), _) => picker.handle_key(key),
                    (None, Some((x, y))) if picker.contains(x, y) => picker.handle_click(x, y),
                    _ => PickerAction::None,
                };
                let answer = match action {
                    PickerAction::Pick(path) => Some(Some(path)),
                    PickerAction::Cancel => Some(None),
                    PickerAction::None => None,
                };
                match (answer, picker.mode()) {
                    (Some(path), PickerMode::Open) => {
                        self.session.answer_open(path);
                        true
                    }
                    (Some(path), PickerMode::Save) => {
                        self.session.answer_save(path);
                        true
                    }
                    (None, _) => false,
                }
            }
            Overlay::Confirm(dialog) => {
                let answer = match (key, click) {
                    (Some(key), _) => dialog.handle_key(key),
                    (None, Some((x, y))) => dialog.handle_click(x, y),
                    _ => None,
                };
                match answer {
                    Some(save) => {
                        self.session.answer_confirm(save);
                        true
                    }
                    None => false,
                }
            }
            Overlay::Message(message) => {
                let dismissed = match (key, click) {
                    (Some(key), _) => message.handle_key(key),
                    (None, Some((x, y))) => message.handle_click(x, y),
                    _ => false,
                };
                if dismissed {
                    self.session.dismiss_error();
                }
                dismissed
            }
        };

        if answered {
            self.overlay = Overlay::None;
            self.state.input_mode.to_normal();
        }
    }

    /// Perform a menu item or its shortcut
    pub fn run_menu_action(&mut self, action: MenuAction) {
        tracing::debug!(action = action.label(), "menu action");
        match action {
            MenuAction::New => self.session.execute(Command::NewTab),
            MenuAction::Open => self.session.execute(Command::Open),
            MenuAction::Save => self.session.execute(Command::Save),
            MenuAction::CloseTab => self.session.execute(Command::CloseCurrentTab),
            MenuAction::Exit => self.session.execute(Command::CloseWindow),
            MenuAction::ToggleTheme => self.session.execute(Command::ToggleTheme),
            MenuAction::Undo => self.edit(EditCommand::Undo),
            MenuAction::Redo => self.edit(EditCommand::Redo),
            MenuAction::SelectAll => self.edit(EditCommand::SelectAll),
            MenuAction::Copy => {
                if let Some(text) = self.session.copy_selection() {
                    clipboard::copy(&text);
                }
            }
            MenuAction::Cut => {
                if let Some(text) = self.session.cut_selection() {
                    clipboard::copy(&text);
                    self.reveal_cursor();
                }
            }
            MenuAction::Paste => {
                let text = clipboard::paste();
                self.session.paste(&text);
                self.reveal_cursor();
            }
        }
        self.sync_dialog();
    }

    fn edit(&mut self, command: EditCommand) {
        self.session.execute(Command::Edit(command));
        self.reveal_cursor();
    }

    fn reveal_cursor(&mut self) {
        self.session.reveal_cursor(self.panels.editor.visible_height());
    }
}
