//! The editing session
//!
//! Owns the tab set, the theme mode, the status line and the queue of
//! dialogs waiting for the user. Every operation the window offers lives
//! here so it can be driven (and tested) without a terminal.
//!
//! Closing the window is a small state machine: the documents present when
//! the close starts are walked in order, unmodified ones are dropped, and
//! the walk pauses on each modified one until its dialogs are answered.

use crate::buffer::{EditCommand, EditOutcome};
use crate::commands::Command;
use crate::dialog::{AfterSave, Dialog, DialogId, PendingDialog};
use crate::document::Document;
use crate::error::{Result, TabpadError};
use crate::files;
use crate::tabs::{Tab, TabId, TabSet};
use crate::theme::ThemeMode;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Session {
    tabs: TabSet,
    theme: ThemeMode,
    /// Status line text
    status: String,
    /// Dialogs waiting for an answer, front first
    dialogs: VecDeque<PendingDialog>,
    next_dialog_id: u64,
    /// Documents still to be closed while the window is closing
    closing: Option<VecDeque<TabId>>,
    /// Every document has been dealt with; exit once the queue drains
    closed: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session with one empty document, light theme
    pub fn new() -> Self {
        Self::with_theme(ThemeMode::default())
    }

    pub fn with_theme(theme: ThemeMode) -> Self {
        let mut session = Self {
            tabs: TabSet::new(),
            theme,
            status: String::new(),
            dialogs: VecDeque::new(),
            next_dialog_id: 0,
            closing: None,
            closed: false,
        };
        session.on_current_changed();
        session
    }

    // ==================== Queries ====================

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The focused document, or `None` when no document tab has focus
    pub fn current_document(&self) -> Option<&Document> {
        self.tabs.current_document()
    }

    /// Id of the focused document tab
    pub fn current_document_id(&self) -> Option<TabId> {
        self.tabs
            .current_tab()
            .filter(|tab| !tab.is_add_control())
            .map(Tab::id)
    }

    /// The dialog the UI should show now
    pub fn pending_dialog(&self) -> Option<&PendingDialog> {
        self.dialogs.front()
    }

    pub fn has_pending_dialog(&self) -> bool {
        !self.dialogs.is_empty()
    }

    pub fn is_closing(&self) -> bool {
        self.closing.is_some()
    }

    /// The window close has finished and nothing is left to show
    pub fn should_exit(&self) -> bool {
        self.closed && self.dialogs.is_empty()
    }

    // ==================== Commands ====================

    /// Run a user command; ignored while a dialog is pending
    pub fn execute(&mut self, command: Command) {
        if self.has_pending_dialog() {
            debug!(command = command.name(), "ignored while a dialog is open");
            return;
        }
        match command {
            Command::NewTab => {
                self.new_tab();
            }
            Command::Open => self.request_open(),
            Command::OpenPath(path) => {
                self.open_file(Some(&path));
            }
            Command::Save => self.request_save(),
            Command::CloseTab(index) => self.close_tab(index),
            Command::CloseCurrentTab => {
                if let Some(index) = self.tabs.current_index() {
                    self.close_tab(index);
                }
            }
            Command::CloseWindow => self.close_window(),
            Command::SelectTab(index) => self.select_tab(index),
            Command::NextTab => {
                if let Some(index) = self.tabs.cycle_document(true) {
                    self.select_tab(index);
                }
            }
            Command::PrevTab => {
                if let Some(index) = self.tabs.cycle_document(false) {
                    self.select_tab(index);
                }
            }
            Command::ToggleTheme => {
                self.toggle_theme();
            }
            Command::Edit(edit) => {
                self.edit(edit);
            }
        }
    }

    // ==================== Tabs ====================

    /// Insert an empty "Untitled" document before "+" and focus it
    pub fn new_tab(&mut self) -> TabId {
        let index = self.tabs.insert_document(Document::new());
        let id = self.tabs.tabs()[index].id();
        debug!(%id, index, "new tab");
        self.select_tab(index);
        id
    }

    /// Focus a tab; focusing "+" spawns a new document instead
    pub fn select_tab(&mut self, index: usize) {
        if self.tabs.set_current(index) {
            self.on_current_changed();
        }
    }

    fn on_current_changed(&mut self) {
        let Some(tab) = self.tabs.current_tab() else {
            return;
        };
        if tab.is_add_control() {
            if self.closing.is_some() {
                self.tabs.clear_current();
            } else {
                self.new_tab();
            }
            return;
        }
        if self.tabs.tab_count() > 1 {
            self.status = tab.title();
        }
        self.update_cursor_status();
    }

    /// Show the focused document's cursor as "Ln L, Col C"
    pub fn update_cursor_status(&mut self) {
        if let Some(doc) = self.tabs.current_document() {
            let cursor = doc.buffer().cursor();
            self.status = format!("Ln {}, Col {}", cursor.line + 1, cursor.column + 1);
        }
    }

    /// Flag the focused document as modified
    pub fn mark_modified(&mut self) {
        if let Some(doc) = self.tabs.current_document_mut() {
            if !doc.is_modified() {
                debug!(name = doc.name(), "document modified");
            }
            doc.mark_modified();
        }
    }

    /// Close the tab at `index`, asking first when it has unsaved changes
    ///
    /// The "+" control and out-of-range indices are ignored.
    pub fn close_tab(&mut self, index: usize) {
        let Some(tab) = self.tabs.get(index) else {
            return;
        };
        let Some(doc) = tab.document() else {
            return;
        };
        let id = tab.id();
        if doc.is_modified() {
            let title = tab.title();
            self.push_dialog(Dialog::ConfirmSave { tab: id, title });
        } else {
            self.remove_tab(id);
        }
    }

    fn remove_tab(&mut self, id: TabId) {
        let Some(index) = self.tabs.index_of(id) else {
            return;
        };
        let was_current = self.tabs.current_index() == Some(index);
        if self.tabs.remove(index).is_some() {
            debug!(%id, index, "tab closed");
            if was_current {
                self.on_current_changed();
            }
        }
    }

    // ==================== Editing ====================

    /// Apply an edit to the focused document
    pub fn edit(&mut self, command: EditCommand) -> EditOutcome {
        let Some(doc) = self.tabs.current_document_mut() else {
            return EditOutcome::default();
        };
        let outcome = doc.buffer_mut().apply(command);
        if outcome.text_changed {
            self.mark_modified();
        }
        if outcome.text_changed || outcome.cursor_moved {
            self.update_cursor_status();
        }
        outcome
    }

    /// Scroll the focused document's view without moving the cursor
    pub fn scroll_by(&mut self, delta: isize) {
        if let Some(doc) = self.tabs.current_document_mut() {
            doc.buffer_mut().scroll_by(delta);
        }
    }

    /// Scroll the focused document so its cursor is within `height` rows
    pub fn reveal_cursor(&mut self, height: usize) {
        if let Some(doc) = self.tabs.current_document_mut() {
            doc.buffer_mut().ensure_cursor_visible(height);
        }
    }

    /// Selected text of the focused document
    pub fn copy_selection(&self) -> Option<String> {
        self.tabs.current_document()?.buffer().selected_text()
    }

    /// Remove and return the selected text of the focused document
    pub fn cut_selection(&mut self) -> Option<String> {
        let text = self.tabs.current_document_mut()?.buffer_mut().cut_selection()?;
        self.mark_modified();
        self.update_cursor_status();
        Some(text)
    }

    pub fn paste(&mut self, text: &str) -> EditOutcome {
        if text.is_empty() {
            return EditOutcome::default();
        }
        self.edit(EditCommand::InsertStr(text.to_string()))
    }

    // ==================== Theme ====================

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        info!(theme = self.theme.as_str(), "theme switched");
        self.theme
    }

    // ==================== Open / Save ====================

    /// Queue the open-file prompt
    pub fn request_open(&mut self) {
        self.push_dialog(Dialog::OpenFile);
    }

    /// Open a file; `None` (prompt cancelled) does nothing
    ///
    /// The text goes into the focused tab when that tab is an untouched
    /// "Untitled" document, otherwise into a new tab. Read failures are
    /// reported with an error dialog and leave the tabs untouched.
    pub fn open_file(&mut self, path: Option<&Path>) -> Option<TabId> {
        let path = path?;
        match self.load_file(path) {
            Ok(id) => Some(id),
            Err(err) => {
                self.report_error(&err);
                None
            }
        }
    }

    fn load_file(&mut self, path: &Path) -> Result<TabId> {
        let text = files::read_text(path)?;
        info!(path = %path.display(), bytes = text.len(), "file opened");

        let reuse = self.tabs.current_document().is_some_and(Document::is_empty);
        if reuse {
            if let Some(doc) = self.tabs.current_document_mut() {
                doc.load(path, &text);
            }
            self.update_cursor_status();
        } else {
            let index = self.tabs.insert_document(Document::loaded(path, &text));
            self.select_tab(index);
        }
        self.current_document_id()
            .ok_or_else(|| TabpadError::invalid("no document focused after open"))
    }

    /// Queue the save prompt for the focused document
    pub fn request_save(&mut self) {
        if let Some(tab) = self.current_document_id() {
            self.push_dialog(Dialog::SaveFile {
                tab,
                then: AfterSave::Nothing,
            });
        }
    }

    /// Save the focused document to `path`; `None` does nothing
    pub fn save_file(&mut self, path: Option<&Path>) -> bool {
        match self.current_document_id() {
            Some(id) => self.save_tab(id, path),
            None => false,
        }
    }

    /// Save a document to `path`; returns `true` on success
    ///
    /// On success the tab title becomes the file's base name and the
    /// modified marker is cleared. Write failures queue an error dialog.
    pub fn save_tab(&mut self, id: TabId, path: Option<&Path>) -> bool {
        let Some(path) = path else {
            return false;
        };
        let Some(doc) = self.tabs.document(id) else {
            return false;
        };
        let text = doc.text();
        match files::write_text(path, &text) {
            Ok(()) => {
                if let Some(doc) = self.tabs.document_mut(id) {
                    doc.saved_as(path);
                }
                info!(path = %path.display(), bytes = text.len(), "file saved");
                true
            }
            Err(err) => {
                self.report_error(&err);
                false
            }
        }
    }

    // ==================== Window close ====================

    /// Close every document present now, asking about unsaved ones in order
    pub fn close_window(&mut self) {
        if self.closing.is_some() {
            return;
        }
        let ids: VecDeque<TabId> = self.tabs.document_ids().into();
        info!(documents = ids.len(), "closing window");
        self.closing = Some(ids);
        self.advance_window_close();
    }

    fn advance_window_close(&mut self) {
        while let Some(id) = self.closing.as_mut().and_then(VecDeque::pop_front) {
            let Some(index) = self.tabs.index_of(id) else {
                continue;
            };
            let title = match self.tabs.get(index).and_then(Tab::document) {
                Some(doc) if doc.is_modified() => doc.title(),
                _ => {
                    self.remove_tab(id);
                    continue;
                }
            };
            self.select_tab(index);
            self.push_dialog(Dialog::ConfirmSave { tab: id, title });
            return;
        }
        if self.closing.is_some() && !self.closed {
            info!("all documents closed");
            self.closed = true;
        }
    }

    // ==================== Dialog answers ====================

    /// Answer the open-file prompt; `None` means cancelled
    pub fn answer_open(&mut self, path: Option<PathBuf>) {
        if self.take_dialog(|d| matches!(d, Dialog::OpenFile)).is_some() {
            self.open_file(path.as_deref());
        }
    }

    /// Answer a save prompt; `None` means cancelled
    ///
    /// A save prompt raised while closing a tab removes the tab afterwards
    /// whether or not anything was written.
    pub fn answer_save(&mut self, path: Option<PathBuf>) {
        let Some(Dialog::SaveFile { tab, then }) =
            self.take_dialog(|d| matches!(d, Dialog::SaveFile { .. }))
        else {
            return;
        };
        self.save_tab(tab, path.as_deref());
        if then == AfterSave::CloseTab {
            self.remove_tab(tab);
            self.advance_window_close();
        }
    }

    /// Answer an unsaved-changes question: `true` saves first, `false` discards
    pub fn answer_confirm(&mut self, save: bool) {
        let Some(Dialog::ConfirmSave { tab, .. }) =
            self.take_dialog(|d| matches!(d, Dialog::ConfirmSave { .. }))
        else {
            return;
        };
        if save {
            let id = self.allocate_dialog_id();
            self.dialogs.push_front(PendingDialog {
                id,
                dialog: Dialog::SaveFile {
                    tab,
                    then: AfterSave::CloseTab,
                },
            });
        } else {
            self.remove_tab(tab);
            self.advance_window_close();
        }
    }

    /// Acknowledge an error dialog
    pub fn dismiss_error(&mut self) {
        self.take_dialog(|d| matches!(d, Dialog::Error { .. }));
    }

    fn take_dialog(&mut self, expected: impl Fn(&Dialog) -> bool) -> Option<Dialog> {
        match self.dialogs.front() {
            Some(pending) if expected(&pending.dialog) => {
                self.dialogs.pop_front().map(|pending| pending.dialog)
            }
            Some(pending) => {
                warn!(heading = pending.dialog.heading(), "answer does not match the open dialog");
                None
            }
            None => None,
        }
    }

    fn allocate_dialog_id(&mut self) -> DialogId {
        let id = DialogId(self.next_dialog_id);
        self.next_dialog_id += 1;
        id
    }

    fn push_dialog(&mut self, dialog: Dialog) {
        let id = self.allocate_dialog_id();
        debug!(heading = dialog.heading(), "dialog queued");
        self.dialogs.push_back(PendingDialog { id, dialog });
    }

    fn report_error(&mut self, err: &TabpadError) {
        warn!(error = %err, "operation failed");
        self.push_dialog(Dialog::Error {
            message: err.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Motion;
    use pretty_assertions::assert_eq;

    fn titles(session: &Session) -> Vec<String> {
        session.tabs().tabs().iter().map(Tab::title).collect()
    }

    fn type_text(session: &mut Session, text: &str) {
        session.edit(EditCommand::InsertStr(text.to_string()));
    }

    #[test]
    fn test_startup_state() {
        let session = Session::new();
        assert_eq!(titles(&session), vec!["Untitled", "+"]);
        assert_eq!(session.theme(), ThemeMode::Light);
        assert_eq!(session.status(), "Ln 1, Col 1");
        assert!(!session.has_pending_dialog());
        assert!(!session.should_exit());
    }

    #[test]
    fn test_new_tab_inserts_before_control() {
        let mut session = Session::new();
        session.new_tab();
        session.new_tab();
        assert_eq!(titles(&session), vec!["Untitled", "Untitled", "Untitled", "+"]);
        assert_eq!(session.tabs().current_index(), Some(2));
    }

    #[test]
    fn test_selecting_control_spawns_tab() {
        let mut session = Session::new();
        session.select_tab(1);
        assert_eq!(session.tabs().document_count(), 2);
        assert_eq!(session.tabs().current_index(), Some(1));
        assert!(session.current_document().is_some());
    }

    #[test]
    fn test_edit_marks_modified_and_updates_status() {
        let mut session = Session::new();
        type_text(&mut session, "ab\ncd");
        assert_eq!(titles(&session)[0], "* Untitled");
        assert_eq!(session.status(), "Ln 2, Col 3");

        session.edit(EditCommand::move_to(Motion::DocStart));
        assert_eq!(session.status(), "Ln 1, Col 1");
    }

    #[test]
    fn test_mark_modified_is_idempotent() {
        let mut session = Session::new();
        session.mark_modified();
        session.mark_modified();
        assert_eq!(titles(&session)[0], "* Untitled");
    }

    #[test]
    fn test_selection_change_shows_title_then_cursor() {
        let mut session = Session::new();
        session.new_tab();
        type_text(&mut session, "xyz");
        session.select_tab(0);
        assert_eq!(session.status(), "Ln 1, Col 1");
        session.select_tab(1);
        assert_eq!(session.status(), "Ln 1, Col 4");
    }

    #[test]
    fn test_close_unmodified_tab_removes_it() {
        let mut session = Session::new();
        session.new_tab();
        session.select_tab(0);
        session.close_tab(1);
        assert_eq!(titles(&session), vec!["Untitled", "+"]);
        assert_eq!(session.tabs().current_index(), Some(0));
        assert!(!session.has_pending_dialog());
    }

    #[test]
    fn test_close_focused_rightmost_tab_spawns_untitled() {
        let mut session = Session::new();
        type_text(&mut session, "keep");
        session.new_tab();
        let closed = session.current_document_id();
        session.close_tab(1);

        // Focus moves right onto "+", which opens a fresh document
        assert_eq!(titles(&session), vec!["* Untitled", "Untitled", "+"]);
        assert_eq!(session.tabs().current_index(), Some(1));
        assert_ne!(session.current_document_id(), closed);
        assert_eq!(session.tabs().get(0).unwrap().document().unwrap().text(), "keep");
    }

    #[test]
    fn test_close_focused_middle_tab_focuses_right_neighbour() {
        let mut session = Session::new();
        session.new_tab();
        let right = session.new_tab();
        session.select_tab(1);
        session.close_tab(1);
        assert_eq!(titles(&session), vec!["Untitled", "Untitled", "+"]);
        assert_eq!(session.current_document_id(), Some(right));
    }

    #[test]
    fn test_close_control_is_ignored() {
        let mut session = Session::new();
        session.close_tab(1);
        session.close_tab(7);
        assert_eq!(titles(&session), vec!["Untitled", "+"]);
    }

    #[test]
    fn test_close_last_document_spawns_replacement() {
        let mut session = Session::new();
        session.close_tab(0);
        assert_eq!(titles(&session), vec!["Untitled", "+"]);
        assert_eq!(session.tabs().current_index(), Some(0));
    }

    #[test]
    fn test_close_modified_asks_then_discards() {
        let mut session = Session::new();
        type_text(&mut session, "draft");
        session.close_tab(0);

        let pending = session.pending_dialog().unwrap();
        assert!(matches!(pending.dialog, Dialog::ConfirmSave { .. }));
        assert_eq!(
            pending.dialog.message().as_deref(),
            Some("Do you want to save changes to \"Untitled\" before closing?")
        );

        session.answer_confirm(false);
        assert!(!session.has_pending_dialog());
        assert_eq!(titles(&session), vec!["Untitled", "+"]);
        assert_eq!(session.current_document().unwrap().text(), "");
    }

    #[test]
    fn test_close_modified_save_cancelled_still_removes() {
        let mut session = Session::new();
        session.new_tab();
        type_text(&mut session, "draft");
        session.close_tab(1);
        session.answer_confirm(true);
        assert!(matches!(
            session.pending_dialog().unwrap().dialog,
            Dialog::SaveFile {
                then: AfterSave::CloseTab,
                ..
            }
        ));
        session.answer_save(None);
        assert_eq!(titles(&session), vec!["Untitled", "Untitled", "+"]);
        assert!(!session.current_document().unwrap().is_modified());
    }

    #[test]
    fn test_close_saves_the_closed_tab_not_the_focused_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("first.txt");

        let mut session = Session::new();
        type_text(&mut session, "first");
        session.new_tab();
        type_text(&mut session, "second");

        session.close_tab(0);
        session.answer_confirm(true);
        session.answer_save(Some(path.clone()));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
        assert_eq!(titles(&session), vec!["* Untitled", "+"]);
    }

    #[test]
    fn test_save_then_title_is_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");

        let mut session = Session::new();
        type_text(&mut session, "hello");
        session.request_save();
        session.answer_save(Some(path.clone()));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert_eq!(titles(&session), vec!["a.txt", "+"]);
    }

    #[test]
    fn test_save_failure_reports_error_and_keeps_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.txt");

        let mut session = Session::new();
        type_text(&mut session, "hello");
        assert!(!session.save_file(Some(&path)));
        assert!(matches!(
            session.pending_dialog().unwrap().dialog,
            Dialog::Error { .. }
        ));
        assert_eq!(titles(&session)[0], "* Untitled");

        session.dismiss_error();
        assert!(!session.has_pending_dialog());
    }

    #[test]
    fn test_open_cancelled_does_nothing() {
        let mut session = Session::new();
        session.request_open();
        session.answer_open(None);
        assert_eq!(titles(&session), vec!["Untitled", "+"]);
        assert!(!session.has_pending_dialog());
    }

    #[test]
    fn test_commands_blocked_by_dialog() {
        let mut session = Session::new();
        session.execute(Command::Open);
        session.execute(Command::NewTab);
        assert_eq!(session.tabs().document_count(), 1);
        session.answer_open(None);
        session.execute(Command::NewTab);
        assert_eq!(session.tabs().document_count(), 2);
    }

    #[test]
    fn test_mismatched_answer_is_ignored() {
        let mut session = Session::new();
        session.request_open();
        session.answer_confirm(true);
        session.dismiss_error();
        assert!(matches!(
            session.pending_dialog().unwrap().dialog,
            Dialog::OpenFile
        ));
    }

    #[test]
    fn test_cut_and_paste() {
        let mut session = Session::new();
        type_text(&mut session, "hello");
        session.edit(EditCommand::SelectAll);
        assert_eq!(session.copy_selection().as_deref(), Some("hello"));
        assert_eq!(session.cut_selection().as_deref(), Some("hello"));
        assert_eq!(session.current_document().unwrap().text(), "");
        session.paste("bye");
        assert_eq!(session.current_document().unwrap().text(), "bye");
    }

    #[test]
    fn test_cycle_tabs() {
        let mut session = Session::new();
        session.new_tab();
        session.execute(Command::NextTab);
        assert_eq!(session.tabs().current_index(), Some(0));
        session.execute(Command::PrevTab);
        assert_eq!(session.tabs().current_index(), Some(1));
    }
}
