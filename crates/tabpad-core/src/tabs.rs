//! The tab sequence
//!
//! An ordered list of document tabs followed by exactly one "add tab"
//! control. The control is created with the set and can never be removed,
//! and new documents are always inserted in front of it.

use crate::document::Document;

/// Label of the trailing "add tab" control
pub const ADD_TAB_LABEL: &str = "+";

/// Stable identifier of a tab (indices shift as tabs close)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// What a tab holds
#[derive(Debug)]
pub enum TabKind {
    /// An editable document
    Document(Document),
    /// The trailing "+" control
    AddControl,
}

/// One slot in the tab strip
#[derive(Debug)]
pub struct Tab {
    id: TabId,
    kind: TabKind,
}

impl Tab {
    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn kind(&self) -> &TabKind {
        &self.kind
    }

    /// Display title
    pub fn title(&self) -> String {
        match &self.kind {
            TabKind::Document(doc) => doc.title(),
            TabKind::AddControl => ADD_TAB_LABEL.to_string(),
        }
    }

    pub fn is_add_control(&self) -> bool {
        matches!(self.kind, TabKind::AddControl)
    }

    /// Whether the tab shows a close affordance
    pub fn is_closable(&self) -> bool {
        !self.is_add_control()
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.kind {
            TabKind::Document(doc) => Some(doc),
            TabKind::AddControl => None,
        }
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        match &mut self.kind {
            TabKind::Document(doc) => Some(doc),
            TabKind::AddControl => None,
        }
    }
}

/// Ordered tabs with the "add tab" control last
#[derive(Debug)]
pub struct TabSet {
    tabs: Vec<Tab>,
    /// Index of the focused tab
    current: Option<usize>,
    next_id: u64,
}

impl Default for TabSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TabSet {
    /// One empty document followed by the "add tab" control
    pub fn new() -> Self {
        let mut set = Self {
            tabs: Vec::new(),
            current: None,
            next_id: 0,
        };
        let control = set.allocate_id();
        set.tabs.push(Tab {
            id: control,
            kind: TabKind::AddControl,
        });
        let first = set.insert_document(Document::new());
        set.current = Some(first);
        set
    }

    fn allocate_id(&mut self) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        id
    }

    // ==================== Access ====================

    /// Number of tabs including the "add tab" control
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Number of document tabs
    pub fn document_count(&self) -> usize {
        self.tabs.len() - 1
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Index of the "add tab" control (always the last tab)
    pub fn add_control_index(&self) -> usize {
        self.tabs.len() - 1
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.current.and_then(|i| self.tabs.get(i))
    }

    /// The focused document, or `None` when no document tab has focus
    pub fn current_document(&self) -> Option<&Document> {
        self.current_tab().and_then(Tab::document)
    }

    pub fn current_document_mut(&mut self) -> Option<&mut Document> {
        let index = self.current?;
        self.tabs.get_mut(index).and_then(Tab::document_mut)
    }

    pub fn document(&self, id: TabId) -> Option<&Document> {
        self.index_of(id).and_then(|i| self.tabs[i].document())
    }

    pub fn document_mut(&mut self, id: TabId) -> Option<&mut Document> {
        let index = self.index_of(id)?;
        self.tabs[index].document_mut()
    }

    /// Ids of all document tabs in order
    pub fn document_ids(&self) -> Vec<TabId> {
        self.tabs
            .iter()
            .filter(|tab| !tab.is_add_control())
            .map(Tab::id)
            .collect()
    }

    // ==================== Mutation ====================

    /// Insert a document in front of the "add tab" control; returns its index
    pub fn insert_document(&mut self, doc: Document) -> usize {
        let id = self.allocate_id();
        let index = self.add_control_index();
        self.tabs.insert(
            index,
            Tab {
                id,
                kind: TabKind::Document(doc),
            },
        );
        if let Some(current) = self.current.as_mut() {
            if *current >= index {
                *current += 1;
            }
        }
        index
    }

    /// Move focus; returns `true` if the focused index changed
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() || self.current == Some(index) {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Drop focus entirely (used while the window is closing)
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Remove a document tab
    ///
    /// The "add tab" control is never removed. When the focused tab goes,
    /// focus moves to its right neighbour. That may be the control itself,
    /// and the caller decides what focusing it means.
    pub fn remove(&mut self, index: usize) -> Option<Document> {
        if index >= self.add_control_index() {
            return None;
        }
        let tab = self.tabs.remove(index);

        self.current = match self.current {
            Some(current) if current > index => Some(current - 1),
            Some(current) if current == index => Some(index),
            other => other,
        };

        match tab.kind {
            TabKind::Document(doc) => Some(doc),
            TabKind::AddControl => None,
        }
    }

    /// Next document index from the focused one, cycling and skipping the control
    pub fn cycle_document(&self, forward: bool) -> Option<usize> {
        let count = self.document_count();
        if count == 0 {
            return None;
        }
        let current = self.current.filter(|&i| i < count).unwrap_or(0);
        Some(if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        })
    }
}
