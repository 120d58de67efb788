//! Live cell nodes.
//!
//! A [`CellElement`] plays the part of a table cell in the widget: renderers
//! receive a shared reference and mutate its content in place, the same way a
//! DOM node is mutated through a shared handle.

use std::cell::RefCell;

/// Displayed state of one cell node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementState {
    pub content: String,
    pub classes: Vec<String>,
    pub style: Option<String>,
}

#[derive(Debug, Default)]
pub struct CellElement {
    state: RefCell<ElementState>,
}

impl CellElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        let element = Self::new();
        element.set_content(content);
        element
    }

    /// Replace the displayed content (the widget's `innerHTML`).
    pub fn set_content(&self, content: impl Into<String>) {
        self.state.borrow_mut().content = content.into();
    }

    pub fn content(&self) -> String {
        self.state.borrow().content.clone()
    }

    pub fn add_class(&self, class: &str) {
        let mut state = self.state.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }

    pub fn set_style(&self, style: Option<&str>) {
        self.state.borrow_mut().style = style.map(str::to_string);
    }

    /// Reset content, classes and style.
    pub fn clear(&self) {
        *self.state.borrow_mut() = ElementState::default();
    }

    pub fn snapshot(&self) -> ElementState {
        self.state.borrow().clone()
    }
}

/// One table row. Child 0 is the row-number cell; data column `x` is child `x + 1`.
#[derive(Debug, Default)]
pub struct RowElement {
    pub children: Vec<CellElement>,
}

impl RowElement {
    /// Create a row with a number cell followed by `columns` empty data cells.
    pub fn new(columns: usize) -> Self {
        let mut children = Vec::with_capacity(columns + 1);
        children.push(CellElement::new());
        children.extend((0..columns).map(|_| CellElement::new()));
        RowElement { children }
    }

    pub fn number_cell(&self) -> Option<&CellElement> {
        self.children.first()
    }

    pub fn data_cell(&self, x: usize) -> Option<&CellElement> {
        self.children.get(x.checked_add(1)?)
    }
}
