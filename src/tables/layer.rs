//! Layer table entry

use super::TableEntry;
use crate::types::Color;

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Position in the layer table
    pub index: usize,
    /// Layer name
    pub name: String,
    /// Layer color
    pub color: Color,
    pub visible: bool,
    pub locked: bool,
}

impl Layer {
    /// Create a new visible, unlocked layer
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            index: 0,
            name: name.into(),
            color: Color::BLACK,
            visible: true,
            locked: false,
        }
    }

    /// Create the layer objects land on when none is given
    pub fn default_layer() -> Self {
        Self::new("Default")
    }

    /// Create a layer with a specific color
    pub fn with_color(name: impl Into<String>, color: Color) -> Self {
        Layer {
            color,
            ..Self::new(name)
        }
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }
}

impl TableEntry for Layer {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn index(&self) -> usize {
        self.index
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}
