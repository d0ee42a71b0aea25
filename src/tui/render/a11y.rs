//! Accessible-name table rebuilt on every render.
//!
//! Each drawn element that a user or a test harness can address gets an
//! entry with a stable name, a role and the screen cells it covers. Mouse
//! clicks are resolved against the same table, so what is announced is what
//! is clickable.

use ratatui::layout::{Position, Rect};

pub const INPUT_NAME: &str = "multi-select-input";
pub const MENU_NAME: &str = "multi-select-menu";
pub const SUMMARY_NAME: &str = "selected-summary";
pub const REMOVE_NAME: &str = "remove option";
pub const OPTION_PREFIX: &str = "option-";
pub const PILL_PREFIX: &str = "selected-item-";

pub fn option_name(label: &str) -> String {
    format!("{}{}", OPTION_PREFIX, label)
}

pub fn pill_name(label: &str) -> String {
    format!("{}{}", PILL_PREFIX, label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Container,
    Input,
    Listbox,
    Option,
    Pill,
    Button,
}

/// What a click on an element addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Container,
    Input,
    Summary,
    Pill(usize),
    RemovePill(usize),
    Menu,
    MenuOption(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A11yNode {
    pub name: String,
    pub role: Role,
    pub area: Rect,
    pub target: Target,
    /// Text content as a screen reader would read it
    pub text: String,
    pub placeholder: Option<String>,
    /// Hover title, where the element has one
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct A11yTree {
    nodes: Vec<A11yNode>,
}

impl A11yTree {
    /// Add a node. Nodes pushed later sit on top of earlier ones for hit testing.
    pub fn push(&mut self, name: impl Into<String>, role: Role, area: Rect, target: Target) -> &mut A11yNode {
        self.nodes.push(A11yNode {
            name: name.into(),
            role,
            area,
            target,
            text: String::new(),
            placeholder: None,
            title: None,
        });
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    pub fn nodes(&self) -> &[A11yNode] {
        &self.nodes
    }

    pub fn by_name(&self, name: &str) -> Option<&A11yNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn all_by_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a A11yNode> + 'a {
        self.nodes.iter().filter(move |n| n.name.starts_with(prefix))
    }

    pub fn by_placeholder(&self, placeholder: &str) -> Option<&A11yNode> {
        self.nodes
            .iter()
            .find(|n| n.placeholder.as_deref() == Some(placeholder))
    }

    /// Topmost node covering the cell
    pub fn hit(&self, col: u16, row: u16) -> Option<&A11yNode> {
        let pos = Position::new(col, row);
        self.nodes.iter().rev().find(|n| n.area.contains(pos))
    }
}
