//! Pure operations over a category forest.
//!
//! Both traversals are pre-order depth-first (a node, then its whole subtree,
//! then its next sibling) and use an explicit stack, so arbitrarily deep trees
//! cannot exhaust the call stack.

use serde::Serialize;
use utoipa::ToSchema;

use crate::features::categories::models::Category;
use crate::shared::constants::{CATEGORY_INDENT_UNIT_PX, PARENT_OPTION_MARKER};

/// Every node of the forest exactly once, in pre-order.
pub fn flatten(forest: &[Category]) -> Vec<&Category> {
    let mut out = Vec::new();
    let mut stack: Vec<&Category> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children.iter().rev());
    }

    out
}

/// One entry of the parent selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParentOption {
    pub id: i64,
    pub label: String,
    /// Traversal level, 0 for roots
    pub level: usize,
    pub disabled: bool,
}

/// Parent selector entries in pre-order.
///
/// The label prefix counts traversal levels starting at 0, independent of the
/// node's own `depth` field. When `editing` names a node, only that node's
/// option is disabled; its descendants stay selectable and the backend is
/// responsible for refusing a cycle through them.
pub fn render_options(forest: &[Category], editing: Option<i64>) -> Vec<ParentOption> {
    let mut out = Vec::new();
    let mut stack: Vec<(&Category, usize)> = forest.iter().rev().map(|c| (c, 0)).collect();

    while let Some((node, level)) = stack.pop() {
        out.push(ParentOption {
            id: node.id,
            label: option_label(&node.name, level),
            level,
            disabled: editing == Some(node.id),
        });
        stack.extend(node.children.iter().rev().map(|c| (c, level + 1)));
    }

    out
}

fn option_label(name: &str, level: usize) -> String {
    if level == 0 {
        return name.to_string();
    }
    let markers: String = std::iter::repeat(PARENT_OPTION_MARKER).take(level).collect();
    format!("{} {}", markers, name)
}

/// Row of the flat category table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub depth: u32,
    pub sort_order: i32,
    /// Left padding for the name cell: `(depth - 1) * 24`
    pub indent_px: u32,
    pub is_root: bool,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            depth: c.depth,
            sort_order: c.sort_order,
            indent_px: c.depth.saturating_sub(1) * CATEGORY_INDENT_UNIT_PX,
            is_root: c.is_root(),
        }
    }
}

/// Table rows for a forest, in on-screen order
pub fn rows(forest: &[Category]) -> Vec<CategoryRow> {
    flatten(forest).into_iter().map(CategoryRow::from).collect()
}
