//! FILENAME: engine/src/item.rs
//! PURPOSE: The formula data model: typed items and the formula value.
//! CONTEXT: A formula is an ordered sequence of tokens the user composes in
//! the editor: parameter references, arithmetic operators (including
//! parentheses), and literal numbers. The sequence order is significant and
//! user-reorderable, so every item carries a stable identity that survives
//! reordering and editing.
//!
//! All mutations are value-producing: `with_item`, `without_item`,
//! `with_item_moved`, and `renamed` return a new Formula and leave the
//! receiver untouched. The draft layer replaces whole values.

use serde::{Deserialize, Serialize};

/// Unique identifier for a saved formula within a collection.
pub type FormulaId = u32;

/// Stable identity of one item within a formula.
/// Assigned from a monotonic counter, never derived from wall-clock time,
/// so it stays stable across drag reorders and repeated edits.
pub type ItemId = u64;

/// The kind of a formula item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaItemKind {
    /// A reference to a parameter; `value` holds the parameter id.
    Parameter,
    /// An operator or parenthesis; `value` holds the symbol.
    Operator,
    /// A literal number; `value` holds the literal text.
    Number,
}

/// One token in a user-composed arithmetic expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaItem {
    /// Stable identity for reordering.
    pub id: ItemId,

    /// What this item is.
    pub kind: FormulaItemKind,

    /// Human-readable text shown in the editor (parameter name, operator
    /// symbol, or the literal text itself).
    pub display: String,

    /// Raw value: parameter id, operator symbol, or numeric literal text.
    pub value: String,
}

impl FormulaItem {
    /// Creates a parameter reference item.
    pub fn parameter(id: ItemId, param_id: impl Into<String>, display: impl Into<String>) -> Self {
        FormulaItem {
            id,
            kind: FormulaItemKind::Parameter,
            display: display.into(),
            value: param_id.into(),
        }
    }

    /// Creates an operator item. The symbol doubles as the display text.
    pub fn operator(id: ItemId, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        FormulaItem {
            id,
            kind: FormulaItemKind::Operator,
            display: symbol.clone(),
            value: symbol,
        }
    }

    /// Creates a literal number item. The literal text doubles as the
    /// display text.
    pub fn number(id: ItemId, literal: impl Into<String>) -> Self {
        let literal = literal.into();
        FormulaItem {
            id,
            kind: FormulaItemKind::Number,
            display: literal.clone(),
            value: literal,
        }
    }
}

/// A user-composed arithmetic formula: a name plus an ordered item sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    /// Unique identifier within the collection.
    pub id: FormulaId,

    /// User-supplied name. Empty until the formula is saved.
    pub name: String,

    /// The ordered item sequence.
    pub items: Vec<FormulaItem>,
}

impl Formula {
    /// Creates an empty, unnamed formula.
    pub fn new(id: FormulaId) -> Self {
        Formula {
            id,
            name: String::new(),
            items: Vec::new(),
        }
    }

    /// The formula rendered for listings: item display texts joined with
    /// spaces, e.g. `sales - cost`.
    pub fn display_string(&self) -> String {
        self.items
            .iter()
            .map(|item| item.display.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Distinct referenced parameter ids, in order of first appearance.
    pub fn referenced_parameter_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for item in &self.items {
            if item.kind == FormulaItemKind::Parameter && !ids.contains(&item.value.as_str()) {
                ids.push(&item.value);
            }
        }
        ids
    }

    /// The highest item id in use, or 0 for an empty formula. The draft
    /// seeds its item counter past this when editing an existing formula.
    pub fn max_item_id(&self) -> ItemId {
        self.items.iter().map(|item| item.id).max().unwrap_or(0)
    }

    /// Returns a copy with `item` appended.
    #[must_use]
    pub fn with_item(&self, item: FormulaItem) -> Formula {
        let mut next = self.clone();
        next.items.push(item);
        next
    }

    /// Returns a copy with the item at `index` removed.
    /// An out-of-range index returns the formula unchanged.
    #[must_use]
    pub fn without_item(&self, index: usize) -> Formula {
        let mut next = self.clone();
        if index < next.items.len() {
            next.items.remove(index);
        }
        next
    }

    /// Returns a copy with the item at `from` moved to `to`, preserving all
    /// other relative positions. `to` is clamped to the sequence length; an
    /// out-of-range `from` returns the formula unchanged.
    #[must_use]
    pub fn with_item_moved(&self, from: usize, to: usize) -> Formula {
        let mut next = self.clone();
        if from < next.items.len() {
            let item = next.items.remove(from);
            let to = to.min(next.items.len());
            next.items.insert(to, item);
        }
        next
    }

    /// Returns a copy with the given name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Formula {
        let mut next = self.clone();
        next.name = name.into();
        next
    }
}

/// A transient parameter value entered for one calculation run.
/// Derived fresh from the formula's referenced parameter ids whenever the
/// item sequence changes; previously entered values are discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// The parameter id this value belongs to.
    pub id: String,

    /// Display name, taken from the referencing item.
    pub name: String,

    /// The entered text. Empty means not yet entered.
    pub value: String,
}

impl ParameterValue {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ParameterValue {
            id: id.into(),
            name: name.into(),
            value: String::new(),
        }
    }

    /// Whether a value has been entered at all.
    pub fn is_entered(&self) -> bool {
        !self.value.trim().is_empty()
    }

    /// The entered text converted to a number. `None` when nothing has been
    /// entered; unparsable text converts to NaN and surfaces as a
    /// non-finite calculation result, matching how the editor treats it.
    pub fn numeric(&self) -> Option<f64> {
        if !self.is_entered() {
            return None;
        }
        Some(self.value.trim().parse::<f64>().unwrap_or(f64::NAN))
    }
}
