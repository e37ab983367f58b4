//! FILENAME: engine/src/collection.rs
//! PURPOSE: The formula collection manager and the draft editing state.
//! CONTEXT: The collection holds the saved formulas in insertion order and
//! hands out drafts for composing or editing one formula at a time. A
//! draft owns a whole Formula value; every edit replaces that value via
//! the Formula's value-producing methods and resets the derived state
//! (entered parameter values, last calculation) when the item sequence
//! changes. Dropping a draft without saving is the cancel path; nothing
//! was persisted, so there is nothing to roll back.
//!
//! Saving requires a non-empty trimmed name, a syntactically valid item
//! sequence, and a prior successful calculation check.

use thiserror::Error;

use crate::evaluator::{self, CalculationResult};
use crate::item::{Formula, FormulaId, FormulaItem, FormulaItemKind, ItemId, ParameterValue};
use crate::validator::{validate_items, ValidationError, ValidationResult, OPERATOR_SYMBOLS};

/// Why a draft could not be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("The formula needs a name before it can be saved.")]
    MissingName,

    #[error("{0}")]
    InvalidFormula(ValidationError),

    #[error("Run the calculation check before saving.")]
    NotCalculated,

    #[error("The formula cannot be saved while the calculation check fails.")]
    CalculationFailed,
}

// ============================================================================
// COLLECTION
// ============================================================================

/// An in-memory, ordered collection of saved formulas.
#[derive(Debug, Clone, Default)]
pub struct FormulaCollection {
    formulas: Vec<Formula>,
    next_id: FormulaId,
}

impl FormulaCollection {
    pub fn new() -> Self {
        FormulaCollection {
            formulas: Vec::new(),
            next_id: 1,
        }
    }

    /// The saved formulas in insertion order.
    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    pub fn get(&self, id: FormulaId) -> Option<&Formula> {
        self.formulas.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Starts a draft for a new formula with a freshly assigned id and an
    /// empty item sequence.
    pub fn begin(&mut self) -> FormulaDraft {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        FormulaDraft::new(Formula::new(id), false)
    }

    /// Starts a draft editing an existing formula. Returns None for an
    /// unknown id.
    pub fn begin_edit(&self, id: FormulaId) -> Option<FormulaDraft> {
        self.get(id)
            .map(|formula| FormulaDraft::new(formula.clone(), true))
    }

    /// Persists the draft into the collection, replacing a formula with the
    /// same id or appending a new one.
    pub fn save(&mut self, draft: &FormulaDraft) -> Result<(), SaveError> {
        if draft.formula.name.trim().is_empty() {
            return Err(SaveError::MissingName);
        }
        validate_items(&draft.formula.items).map_err(SaveError::InvalidFormula)?;
        match &draft.last_calculation {
            None => return Err(SaveError::NotCalculated),
            Some(result) if !result.success => return Err(SaveError::CalculationFailed),
            Some(_) => {}
        }

        let formula = draft.formula.clone();
        if let Some(slot) = self.formulas.iter_mut().find(|f| f.id == formula.id) {
            *slot = formula;
        } else {
            self.formulas.push(formula);
        }
        Ok(())
    }

    /// Deletes the formula with the given id. Returns whether anything was
    /// removed.
    pub fn remove(&mut self, id: FormulaId) -> bool {
        let before = self.formulas.len();
        self.formulas.retain(|f| f.id != id);
        self.formulas.len() != before
    }
}

// ============================================================================
// DRAFT
// ============================================================================

/// The currently-edited, unsaved formula plus its derived editor state.
#[derive(Debug, Clone)]
pub struct FormulaDraft {
    formula: Formula,

    /// Counter for stable item identities; seeded past the highest
    /// existing item id when editing a saved formula.
    next_item_id: ItemId,

    /// One entry per distinct referenced parameter, re-derived (with
    /// entered values discarded) whenever the item sequence changes.
    parameter_values: Vec<ParameterValue>,

    /// Outcome of the last calculation check; cleared whenever the item
    /// sequence changes. Saving requires a successful one.
    last_calculation: Option<CalculationResult>,

    is_edit: bool,
}

impl FormulaDraft {
    fn new(formula: Formula, is_edit: bool) -> Self {
        let next_item_id = formula.max_item_id() + 1;
        let parameter_values = derive_parameter_values(&formula);
        FormulaDraft {
            formula,
            next_item_id,
            parameter_values,
            last_calculation: None,
            is_edit,
        }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn name(&self) -> &str {
        &self.formula.name
    }

    pub fn items(&self) -> &[FormulaItem] {
        &self.formula.items
    }

    pub fn display_string(&self) -> String {
        self.formula.display_string()
    }

    /// Whether this draft was opened from a saved formula.
    pub fn is_edit(&self) -> bool {
        self.is_edit
    }

    /// Renames the draft. Entered values and the calculation outcome are
    /// kept; only item changes reset them.
    pub fn rename(&mut self, name: &str) {
        self.formula = self.formula.renamed(name);
    }

    /// Appends a parameter reference item.
    pub fn add_parameter(&mut self, param_id: &str, display: &str) {
        let item = FormulaItem::parameter(self.take_item_id(), param_id, display);
        self.replace_formula(self.formula.with_item(item));
    }

    /// Appends an operator or parenthesis item. Returns false (and leaves
    /// the draft unchanged) for symbols outside the editor palette.
    pub fn add_operator(&mut self, symbol: &str) -> bool {
        if !OPERATOR_SYMBOLS.contains(&symbol) && symbol != "(" && symbol != ")" {
            return false;
        }
        let item = FormulaItem::operator(self.take_item_id(), symbol);
        self.replace_formula(self.formula.with_item(item));
        true
    }

    /// Appends a literal number item. Returns false (and leaves the draft
    /// unchanged) when the literal does not parse as a number.
    pub fn add_number(&mut self, literal: &str) -> bool {
        if literal.trim().parse::<f64>().is_err() {
            return false;
        }
        let item = FormulaItem::number(self.take_item_id(), literal.trim());
        self.replace_formula(self.formula.with_item(item));
        true
    }

    /// Removes the item at `index`; out-of-range indexes are ignored.
    pub fn remove_item(&mut self, index: usize) {
        self.replace_formula(self.formula.without_item(index));
    }

    /// Moves the item at `from` to `to` (drag reorder), preserving all
    /// other relative positions.
    pub fn move_item(&mut self, from: usize, to: usize) {
        self.replace_formula(self.formula.with_item_moved(from, to));
    }

    /// Validates the current item sequence.
    pub fn validation(&self) -> ValidationResult {
        ValidationResult::of(&self.formula.items)
    }

    pub fn parameter_values(&self) -> &[ParameterValue] {
        &self.parameter_values
    }

    /// Sets the entered text for one parameter. Returns false for an id
    /// the formula does not reference.
    pub fn set_parameter_value(&mut self, param_id: &str, value: &str) -> bool {
        match self.parameter_values.iter_mut().find(|pv| pv.id == param_id) {
            Some(entry) => {
                entry.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Runs the calculation check against the entered values and records
    /// the outcome.
    pub fn calculate(&mut self) -> CalculationResult {
        let values = self
            .parameter_values
            .iter()
            .filter_map(|pv| pv.numeric().map(|v| (pv.id.clone(), v)))
            .collect();
        let outcome = CalculationResult::from(evaluator::evaluate(&self.formula, &values));
        self.last_calculation = Some(outcome.clone());
        outcome
    }

    pub fn last_calculation(&self) -> Option<&CalculationResult> {
        self.last_calculation.as_ref()
    }

    fn take_item_id(&mut self) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id += 1;
        id
    }

    /// Replaces the whole formula value and resets everything derived from
    /// the item sequence.
    fn replace_formula(&mut self, next: Formula) {
        self.formula = next;
        self.parameter_values = derive_parameter_values(&self.formula);
        self.last_calculation = None;
    }
}

/// One empty entry per distinct referenced parameter, in first-seen order,
/// named after the referencing item's display text.
fn derive_parameter_values(formula: &Formula) -> Vec<ParameterValue> {
    let mut values: Vec<ParameterValue> = Vec::new();
    for item in &formula.items {
        if item.kind == FormulaItemKind::Parameter
            && !values.iter().any(|pv| pv.id == item.value)
        {
            values.push(ParameterValue::new(item.value.clone(), item.display.clone()));
        }
    }
    values
}
