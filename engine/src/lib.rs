//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the formula engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//! The engine owns the formula data model, grammar validation, evaluation,
//! and the in-memory formula collection with its draft editing state. All
//! operations are synchronous, in-memory computations invoked from UI
//! event handlers; nothing here performs I/O.

pub mod collection;
pub mod evaluator;
pub mod item;
pub mod validator;

// Re-export commonly used types at the crate root
pub use collection::{FormulaCollection, FormulaDraft, SaveError};
pub use evaluator::{evaluate, render_expression, CalculationResult, EvalError};
pub use item::{Formula, FormulaId, FormulaItem, FormulaItemKind, ItemId, ParameterValue};
pub use validator::{validate_items, ParenSide, ValidationError, ValidationResult, OPERATOR_SYMBOLS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_test_editor_workflow() {
        let mut collection = FormulaCollection::new();

        // Compose "( sales - cost ) * 0.01" the way the editor would.
        let mut draft = collection.begin();
        draft.add_operator("(");
        draft.add_parameter("p1", "sales");
        draft.add_operator("-");
        draft.add_parameter("p2", "cost");
        draft.add_operator(")");
        draft.add_operator("*");
        draft.add_number("0.01");

        let validation = draft.validation();
        assert!(validation.is_valid, "{}", validation.message);

        draft.rename("margin ratio");
        draft.set_parameter_value("p1", "1500");
        draft.set_parameter_value("p2", "600");

        let outcome = draft.calculate();
        assert_eq!(outcome.value, Some(9.0));

        collection.save(&draft).unwrap();
        assert_eq!(collection.formulas().len(), 1);
        assert_eq!(
            collection.formulas()[0].display_string(),
            "( sales - cost ) * 0.01"
        );
    }

    #[test]
    fn integration_test_invalid_draft_blocks_save_until_fixed() {
        let mut collection = FormulaCollection::new();
        let mut draft = collection.begin();

        draft.add_parameter("p1", "sales");
        draft.add_operator("+");
        draft.rename("incomplete");
        assert!(!draft.validation().is_valid);
        assert!(collection.save(&draft).is_err());

        draft.add_parameter("p2", "cost");
        assert!(draft.validation().is_valid);
        draft.set_parameter_value("p1", "2");
        draft.set_parameter_value("p2", "3");
        assert!(draft.calculate().success);
        assert!(collection.save(&draft).is_ok());
    }

    #[test]
    fn integration_test_reorder_then_recalculate() {
        let mut collection = FormulaCollection::new();
        let mut draft = collection.begin();

        // The operands were composed the wrong way around; two drags turn
        // "a / b" into "b / a".
        draft.add_parameter("a", "numerator");
        draft.add_operator("/");
        draft.add_parameter("b", "denominator");
        draft.set_parameter_value("a", "4");
        draft.set_parameter_value("b", "8");
        assert_eq!(draft.calculate().value, Some(0.5));

        draft.move_item(0, 2); // [/, b, a]
        draft.move_item(0, 1); // [b, /, a]
        assert_eq!(draft.display_string(), "denominator / numerator");

        // The reorder discarded the entered values and the outcome.
        assert!(draft.last_calculation().is_none());
        draft.set_parameter_value("a", "4");
        draft.set_parameter_value("b", "8");
        let outcome = draft.calculate();
        assert_eq!(outcome.value, Some(2.0));
    }

    #[test]
    fn formula_round_trips_through_json() {
        let mut formula = Formula::new(7);
        formula.name = "margin".to_string();
        formula.items = vec![
            FormulaItem::parameter(1, "p1", "sales"),
            FormulaItem::operator(2, "-"),
            FormulaItem::number(3, "100"),
        ];

        let json = serde_json::to_string(&formula).unwrap();
        let back: Formula = serde_json::from_str(&json).unwrap();
        assert_eq!(back, formula);
    }
}
