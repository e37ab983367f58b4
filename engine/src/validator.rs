//! FILENAME: engine/src/validator.rs
//! PURPOSE: Grammar validation for a formula's item sequence.
//! CONTEXT: The editor re-validates the draft on every change and shows the
//! resulting message inline; an invalid sequence blocks both the
//! calculation check and saving. Validation is a pure function of the item
//! sequence and looks only at each item's `value` field, so parameter and
//! number items are never mistaken for operators.
//!
//! The rules run as ordered passes, first failure wins:
//! 1. The sequence must not be empty.
//! 2. Parentheses must balance (the open-paren counter never goes negative
//!    and ends at zero).
//! 3. An operator may not be the first or last item.
//! 4. Two operators may not be adjacent.
//! 5. An opening parenthesis may only follow the `*` operator (the
//!    implicit-multiplication exception), a value, or another parenthesis.
//! 6. A closing parenthesis may only be followed by the `*` operator, a
//!    value, or another parenthesis.
//! 7. `(` immediately followed by `)` is an empty group.

use thiserror::Error;

use crate::item::FormulaItem;

/// The four arithmetic operator symbols. Parentheses are deliberately not
/// in this set; rules 3 and 4 apply to arithmetic operators only.
pub const OPERATOR_SYMBOLS: [&str; 4] = ["+", "-", "*", "/"];

fn is_operator(value: &str) -> bool {
    OPERATOR_SYMBOLS.contains(&value)
}

/// Which parenthesis a rule tripped on. Carried by the two
/// parenthesis-related errors so their messages can name the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenSide {
    Opening,
    Closing,
}

impl ParenSide {
    fn open_close_word(&self) -> &'static str {
        match self {
            ParenSide::Opening => "opening",
            ParenSide::Closing => "closing",
        }
    }

    fn before_after_word(&self) -> &'static str {
        match self {
            ParenSide::Opening => "before",
            ParenSide::Closing => "after",
        }
    }
}

/// A syntactic validation failure. Non-fatal: surfaced as a message, never
/// panicked on, and recoverable by editing the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The formula is empty.")]
    EmptyFormula,

    #[error("Parentheses do not match: too many {} parentheses.", .side.open_close_word())]
    UnbalancedParentheses { side: ParenSide },

    #[error("An operator cannot be placed at the start or end of the formula.")]
    MisplacedOperator,

    #[error("Operators cannot be placed next to each other.")]
    AdjacentOperators,

    #[error(
        "An appropriate operator or value is required {} the parenthesis.",
        .side.before_after_word()
    )]
    InvalidParenAdjacency { side: ParenSide },

    #[error("Empty parentheses are not allowed.")]
    EmptyParenGroup,
}

/// The validation outcome in the shape the editor renders: a flag plus a
/// human-readable message (also set on success).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn of(items: &[FormulaItem]) -> Self {
        match validate_items(items) {
            Ok(()) => ValidationResult {
                is_valid: true,
                message: "The formula syntax is valid.".to_string(),
            },
            Err(err) => ValidationResult {
                is_valid: false,
                message: err.to_string(),
            },
        }
    }
}

/// Validates the item sequence against the grammar rules.
pub fn validate_items(items: &[FormulaItem]) -> Result<(), ValidationError> {
    // Rule 1: empty sequence
    if items.is_empty() {
        return Err(ValidationError::EmptyFormula);
    }

    // Rule 2: parenthesis balance
    let mut paren_count: i32 = 0;
    for item in items {
        if item.value == "(" {
            paren_count += 1;
        }
        if item.value == ")" {
            paren_count -= 1;
        }
        if paren_count < 0 {
            return Err(ValidationError::UnbalancedParentheses {
                side: ParenSide::Closing,
            });
        }
    }
    if paren_count != 0 {
        return Err(ValidationError::UnbalancedParentheses {
            side: ParenSide::Opening,
        });
    }

    // Rule 3: no operator at either end
    let last = items.len() - 1;
    if is_operator(&items[0].value) || is_operator(&items[last].value) {
        return Err(ValidationError::MisplacedOperator);
    }

    // Rule 4: no adjacent operators
    for pair in items.windows(2) {
        if is_operator(&pair[0].value) && is_operator(&pair[1].value) {
            return Err(ValidationError::AdjacentOperators);
        }
    }

    // Rule 5: an opening parenthesis may not directly follow an operator
    // other than `*`
    for pair in items.windows(2) {
        if pair[1].value == "(" && is_operator(&pair[0].value) && pair[0].value != "*" {
            return Err(ValidationError::InvalidParenAdjacency {
                side: ParenSide::Opening,
            });
        }
    }

    // Rule 6: a closing parenthesis may not be directly followed by an
    // operator other than `*`
    for pair in items.windows(2) {
        if pair[0].value == ")" && is_operator(&pair[1].value) && pair[1].value != "*" {
            return Err(ValidationError::InvalidParenAdjacency {
                side: ParenSide::Closing,
            });
        }
    }

    // Rule 7: no empty parenthesis pair
    for pair in items.windows(2) {
        if pair[0].value == "(" && pair[1].value == ")" {
            return Err(ValidationError::EmptyParenGroup);
        }
    }

    Ok(())
}
