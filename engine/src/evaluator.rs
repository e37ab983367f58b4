//! FILENAME: engine/src/evaluator.rs
//! PURPOSE: Evaluates a formula against entered parameter values.
//! CONTEXT: The item sequence is rendered into plain arithmetic text with
//! every parameter reference replaced by its numeric value, then fed
//! through the parser crate and folded to a number. Standard precedence
//! applies (`*` and `/` bind tighter than `+` and `-`, parentheses
//! override). Nothing is ever executed as code.
//!
//! Failure taxonomy (all non-fatal, surfaced as messages):
//! - MissingParameterValue: a referenced parameter has no entry
//! - NonFiniteResult: the computation produced infinity or NaN
//!   (division by zero lands here)
//! - EvaluationError: the rendered text did not parse; this can only be
//!   reached by sequences the grammar validator would reject (for example
//!   a parameter directly followed by a parenthesis group), but it is
//!   handled rather than assumed away.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use parser::{BinaryOperator, Expression, UnaryOperator};

use crate::item::{Formula, FormulaItem, FormulaItemKind};

/// An evaluation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("No value is set for parameter \"{display}\".")]
    MissingParameterValue { display: String },

    #[error("Calculation error: the result is infinite or not a number.")]
    NonFiniteResult,

    #[error("Calculation error: {0}")]
    EvaluationError(#[from] parser::ParseError),
}

/// The calculation outcome in the shape the editor renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub success: bool,
    pub value: Option<f64>,
    pub error: Option<String>,
}

impl From<Result<f64, EvalError>> for CalculationResult {
    fn from(result: Result<f64, EvalError>) -> Self {
        match result {
            Ok(value) => CalculationResult {
                success: true,
                value: Some(value),
                error: None,
            },
            Err(err) => CalculationResult {
                success: false,
                value: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Evaluates `formula` against a complete mapping from referenced parameter
/// ids to numeric values.
pub fn evaluate(formula: &Formula, values: &HashMap<String, f64>) -> Result<f64, EvalError> {
    let expression = render_expression(&formula.items, values)?;
    let ast = parser::parse(&expression)?;
    let result = fold(&ast);

    if !result.is_finite() {
        return Err(EvalError::NonFiniteResult);
    }

    Ok(result)
}

/// Renders the item sequence into arithmetic expression text. Parameter
/// references are substituted with their numeric values (Rust's shortest
/// round-trip float formatting, so the text parses back to the same
/// number); number and operator items are inserted literally.
pub fn render_expression(
    items: &[FormulaItem],
    values: &HashMap<String, f64>,
) -> Result<String, EvalError> {
    let mut expression = String::new();

    for item in items {
        match item.kind {
            FormulaItemKind::Parameter => {
                let value = values.get(&item.value).copied().ok_or_else(|| {
                    EvalError::MissingParameterValue {
                        display: item.display.clone(),
                    }
                })?;
                // A non-finite input can only produce a non-finite result,
                // and its text form would not lex; report it directly.
                if !value.is_finite() {
                    return Err(EvalError::NonFiniteResult);
                }
                expression.push_str(&value.to_string());
            }
            FormulaItemKind::Number | FormulaItemKind::Operator => {
                expression.push_str(&item.value);
            }
        }
    }

    Ok(expression)
}

/// Folds an expression tree to its numeric value. Division by zero yields
/// an infinity here; the caller maps non-finite results to an error.
fn fold(expr: &Expression) -> f64 {
    match expr {
        Expression::Literal(n) => *n,
        Expression::BinaryOp { left, op, right } => {
            let left = fold(left);
            let right = fold(right);
            match op {
                BinaryOperator::Add => left + right,
                BinaryOperator::Subtract => left - right,
                BinaryOperator::Multiply => left * right,
                BinaryOperator::Divide => left / right,
            }
        }
        Expression::UnaryOp { op, operand } => match op {
            UnaryOperator::Negate => -fold(operand),
        },
    }
}
