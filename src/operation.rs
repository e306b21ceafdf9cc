//! Operation library
//!
//! The arithmetic and trigonometric primitives the calculator knows about.
//! Each operation is a variant of [`Operation`] carrying its stable name,
//! its arity and its behavior, so nothing has to be recovered at runtime.
//!
//! Arithmetic is exact decimal arithmetic on [`Decimal`]; `0.1 + 0.2` is
//! `0.3`. The trigonometric functions go through `f64`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Input outside the operation's domain (divide by zero, negative sqrt,
    /// a result too large to represent)
    #[error("{0}")]
    Domain(String),
    /// Operation invoked with the wrong number of operands
    #[error("Type error: {0}")]
    Type(String),
}

/// Number of operands an operation consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationArity {
    Unary,
    Binary,
}

impl OperationArity {
    pub fn operands(self) -> usize {
        match self {
            OperationArity::Unary => 1,
            OperationArity::Binary => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Sin,
    Cos,
    Tan,
    Sqrt,
}

impl Operation {
    /// Every operation, in menu order
    pub const ALL: [Operation; 8] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Sin,
        Operation::Cos,
        Operation::Tan,
        Operation::Sqrt,
    ];

    /// Stable name used for lookup and in the history file
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Sin => "sin",
            Operation::Cos => "cos",
            Operation::Tan => "tan",
            Operation::Sqrt => "sqrt",
        }
    }

    pub fn arity(self) -> OperationArity {
        match self {
            Operation::Add | Operation::Subtract | Operation::Multiply | Operation::Divide => {
                OperationArity::Binary
            }
            Operation::Sin | Operation::Cos | Operation::Tan | Operation::Sqrt => {
                OperationArity::Unary
            }
        }
    }

    /// One-line description shown by `menu`
    pub fn summary(self) -> &'static str {
        match self {
            Operation::Add => "Add two numbers: add(a, b)",
            Operation::Subtract => "Subtract b from a: subtract(a, b)",
            Operation::Multiply => "Multiply two numbers: multiply(a, b)",
            Operation::Divide => "Divide a by b: divide(a, b)",
            Operation::Sin => "Sine of an angle in radians: sin(a)",
            Operation::Cos => "Cosine of an angle in radians: cos(a)",
            Operation::Tan => "Tangent of an angle in radians: tan(a)",
            Operation::Sqrt => "Square root: sqrt(a)",
        }
    }

    /// Apply the operation. `b` must be present exactly when the operation is binary.
    pub fn apply(self, a: Decimal, b: Option<Decimal>) -> Result<Decimal, MathError> {
        match (self.arity(), b) {
            (OperationArity::Binary, Some(b)) => self.apply_binary(a, b),
            (OperationArity::Unary, None) => self.apply_unary(a),
            (OperationArity::Binary, None) => Err(MathError::Type(format!(
                "{} requires two operands",
                self.name()
            ))),
            (OperationArity::Unary, Some(_)) => Err(MathError::Type(format!(
                "{} takes a single operand",
                self.name()
            ))),
        }
    }

    fn apply_binary(self, a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
        match self {
            Operation::Add => add(a, b),
            Operation::Subtract => subtract(a, b),
            Operation::Multiply => multiply(a, b),
            Operation::Divide => divide(a, b),
            _ => Err(MathError::Type(format!("{} is not binary", self.name()))),
        }
    }

    fn apply_unary(self, a: Decimal) -> Result<Decimal, MathError> {
        match self {
            Operation::Sin => sin(a),
            Operation::Cos => cos(a),
            Operation::Tan => tan(a),
            Operation::Sqrt => sqrt(a),
            _ => Err(MathError::Type(format!("{} is not unary", self.name()))),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

// ========================================
// Primitives
// ========================================

/// Decimal places kept when checking whether a square root is exact
const EXACT_ROOT_SCALE: u32 = 20;

fn out_of_range(operation: &str) -> MathError {
    MathError::Domain(format!("{}: result out of range", operation))
}

pub fn add(a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
    a.checked_add(b).ok_or_else(|| out_of_range("add"))
}

pub fn subtract(a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
    a.checked_sub(b).ok_or_else(|| out_of_range("subtract"))
}

pub fn multiply(a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
    a.checked_mul(b).ok_or_else(|| out_of_range("multiply"))
}

pub fn divide(a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
    if b.is_zero() {
        return Err(MathError::Domain("Cannot divide by zero".to_string()));
    }
    a.checked_div(b).ok_or_else(|| out_of_range("divide"))
}

pub fn sin(a: Decimal) -> Result<Decimal, MathError> {
    via_f64("sin", a, f64::sin)
}

pub fn cos(a: Decimal) -> Result<Decimal, MathError> {
    via_f64("cos", a, f64::cos)
}

pub fn tan(a: Decimal) -> Result<Decimal, MathError> {
    via_f64("tan", a, f64::tan)
}

fn via_f64(operation: &str, a: Decimal, f: fn(f64) -> f64) -> Result<Decimal, MathError> {
    let x = a.to_f64().ok_or_else(|| out_of_range(operation))?;
    Decimal::from_f64(f(x)).ok_or_else(|| out_of_range(operation))
}

pub fn sqrt(a: Decimal) -> Result<Decimal, MathError> {
    if a.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if a.is_sign_negative() {
        return Err(MathError::Domain(
            "Cannot take the square root of a negative number".to_string(),
        ));
    }
    let root = a.sqrt().ok_or_else(|| out_of_range("sqrt"))?;

    // Newton iteration can stop a few digits short of an exact root
    let rounded = root.round_dp(EXACT_ROOT_SCALE);
    if rounded.checked_mul(rounded) == Some(a) {
        Ok(rounded.normalize())
    } else {
        Ok(root)
    }
}
