//! Deferred calculations
//!
//! A [`Calculation`] binds operands to an [`Operation`] without running it.
//! Commands build one at execution time and hand it to the history, which
//! performs it and records the result.

use crate::operation::{MathError, Operation};
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub operation: Operation,
    pub a: Decimal,
    /// Second operand, present only for binary operations
    pub b: Option<Decimal>,
}

impl Calculation {
    pub fn create(a: Decimal, b: Option<Decimal>, operation: Operation) -> Self {
        Calculation { operation, a, b }
    }

    /// Run the operation on the stored operands.
    ///
    /// Without a second operand the operation is invoked as unary, otherwise
    /// as binary. An operand count that doesn't match the operation fails
    /// with [`MathError::Type`]. Performing twice yields the same result.
    pub fn perform(&self) -> Result<Decimal, MathError> {
        tracing::debug!(calculation = %self, "performing calculation");
        self.operation.apply(self.a, self.b)
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.b {
            Some(b) => write!(f, "{}({}, {})", self.operation, self.a, b),
            None => write!(f, "{}({})", self.operation, self.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_perform_binary() {
        let calc = Calculation::create(d("5"), Some(d("3")), Operation::Add);
        assert_eq!(calc.perform(), Ok(d("8")));
    }

    #[test]
    fn test_perform_unary() {
        let calc = Calculation::create(d("4"), None, Operation::Sqrt);
        assert_eq!(calc.perform(), Ok(d("2")));
    }

    #[test]
    fn test_perform_is_idempotent() {
        let calc = Calculation::create(d("10"), Some(d("4")), Operation::Divide);
        assert_eq!(calc.perform(), calc.perform());
        assert_eq!(calc.perform(), Ok(d("2.5")));
    }

    #[test]
    fn test_sqrt_fails_iff_negative() {
        for a in ["-100", "-4", "-0.5", "0", "0.25", "9"] {
            let a = d(a);
            let result = Calculation::create(a, None, Operation::Sqrt).perform();
            assert_eq!(
                matches!(result, Err(MathError::Domain(_))),
                a < Decimal::ZERO,
                "a = {}",
                a
            );
        }
    }

    #[test]
    fn test_missing_operand_is_type_error() {
        let calc = Calculation::create(d("1"), None, Operation::Multiply);
        assert!(matches!(calc.perform(), Err(MathError::Type(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Calculation::create(d("5"), Some(d("3")), Operation::Add).to_string(), "add(5, 3)");
        assert_eq!(Calculation::create(d("0.5"), None, Operation::Sin).to_string(), "sin(0.5)");
    }
}
