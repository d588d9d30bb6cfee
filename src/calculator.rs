// ABOUTME: Arithmetic tool operations exposed over the protected HTTP surface
// ABOUTME: Pure, stateless calculator with a typed divide-by-zero error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use thiserror::Error;

/// Failure modes of the calculator tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalculatorError {
    /// Division with a zero divisor
    #[error("cannot divide by zero")]
    DivisionByZero,
}

/// Stateless arithmetic operations
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    /// Sum of `a` and `b`
    #[must_use]
    pub fn add(self, a: f64, b: f64) -> f64 {
        a + b
    }

    /// Difference `a - b`
    #[must_use]
    pub fn subtract(self, a: f64, b: f64) -> f64 {
        a - b
    }

    /// Product of `a` and `b`
    #[must_use]
    pub fn multiply(self, a: f64, b: f64) -> f64 {
        a * b
    }

    /// Quotient `a / b`
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::DivisionByZero`] when `b` is zero.
    pub fn divide(self, a: f64, b: f64) -> Result<f64, CalculatorError> {
        if b == 0.0 {
            return Err(CalculatorError::DivisionByZero);
        }
        Ok(a / b)
    }
}
