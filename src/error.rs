//! Error types.
//!
//! - `FitError` is the domain error raised by the linear fitter.
//! - `AppError` is what the binary sees: a message plus the process exit code.
//!
//! Exit codes:
//! - `2` configuration / IO
//! - `3` degenerate or empty input to the fitter
//! - `4` internal numeric failure

use thiserror::Error;

/// Failures of the least-squares fit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Every input has the same value, so `Σ(x − x̄)²` is zero and the slope
    /// is undefined.
    #[error("degenerate input: all {n} inputs equal {value}; slope is undefined")]
    DegenerateInput { n: usize, value: f64 },

    #[error("cannot fit a line to zero observations")]
    Empty,

    #[error("inputs and outputs differ in length ({inputs} vs {outputs})")]
    LengthMismatch { inputs: usize, outputs: usize },

    #[error("least-squares solver failed: {0}")]
    Solver(String),
}

#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Configuration or IO problem (exit code 2).
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let code = match err {
            FitError::DegenerateInput { .. } | FitError::Empty | FitError::LengthMismatch { .. } => 3,
            FitError::Solver(_) => 4,
        };
        AppError::new(code, format!("Fit failed: {err}"))
    }
}
