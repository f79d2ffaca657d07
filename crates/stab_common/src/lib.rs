//! Common definitions shared across the stabilizer decoding system.
//!
//! This crate provides the noise-model and decoding-model enumerations, the
//! per-code configuration value, and the solver configuration handed to the
//! integer-program backend. Every value here is immutable once built and is
//! passed explicitly into each sampling, decoding, or distance call, so
//! concurrent runs never observe partially-updated settings.

#![no_std]

/// Noise and decoding model definitions for stabilizer codes.
///
/// Describes how errors are drawn during Monte-Carlo sampling and which
/// objective and axis restrictions the coset decoder applies. Both enums
/// share the same four variants and the same textual spellings so a run can
/// be configured symmetrically from the command line.
pub mod model {
    use core::fmt;
    use core::str::FromStr;

    /// Pauli error model used when drawing random errors.
    ///
    /// The model decides which bit positions of the binary error vector are
    /// eligible. For combined (non-CSS) representations the first half of
    /// the vector holds X components and the second half Z components.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ErrorModel {
        /// Flip bits anywhere in the vector, X and Z treated independently.
        IndependentXz,

        /// Flip bits in the first (X) half only.
        XOnly,

        /// Flip bits in the second (Z) half only.
        ZOnly,

        /// Pick qubits and apply X, Y or Z uniformly on each.
        ///
        /// A Y error sets both the X and the Z bit of the chosen qubit, so
        /// an error of weight w may set up to 2w bits.
        Depolarizing,
    }

    /// Decoding model used to shape the coset decoder's integer program.
    ///
    /// Only meaningful for combined representations: CSS codes always decode
    /// with the plain Hamming-weight objective and no axis restriction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum DecodingModel {
        /// Plain Hamming weight over all bits.
        IndependentXz,

        /// Corrections may only use the X half.
        XOnly,

        /// Corrections may only use the Z half.
        ZOnly,

        /// Per-qubit weight where a combined X and Z flip counts once.
        Depolarizing,
    }

    /// Error returned when a model name is not recognised.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ParseModelError;

    impl fmt::Display for ParseModelError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("expected one of: xz, x, z, depolarizing")
        }
    }

    impl core::error::Error for ParseModelError {}

    impl FromStr for ErrorModel {
        type Err = ParseModelError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let trimmed = s.trim();
            let is = |name: &str| trimmed.eq_ignore_ascii_case(name);
            if is("xz") || is("independent-xz") {
                Ok(Self::IndependentXz)
            } else if is("x") || is("x-only") {
                Ok(Self::XOnly)
            } else if is("z") || is("z-only") {
                Ok(Self::ZOnly)
            } else if is("depolarizing") || is("depolarising") {
                Ok(Self::Depolarizing)
            } else {
                Err(ParseModelError)
            }
        }
    }

    /// Decoding models share the error models' spellings.
    impl FromStr for DecodingModel {
        type Err = ParseModelError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            s.parse::<ErrorModel>().map(Self::from)
        }
    }

    impl From<ErrorModel> for DecodingModel {
        fn from(model: ErrorModel) -> Self {
            match model {
                ErrorModel::IndependentXz => Self::IndependentXz,
                ErrorModel::XOnly => Self::XOnly,
                ErrorModel::ZOnly => Self::ZOnly,
                ErrorModel::Depolarizing => Self::Depolarizing,
            }
        }
    }

    impl fmt::Display for ErrorModel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Self::IndependentXz => "xz",
                Self::XOnly => "x",
                Self::ZOnly => "z",
                Self::Depolarizing => "depolarizing",
            })
        }
    }

    impl fmt::Display for DecodingModel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Self::IndependentXz => "xz",
                Self::XOnly => "x",
                Self::ZOnly => "z",
                Self::Depolarizing => "depolarizing",
            })
        }
    }
}

/// Run configuration values for codes and the integer-program solver.
///
/// These structures replace ambient, module-wide settings: a caller builds
/// one `CodeConfig` and one `SolverConfig` per run and passes references
/// into every call that needs them.
pub mod config {
    use crate::model::{DecodingModel, ErrorModel};
    use core::time::Duration;

    /// Description of how a code is represented and how it is decoded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CodeConfig {
        /// True when every generator is purely X-type or purely Z-type.
        ///
        /// CSS codes are stored without the X/Z half-swap convention, always
        /// sample errors uniformly over all bits, and always decode with the
        /// plain Hamming-weight objective.
        pub css: bool,

        /// Model used to draw errors in Monte-Carlo trials.
        pub error_model: ErrorModel,

        /// Model used to shape the decoder objective and axis restriction.
        pub decoding_model: DecodingModel,
    }

    impl CodeConfig {
        /// Creates a configuration for a CSS code.
        ///
        /// Both models are fixed to independent X/Z since CSS codes ignore
        /// them for sampling and decoding.
        pub fn css() -> Self {
            Self {
                css: true,
                error_model: ErrorModel::IndependentXz,
                decoding_model: DecodingModel::IndependentXz,
            }
        }

        /// Creates a configuration for a code stored in the combined X/Z
        /// representation.
        ///
        /// # Arguments
        ///
        /// * `error_model` - Model used to draw random errors
        /// * `decoding_model` - Model used to shape the decoder
        pub fn combined(error_model: ErrorModel, decoding_model: DecodingModel) -> Self {
            Self {
                css: false,
                error_model,
                decoding_model,
            }
        }

        /// Returns true when stabilizer rows use the swapped X/Z ordering.
        pub fn is_combined(&self) -> bool {
            !self.css
        }

        /// Returns the error model sampling should actually use.
        ///
        /// CSS codes override any configured model with independent X/Z.
        pub fn effective_error_model(&self) -> ErrorModel {
            if self.css {
                ErrorModel::IndependentXz
            } else {
                self.error_model
            }
        }
    }

    impl Default for CodeConfig {
        fn default() -> Self {
            Self::css()
        }
    }

    /// Options handed opaquely to the integer-program solver backend.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SolverConfig {
        /// Thread-count hint for the backend's internal pool.
        pub threads: usize,

        /// Emit backend diagnostics at info level instead of debug.
        pub verbose: bool,

        /// Wall-clock limit per solve. `None` means unlimited.
        pub time_limit: Option<Duration>,
    }

    impl SolverConfig {
        /// Returns a copy of this configuration with a time limit applied.
        pub fn with_time_limit(mut self, limit: Duration) -> Self {
            self.time_limit = Some(limit);
            self
        }
    }

    impl Default for SolverConfig {
        fn default() -> Self {
            Self {
                threads: 1,
                verbose: false,
                time_limit: None,
            }
        }
    }
}

pub use config::{CodeConfig, SolverConfig};
pub use model::{DecodingModel, ErrorModel, ParseModelError};
