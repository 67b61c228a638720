//! # gridseeker
//!
//! A SAT-backed search agent that localizes a hidden target on an N×N grid.
//!
//! The agent moves through the grid following a scripted route. After every
//! move it reads a range detector and, when it runs into an informant, a
//! directional answer. Each reading is encoded as propositional clauses over
//! a knowledge base held by a SAT solver, and the solver is then queried once
//! per cell to decide whether "the target is here" is still consistent with
//! everything observed so far. Cells proven impossible stay excluded forever.
//!
//! Because the solver only supports adding clauses, never retracting them,
//! round-to-round narrowing uses two generations of candidate variables
//! ("past" and "future") connected by a one-directional bridge: conclusions
//! reached in one round are committed as permanent unit clauses over the past
//! generation at the start of the next round, and the bridge carries them
//! forward irrevocably. See [`formula`] for the encoding and [`engine`] for
//! the round protocol.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridseeker::engine::InferenceEngine;
//! use gridseeker::grid::Cell;
//! use gridseeker::world::GridWorld;
//!
//! let world = GridWorld::new(4, Cell::new(3, 3), &[])?;
//! let mut agent = InferenceEngine::new(4, Cell::new(1, 1))?;
//!
//! let outcome = world.accept_move(Cell::new(3, 3)).unwrap();
//! let observation = world.observe(&outcome);
//! agent.run_round(&outcome, &observation)?;
//!
//! println!("{}", agent.knowledge());
//! ```

#![warn(missing_docs)]

/// Grid coordinates and the per-cell knowledge matrix
pub mod grid;

/// Boolean variable allocation and cell↔identifier bijections
pub mod vars;

/// SAT backend contract and the append-only knowledge base
pub mod oracle;

/// Sensor outcome types and their clause encodings
pub mod evidence;

/// Static formula skeleton construction
pub mod formula;

/// The per-round inference engine
pub mod engine;

/// Environment simulator holding ground truth
pub mod world;

/// Step-script and informant-location file loaders
pub mod script;

/// Error types
pub mod error {
    //! Error types for gridseeker

    use thiserror::Error;

    /// Errors that can occur while building or querying the knowledge base,
    /// or while driving the agent.
    #[derive(Error, Debug)]
    pub enum SeekerError {
        /// A clause insertion contradicts the permanent knowledge base.
        ///
        /// The store is append-only, so this taints the whole run; callers
        /// must abort rather than continue with a corrupt formula.
        #[error("formula contradiction: {0}")]
        Formula(String),

        /// The SAT backend exceeded its inference budget.
        ///
        /// Fatal to the current round; never retried automatically.
        #[error("solver timed out")]
        SolverTimeout,

        /// A sensor reading outside the recognized enumerations, or one
        /// inconsistent with the reported move outcome. Raised before any
        /// clause is added.
        #[error("invalid observation: {0}")]
        InvalidObservation(String),

        /// Invalid construction argument
        #[error("invalid argument: {0}")]
        InvalidArgument(String),

        /// Malformed step or informant script
        #[error("malformed script: {0}")]
        Script(String),

        /// Underlying I/O failure while loading a script
        #[error("i/o error: {0}")]
        Io(#[from] std::io::Error),
    }

    /// Result type for gridseeker operations
    pub type Result<T> = std::result::Result<T, SeekerError>;
}

// Re-export commonly used types
pub use error::{Result, SeekerError};
