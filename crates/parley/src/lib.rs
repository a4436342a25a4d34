//! Glue for agents that talk before they decide, and read each other's
//! emotions.
//!
//! The crate bundles the conversation session from [`core`] with the
//! emotion scoring client from [`hume`]. The two share no state and can be
//! used independently. A CLI for scoring texts from the terminal is built
//! with the `cli` feature.

#![deny(missing_docs)]

/// Re-exports of [`parley_model`] crate.
pub mod model {
    pub use parley_model::*;
}

/// Re-exports of [`parley_core`] crate.
pub mod core {
    pub use parley_core::*;
}

/// Re-exports of [`parley_hume`] crate.
pub mod hume {
    pub use parley_hume::*;
}
