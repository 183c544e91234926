//! Ledger module: accounts, journal entries, invoice projection and verification

pub mod account;
pub mod accumulator;
pub mod invoice;
pub mod journal;
pub mod verifier;

pub use account::*;
pub use accumulator::*;
pub use invoice::*;
pub use journal::*;
pub use verifier::*;
