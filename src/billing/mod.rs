//! Billing helpers for invoice generation

pub mod retainage;

pub use retainage::*;
