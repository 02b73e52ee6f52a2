//! Shared test helpers for `sectorgrid-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! pipeline tests can focus on behaviour instead of boilerplate.

pub mod inventory;
