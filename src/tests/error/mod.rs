//! Error module tests.

mod kind_tests;

#[cfg(feature = "miette")]
mod miette_tests;
