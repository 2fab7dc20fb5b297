//! Config module tests.

mod copy_options_tests;
mod csv_dialect_tests;
mod mode_tests;
