//! Stream facade tests.

mod lifecycle_tests;
