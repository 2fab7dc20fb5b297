//! Handle and memory backend tests.

mod memory_tests;
