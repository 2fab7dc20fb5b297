//! Line and CSV record tests.

mod csv_tests;
