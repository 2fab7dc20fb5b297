//! Internal unit tests, laid out by module.

mod config;
mod error;
mod format;
mod io;
mod stream;
mod support;
