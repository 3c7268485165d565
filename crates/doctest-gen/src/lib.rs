//! doctest-gen - Test driver generation for header-only doctest suites
//!
//! Headers in the include tree carry their own `TEST_CASE`s. Each one needs a
//! tiny translation unit that asks doctest to supply `main` and then pulls the
//! header in. This crate writes that file.

pub mod driver;

pub use driver::{generate, DriverConfig, DriverError, HeaderPath};
