//! Staffing - inspect and validate department roster files
//!
//! Thin command-line front end over `staffing_core`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod cli;
