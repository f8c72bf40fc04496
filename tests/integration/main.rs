//! Integration tests for ifstats.

mod util;

mod arg_tests;
mod invalid_config_tests;
mod poll_tests;
