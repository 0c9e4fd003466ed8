extern crate fern;
extern crate getopts;
extern crate log;
extern crate rand;

pub mod cli;
pub mod common;
pub mod format;
pub mod slitherlink;

pub use crate::common::*;
