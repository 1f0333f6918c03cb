#![warn(clippy::all)]

extern crate failure;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;

pub mod console;
pub mod datastruct;
