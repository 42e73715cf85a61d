#[macro_use] extern crate log;
extern crate regex;
extern crate once_cell;
extern crate thiserror;

pub mod assembler;
