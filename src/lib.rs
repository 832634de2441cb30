#![allow(unused_assignments)] // thiserror/miette proc macros trigger false positives

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod flow;
pub mod paths;
pub mod precheck;
pub mod vm_state;
