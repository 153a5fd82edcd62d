// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod log;

pub mod extract;
pub mod sheet;
pub mod dataset;
pub mod describe;
pub mod coverage;
pub mod chart;
pub mod pdf;
pub mod pipeline;

pub mod cli;
pub mod file;
pub mod gui;
pub mod progress;
