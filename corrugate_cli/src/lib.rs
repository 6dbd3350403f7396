//! # corrugate_cli
//!
//! Runs costing workbooks through `corrugate_core`. The binary is a thin
//! wrapper; workbook persistence and the worked scenarios live here so they
//! can be tested.

pub mod demo;
pub mod file_io;
pub mod logging;
pub mod workbook;
