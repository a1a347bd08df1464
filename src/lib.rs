//! PPh 21 withholding tax engine for Indonesian payroll.
//!
//! This crate computes annual PPh 21 liability from monthly salary, bonuses
//! and deductions, and spreads it over the year under either the traditional
//! scheme or the TER monthly effective-rate scheme with a month-12 true-up.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
