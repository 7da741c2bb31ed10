//! Payroll Engine for an HR admin console
//!
//! This crate computes monthly payroll from attendance and salary structures:
//! hire-date pro-rating, overtime pricing, manual adjustments and payslip
//! totals. It also serves those calculators over HTTP and talks to the admin
//! REST backend that stores employees, attendance and payroll runs.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
