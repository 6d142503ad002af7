//! Attendance and payroll engine driven by biometric check-in/check-out.
//!
//! This crate turns raw check-in and check-out scans into late, early-leave
//! and overtime hours per day, aggregates them per month, and computes a
//! monthly salary with deductions and additions. An axum HTTP API exposes
//! event recording and the salary and attendance reports.

#![warn(missing_docs)]

pub mod api;
pub mod biometric;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod processor;
pub mod store;
