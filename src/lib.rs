//! Attendance duration and ticket SLA calculation engine.
//!
//! This crate computes worked hours, lunch deduction and overtime for
//! attendance sessions, and the SLA hour count and pass/fail verdict for IT
//! tickets. The calculators are pure functions; [`api`] exposes them over
//! HTTP for the portal's update and export handlers.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
