//! Legislative Impact Engine
//!
//! This crate turns unstructured legislative text into typed payroll rules,
//! quantifies their cost against an employee roster, scores the resulting
//! compliance risk, and seals every result with a tamper-evident digest.
//! A monitor scans regulatory feeds and ad-hoc texts in batches, and an
//! axum router exposes the whole pipeline over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod audit;
pub mod calculation;
pub mod config;
pub mod error;
pub mod extraction;
pub mod models;
pub mod money;
pub mod monitor;
pub mod pipeline;
