//! Core data models for the Legislative Impact Engine.
//!
//! This module contains the value objects passed between extraction,
//! impact calculation, risk scoring, sealing and monitoring. All of them
//! are created by a single component call and never mutated afterwards.

mod audit;
mod employee;
mod impact;
mod legislation;
mod monitor;
mod risk;
mod rule;

pub use audit::AuditProof;
pub use employee::{EmployeeRecord, EmployeeRoster};
pub use impact::{AffectedEmployee, CalculationStep, CostBreakdown, CostCategory, ImpactResult};
pub use legislation::ParsedLegislation;
pub use monitor::{AggregateReport, FetchedDocument, RegulatorySignal, SkippedSource, SourceDocument};
pub use risk::{RiskAssessment, RiskLevel, RiskScore};
pub use rule::{ExtractedRule, NewTaxKind, RawAmount};
