//! Request types for the Legislative Impact Engine API.
//!
//! Employee records arrive loosely typed: the identifier may be sent as
//! `id` or `employee_id` and as a string or number, and the salary as a
//! JSON number or a numeric string. Conversion into an
//! [`EmployeeRoster`] rejects anything else with `InvalidRoster`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, EmployeeRoster};

/// Request body for `/analyze/legislation` and `/analyze/risk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The legislative text to analyse.
    pub legislation_text: String,
    /// The roster to apply it to.
    #[serde(default)]
    pub current_employee_data: Vec<EmployeeRequest>,
}

impl AnalysisRequest {
    /// Converts the employee data into a roster.
    pub fn roster(&self) -> EngineResult<EmployeeRoster> {
        to_roster(&self.current_employee_data)
    }
}

/// Request body for `/monitor/scan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Feed URLs to fetch and analyse.
    #[serde(default)]
    pub feed_urls: Vec<String>,
    /// Raw legislative texts to analyse.
    #[serde(default)]
    pub ad_hoc_texts: Vec<String>,
    /// The roster to apply each document to.
    #[serde(default)]
    pub current_employee_data: Vec<EmployeeRequest>,
}

impl ScanRequest {
    /// Converts the employee data into a roster.
    pub fn roster(&self) -> EngineResult<EmployeeRoster> {
        to_roster(&self.current_employee_data)
    }
}

/// An employee record as sent by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// The employee identifier, string or number.
    #[serde(alias = "employee_id")]
    pub id: Value,
    /// The employee's display name.
    #[serde(default)]
    pub name: String,
    /// Annual salary, number or numeric string.
    pub salary: Value,
}

impl TryFrom<&EmployeeRequest> for EmployeeRecord {
    type Error = EngineError;

    fn try_from(req: &EmployeeRequest) -> EngineResult<Self> {
        let id = match &req.id {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(EngineError::InvalidRoster {
                    employee_id: other.to_string(),
                    message: "employee id must be a string or number".to_string(),
                });
            }
        };

        let salary = parse_salary(&req.salary).ok_or_else(|| EngineError::InvalidRoster {
            employee_id: id.clone(),
            message: format!("salary must be numeric, got {}", req.salary),
        })?;

        Ok(EmployeeRecord::new(id, req.name.clone(), salary))
    }
}

fn parse_salary(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn to_roster(employees: &[EmployeeRequest]) -> EngineResult<EmployeeRoster> {
    let records = employees
        .iter()
        .map(EmployeeRecord::try_from)
        .collect::<EngineResult<Vec<_>>>()?;
    let roster = EmployeeRoster::new(records);
    roster.validate()?;
    Ok(roster)
}
