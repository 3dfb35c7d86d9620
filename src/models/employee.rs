//! Employee compensation records and rosters.
//!
//! This module defines the [`EmployeeRecord`] and [`EmployeeRoster`] types
//! that describe the payroll a piece of legislation is applied to.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single employee's compensation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Identifier, unique within a roster.
    #[serde(alias = "employee_id")]
    pub id: String,
    /// The employee's display name.
    #[serde(default)]
    pub name: String,
    /// Annual salary.
    pub salary: Decimal,
}

impl EmployeeRecord {
    /// Creates a new employee record.
    ///
    /// # Examples
    ///
    /// ```
    /// use impact_engine::models::EmployeeRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let alice = EmployeeRecord::new("1", "Alice", Decimal::new(90_000, 0));
    /// assert_eq!(alice.id, "1");
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, salary: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            salary,
        }
    }
}

/// The ordered collection of employee records subject to analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRoster {
    employees: Vec<EmployeeRecord>,
}

impl EmployeeRoster {
    /// Creates a roster from employee records, preserving their order.
    pub fn new(employees: Vec<EmployeeRecord>) -> Self {
        Self { employees }
    }

    /// Returns the employee records in roster order.
    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    /// Returns the number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the roster has no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Returns the sum of all annual salaries.
    ///
    /// Fails with `CalculationError` if the sum leaves the decimal range.
    pub fn total_payroll(&self) -> EngineResult<Decimal> {
        self.employees
            .iter()
            .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.salary))
            .ok_or_else(|| EngineError::CalculationError {
                message: "total payroll overflowed decimal range".to_string(),
            })
    }

    /// Checks that every salary is non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        match self.employees.iter().find(|e| e.salary < Decimal::ZERO) {
            Some(employee) => Err(EngineError::InvalidRoster {
                employee_id: employee.id.clone(),
                message: format!("salary must not be negative, got {}", employee.salary),
            }),
            None => Ok(()),
        }
    }
}

impl From<Vec<EmployeeRecord>> for EmployeeRoster {
    fn from(employees: Vec<EmployeeRecord>) -> Self {
        Self::new(employees)
    }
}
