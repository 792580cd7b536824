// 👷 Staff - employees and their employment contracts
//
// An employee holds at most one contract at a time, either part-time or
// full-time. A contract always belongs to exactly one employee.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cinema::Cinema;
use crate::entities::CleaningAssignmentId;
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, Record};

pub const MIN_PART_TIME_HOURS: u8 = 1;
pub const MAX_PART_TIME_HOURS: u8 = 30;

entity_id!(EmployeeId);
entity_id!(PartTimeContractId);
entity_id!(FullTimeContractId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ContractRef {
    PartTime(PartTimeContractId),
    FullTime(FullTimeContractId),
}

// ============================================================================
// EMPLOYEE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    surname: String,
    pub(crate) contract: Option<ContractRef>,
    pub(crate) cleaning_assignments: Vec<CleaningAssignmentId>,
}

impl Employee {
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn contract(&self) -> Option<ContractRef> {
        self.contract
    }

    pub fn cleaning_assignments(&self) -> &[CleaningAssignmentId] {
        &self.cleaning_assignments
    }
}

impl Record for Employee {
    type Id = EmployeeId;
    const ENTITY: &'static str = "Employee";

    fn id(&self) -> EmployeeId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        validate_name("name", &self.name)?;
        validate_name("surname", &self.surname)?;
        Ok(())
    }
}

// ============================================================================
// CONTRACTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartTimeContract {
    id: PartTimeContractId,
    hours_per_week: u8,
    employee: EmployeeId,
}

impl PartTimeContract {
    pub fn id(&self) -> PartTimeContractId {
        self.id
    }

    pub fn hours_per_week(&self) -> u8 {
        self.hours_per_week
    }

    pub fn employee(&self) -> EmployeeId {
        self.employee
    }
}

impl Record for PartTimeContract {
    type Id = PartTimeContractId;
    const ENTITY: &'static str = "PartTimeContract";

    fn id(&self) -> PartTimeContractId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        validate_hours(self.hours_per_week).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullTimeContract {
    id: FullTimeContractId,
    monthly_salary: f64,
    employee: EmployeeId,
}

impl FullTimeContract {
    pub fn id(&self) -> FullTimeContractId {
        self.id
    }

    pub fn monthly_salary(&self) -> f64 {
        self.monthly_salary
    }

    pub fn employee(&self) -> EmployeeId {
        self.employee
    }
}

impl Record for FullTimeContract {
    type Id = FullTimeContractId;
    const ENTITY: &'static str = "FullTimeContract";

    fn id(&self) -> FullTimeContractId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        validate_salary(self.monthly_salary).map(|_| ())
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

fn validate_name(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CinemaError::validation(Employee::ENTITY, field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_hours(hours: u8) -> Result<u8> {
    if !(MIN_PART_TIME_HOURS..=MAX_PART_TIME_HOURS).contains(&hours) {
        return Err(CinemaError::validation(
            PartTimeContract::ENTITY,
            "hours_per_week",
            format!(
                "must be between {} and {}, got {}",
                MIN_PART_TIME_HOURS, MAX_PART_TIME_HOURS, hours
            ),
        ));
    }
    Ok(hours)
}

fn validate_salary(salary: f64) -> Result<f64> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(CinemaError::validation(
            FullTimeContract::ENTITY,
            "monthly_salary",
            format!("must be a non-negative amount, got {}", salary),
        ));
    }
    Ok(salary)
}

// ============================================================================
// CINEMA OPERATIONS
// ============================================================================

impl Cinema {
    pub fn create_employee(&mut self, name: &str, surname: &str) -> Result<EmployeeId> {
        let employee = Employee {
            id: EmployeeId::new(),
            name: validate_name("name", name)?,
            surname: validate_name("surname", surname)?,
            contract: None,
            cleaning_assignments: Vec::new(),
        };
        let id = employee.id;
        self.employees.register(employee);
        debug!(employee = %id, "employee created");
        Ok(id)
    }

    pub fn rename_employee(&mut self, employee: EmployeeId, name: &str, surname: &str) -> Result<()> {
        let name = validate_name("name", name)?;
        let surname = validate_name("surname", surname)?;
        let existing = self.employees.require_mut(employee)?;
        existing.name = name;
        existing.surname = surname;
        Ok(())
    }

    fn ensure_no_contract(&self, employee: EmployeeId) -> Result<()> {
        if let Some(contract) = self.employees.require(employee)?.contract {
            return Err(CinemaError::duplicate(
                "Contract",
                format!("employee {} already has contract {:?}", employee, contract),
            ));
        }
        Ok(())
    }

    pub fn sign_part_time_contract(&mut self, employee: EmployeeId, hours_per_week: u8) -> Result<PartTimeContractId> {
        let hours_per_week = validate_hours(hours_per_week)?;
        self.ensure_no_contract(employee)?;

        let contract = PartTimeContract {
            id: PartTimeContractId::new(),
            hours_per_week,
            employee,
        };
        let id = contract.id;
        self.part_time_contracts.register(contract);
        self.employees.require_mut(employee)?.contract = Some(ContractRef::PartTime(id));

        debug!(contract = %id, %employee, hours_per_week, "part-time contract signed");
        Ok(id)
    }

    pub fn sign_full_time_contract(&mut self, employee: EmployeeId, monthly_salary: f64) -> Result<FullTimeContractId> {
        let monthly_salary = validate_salary(monthly_salary)?;
        self.ensure_no_contract(employee)?;

        let contract = FullTimeContract {
            id: FullTimeContractId::new(),
            monthly_salary,
            employee,
        };
        let id = contract.id;
        self.full_time_contracts.register(contract);
        self.employees.require_mut(employee)?.contract = Some(ContractRef::FullTime(id));

        debug!(contract = %id, %employee, "full-time contract signed");
        Ok(id)
    }

    pub fn set_part_time_hours(&mut self, contract: PartTimeContractId, hours_per_week: u8) -> Result<()> {
        let hours_per_week = validate_hours(hours_per_week)?;
        self.part_time_contracts.require_mut(contract)?.hours_per_week = hours_per_week;
        Ok(())
    }

    pub fn set_monthly_salary(&mut self, contract: FullTimeContractId, monthly_salary: f64) -> Result<()> {
        let monthly_salary = validate_salary(monthly_salary)?;
        self.full_time_contracts.require_mut(contract)?.monthly_salary = monthly_salary;
        Ok(())
    }

    /// End the employee's contract, whichever kind it is
    pub fn terminate_contract(&mut self, employee: EmployeeId) -> Result<()> {
        let Some(contract) = self.employees.require(employee)?.contract else {
            return Err(CinemaError::not_linked("Contract", "any", format!("employee {}", employee)));
        };
        match contract {
            ContractRef::PartTime(id) => {
                self.part_time_contracts.deregister(id)?;
            }
            ContractRef::FullTime(id) => {
                self.full_time_contracts.deregister(id)?;
            }
        }
        self.employees.require_mut(employee)?.contract = None;
        debug!(%employee, "contract terminated");
        Ok(())
    }

    /// Delete an employee with their contract and cleaning history
    pub fn delete_employee(&mut self, employee: EmployeeId) -> Result<()> {
        let existing = self.employees.require(employee)?;
        let has_contract = existing.contract.is_some();
        let assignments = existing.cleaning_assignments.clone();

        if has_contract {
            self.terminate_contract(employee)?;
        }
        for assignment in assignments {
            self.drop_cleaning_assignment(assignment)?;
        }

        self.employees.deregister(employee)?;
        debug!(%employee, "employee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AreaRef;
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn test_employee_names_validated() {
        let mut cinema = Cinema::new();
        assert!(cinema.create_employee("", "Nowak").is_err());
        assert!(cinema.create_employee("Ann", "  ").is_err());

        let id = cinema.create_employee(" Ann ", "Nowak").unwrap();
        assert_eq!(cinema.employees().require(id).unwrap().full_name(), "Ann Nowak");
    }

    #[test]
    fn test_part_time_hours_bounds() {
        let mut cinema = Cinema::new();
        let employee = cinema.create_employee("Ann", "Nowak").unwrap();

        assert!(cinema.sign_part_time_contract(employee, 0).is_err());
        assert!(cinema.sign_part_time_contract(employee, 31).is_err());
        assert!(cinema.part_time_contracts().is_empty());
        assert_eq!(cinema.employees().require(employee).unwrap().contract(), None);

        let contract = cinema.sign_part_time_contract(employee, 30).unwrap();
        assert_eq!(
            cinema.employees().require(employee).unwrap().contract(),
            Some(ContractRef::PartTime(contract))
        );
        assert_eq!(cinema.part_time_contracts().require(contract).unwrap().employee(), employee);
    }

    #[test]
    fn test_one_contract_per_employee() {
        let mut cinema = Cinema::new();
        let employee = cinema.create_employee("Ann", "Nowak").unwrap();
        cinema.sign_part_time_contract(employee, 20).unwrap();

        assert!(matches!(
            cinema.sign_part_time_contract(employee, 10),
            Err(CinemaError::Duplicate { .. })
        ));
        assert!(matches!(
            cinema.sign_full_time_contract(employee, 4000.0),
            Err(CinemaError::Duplicate { .. })
        ));
        assert_eq!(cinema.part_time_contracts().len(), 1);
        assert!(cinema.full_time_contracts().is_empty());
    }

    #[test]
    fn test_terminate_then_sign_again() {
        let mut cinema = Cinema::new();
        let employee = cinema.create_employee("Ann", "Nowak").unwrap();

        assert!(matches!(
            cinema.terminate_contract(employee),
            Err(CinemaError::NotLinked { .. })
        ));

        cinema.sign_part_time_contract(employee, 12).unwrap();
        cinema.terminate_contract(employee).unwrap();
        assert!(cinema.part_time_contracts().is_empty());

        let full = cinema.sign_full_time_contract(employee, 5200.0).unwrap();
        cinema.set_monthly_salary(full, 5400.0).unwrap();
        assert!(cinema.set_monthly_salary(full, f64::NAN).is_err());
        assert_eq!(cinema.full_time_contracts().require(full).unwrap().monthly_salary(), 5400.0);
    }

    #[test]
    fn test_set_part_time_hours() {
        let mut cinema = Cinema::new();
        let employee = cinema.create_employee("Ann", "Nowak").unwrap();
        let contract = cinema.sign_part_time_contract(employee, 12).unwrap();

        assert!(cinema.set_part_time_hours(contract, 40).is_err());
        cinema.set_part_time_hours(contract, 16).unwrap();
        assert_eq!(cinema.part_time_contracts().require(contract).unwrap().hours_per_week(), 16);
    }

    #[test]
    fn test_delete_employee_cascades() {
        let mut cinema = Cinema::new();
        let employee = cinema.create_employee("Ann", "Nowak").unwrap();
        cinema.sign_part_time_contract(employee, 12).unwrap();
        let floor = cinema.create_floor(0, "Ground", Duration::from_secs(600)).unwrap();
        cinema
            .assign_cleaning(AreaRef::Floor(floor), employee, Utc::now())
            .unwrap();

        cinema.delete_employee(employee).unwrap();

        assert!(cinema.employees().is_empty());
        assert!(cinema.part_time_contracts().is_empty());
        assert!(cinema.cleaning_assignments().is_empty());
        assert!(cinema.area(AreaRef::Floor(floor)).unwrap().assignments().is_empty());
        cinema.check_integrity().unwrap();
    }
}
