//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.
//! Field names on the wire are camelCase and enum values UPPERCASE, matching
//! the admin backend.

mod adjustment;
mod attendance;
mod audit;
mod company_settings;
mod dates;
mod employee;
mod holiday;
mod money;
mod payroll;
mod salary_structure;

pub use adjustment::{AdjustmentLine, AdjustmentType, NewAdjustment, PayrollAdjustment};
pub use attendance::{AttendanceBulkSave, AttendanceEntry, AttendanceRecord, WorkingDaysSummary};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use company_settings::CompanySettings;
pub use dates::{iso_date, iso_date_opt, parse_iso_date};
pub use employee::{
    Department, DepartmentRef, Employee, EmployeeInput, EmploymentType, EntityStatus,
    NewDepartment, NewRole, PasswordReset, PaymentType, Role, RoleRef,
};
pub use holiday::{Holiday, HolidayInput};
pub use money::{
    coerce_count, coerce_decimal, lenient_count, lenient_decimal, lenient_decimal_opt, round2,
};
pub use payroll::{
    GeneratePayrollRequest, PayrollEmployee, PayrollItem, PayrollRun, PayrollStatus, Payslip,
    PayslipRunHeader, StatusUpdate,
};
pub use salary_structure::{
    OtType, OvertimePolicy, SalaryStructure, SalaryStructureBulkSave, SalaryStructureEmployee,
    StoredSalaryStructure,
};
