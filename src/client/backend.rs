//! HTTP client for the admin REST backend.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::calculation::days_in_month;
use crate::config::BackendConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceBulkSave, AttendanceRecord, CompanySettings, Department, Employee, EmployeeInput,
    EntityStatus, GeneratePayrollRequest, Holiday, HolidayInput, NewAdjustment, NewDepartment,
    NewRole, PasswordReset, PayrollAdjustment, PayrollRun, PayrollStatus, Payslip, Role,
    SalaryStructure, SalaryStructureBulkSave, SalaryStructureEmployee, StatusUpdate,
    WorkingDaysSummary,
};

use super::credentials::CredentialProvider;

/// Error body returned by the backend on non-2xx responses.
///
/// Most routes answer `{"error": ...}`; the employee routes use `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        [self.error, self.message]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

/// A list answered either bare or wrapped as `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged, bound(deserialize = "T: Deserialize<'de>"))]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default)]
        data: Option<Vec<T>>,
    },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Wrapped { data } => data.unwrap_or_default(),
        }
    }
}

/// Client for the admin backend's REST endpoints.
///
/// Paths are joined onto the configured base URL. Every call takes the
/// credential provider explicitly and attaches its bearer token. Failures
/// of any kind come back as [`EngineError::Backend`] carrying one
/// user-visible message. Nothing is retried.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Builds a client from the backend configuration.
    pub fn new(config: &BackendConfig) -> EngineResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| EngineError::Backend {
            status: None,
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(request: RequestBuilder, credentials: &dyn CredentialProvider) -> RequestBuilder {
        match credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        credentials: &dyn CredentialProvider,
        failure: &str,
    ) -> EngineResult<reqwest::Response> {
        let response = Self::authorize(request, credentials)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Backend request failed: {}", failure);
                EngineError::Backend {
                    status: None,
                    message: failure.to_string(),
                }
            })?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "Backend response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| failure.to_string());

        tracing::warn!(status = status.as_u16(), message = %message, "Backend returned an error");
        Err(EngineError::Backend {
            status: Some(status.as_u16()),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credentials: &dyn CredentialProvider,
        failure: &str,
    ) -> EngineResult<T> {
        let response = self.execute(request, credentials, failure).await?;
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            tracing::warn!(error = %e, "Backend response could not be decoded: {}", failure);
            EngineError::Backend {
                status: Some(status),
                message: failure.to_string(),
            }
        })
    }

    async fn submit(
        &self,
        request: RequestBuilder,
        credentials: &dyn CredentialProvider,
        failure: &str,
    ) -> EngineResult<()> {
        self.execute(request, credentials, failure).await.map(|_| ())
    }

    fn period_query(month: u32, year: i32) -> EngineResult<[(&'static str, String); 2]> {
        days_in_month(year, month)?;
        Ok([("month", month.to_string()), ("year", year.to_string())])
    }

    /// `GET attendance/working-days?month&year`
    pub async fn working_days(
        &self,
        credentials: &dyn CredentialProvider,
        month: u32,
        year: i32,
    ) -> EngineResult<WorkingDaysSummary> {
        let query = Self::period_query(month, year)?;
        let request = self.http.get(self.url("attendance/working-days")).query(&query);
        self.fetch(request, credentials, "Failed to fetch working days").await
    }

    /// `GET attendance?month&year`
    pub async fn attendance(
        &self,
        credentials: &dyn CredentialProvider,
        month: u32,
        year: i32,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let query = Self::period_query(month, year)?;
        let request = self.http.get(self.url("attendance")).query(&query);
        self.fetch(request, credentials, "Failed to fetch attendance").await
    }

    /// `PUT attendance/bulk`
    pub async fn save_attendance(
        &self,
        credentials: &dyn CredentialProvider,
        save: &AttendanceBulkSave,
    ) -> EngineResult<()> {
        let month_length = days_in_month(save.year, save.month)?;
        if save.working_days > month_length {
            return Err(EngineError::validation(
                "workingDays",
                format!("Working days cannot exceed {}", month_length),
            ));
        }
        let request = self.http.put(self.url("attendance/bulk")).json(save);
        self.submit(request, credentials, "Failed to save attendance").await
    }

    /// `GET salary-structure`
    pub async fn salary_structures(
        &self,
        credentials: &dyn CredentialProvider,
    ) -> EngineResult<Vec<SalaryStructureEmployee>> {
        let request = self.http.get(self.url("salary-structure"));
        self.fetch(request, credentials, "Failed to fetch salary structures").await
    }

    /// `PUT salary-structure/bulk`, with each row normalized for its OT type.
    pub async fn save_salary_structures(
        &self,
        credentials: &dyn CredentialProvider,
        structures: Vec<SalaryStructure>,
    ) -> EngineResult<()> {
        let body = SalaryStructureBulkSave::new(structures);
        let request = self.http.put(self.url("salary-structure/bulk")).json(&body);
        self.submit(request, credentials, "Failed to save salary structures").await
    }

    /// `GET payroll/run?month&year`; `None` when no run exists yet.
    pub async fn payroll_run(
        &self,
        credentials: &dyn CredentialProvider,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRun>> {
        let query = Self::period_query(month, year)?;
        let request = self.http.get(self.url("payroll/run")).query(&query);
        self.fetch(request, credentials, "Failed to fetch payroll run").await
    }

    /// `POST payroll/run/generate`
    pub async fn generate_payroll(
        &self,
        credentials: &dyn CredentialProvider,
        month: u32,
        year: i32,
    ) -> EngineResult<PayrollRun> {
        days_in_month(year, month)?;
        let request = self
            .http
            .post(self.url("payroll/run/generate"))
            .json(&GeneratePayrollRequest { month, year });
        let run: PayrollRun = self
            .fetch(request, credentials, "Failed to generate payroll")
            .await?;
        tracing::info!(run_id = %run.id, month, year, items = run.items.len(), "Payroll generated");
        Ok(run)
    }

    /// `PATCH payroll/run/:id/status`
    ///
    /// The transition is checked locally first, so skipping a step or
    /// touching a PAID run never reaches the network.
    pub async fn update_payroll_status(
        &self,
        credentials: &dyn CredentialProvider,
        run: &PayrollRun,
        next: PayrollStatus,
    ) -> EngineResult<PayrollStatus> {
        let status = run.status.transition_to(next)?;
        let request = self
            .http
            .patch(self.url(&format!("payroll/run/{}/status", run.id)))
            .json(&StatusUpdate { status });
        self.submit(request, credentials, "Failed to update payroll status")
            .await?;
        tracing::info!(run_id = %run.id, status = %status, "Payroll status updated");
        Ok(status)
    }

    /// `POST payroll-adjustments`
    pub async fn add_adjustment(
        &self,
        credentials: &dyn CredentialProvider,
        run: &PayrollRun,
        adjustment: NewAdjustment,
    ) -> EngineResult<PayrollAdjustment> {
        run.ensure_mutable()?;
        let adjustment = adjustment.validate()?;
        if run.item(&adjustment.payroll_item_id).is_none() {
            return Err(EngineError::PayrollItemNotFound {
                id: adjustment.payroll_item_id,
            });
        }
        let request = self.http.post(self.url("payroll-adjustments")).json(&adjustment);
        self.fetch(request, credentials, "Failed to add adjustment").await
    }

    /// `DELETE payroll-adjustments/:id`
    pub async fn delete_adjustment(
        &self,
        credentials: &dyn CredentialProvider,
        run: &PayrollRun,
        adjustment_id: &str,
    ) -> EngineResult<()> {
        run.ensure_mutable()?;
        let request = self
            .http
            .delete(self.url(&format!("payroll-adjustments/{}", adjustment_id)));
        self.submit(request, credentials, "Failed to delete adjustment").await
    }

    /// `GET payslip/:payrollItemId`
    pub async fn payslip(
        &self,
        credentials: &dyn CredentialProvider,
        payroll_item_id: &str,
    ) -> EngineResult<Payslip> {
        let request = self.http.get(self.url(&format!("payslip/{}", payroll_item_id)));
        self.fetch(request, credentials, "Failed to load payslip").await
    }

    /// `GET settings/holidays?month&year`
    pub async fn holidays(
        &self,
        credentials: &dyn CredentialProvider,
        month: u32,
        year: i32,
    ) -> EngineResult<Vec<Holiday>> {
        let query = Self::period_query(month, year)?;
        let request = self.http.get(self.url("settings/holidays")).query(&query);
        self.fetch(request, credentials, "Failed to fetch holidays").await
    }

    /// `GET settings/holidays?year`, every holiday of a year.
    pub async fn year_holidays(
        &self,
        credentials: &dyn CredentialProvider,
        year: i32,
    ) -> EngineResult<Vec<Holiday>> {
        let request = self
            .http
            .get(self.url("settings/holidays"))
            .query(&[("year", year.to_string())]);
        self.fetch(request, credentials, "Failed to load holidays").await
    }

    /// `POST settings/holidays`
    pub async fn create_holiday(
        &self,
        credentials: &dyn CredentialProvider,
        holiday: &HolidayInput,
    ) -> EngineResult<()> {
        let request = self.http.post(self.url("settings/holidays")).json(holiday);
        self.submit(request, credentials, "Failed to add holiday").await?;
        tracing::info!(date = %holiday.date, "Holiday added");
        Ok(())
    }

    /// `PUT settings/holidays/:id`
    pub async fn update_holiday(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
        holiday: &HolidayInput,
    ) -> EngineResult<()> {
        let request = self
            .http
            .put(self.url(&format!("settings/holidays/{}", id)))
            .json(holiday);
        self.submit(request, credentials, "Failed to update holiday").await
    }

    /// `DELETE settings/holidays/:id`
    pub async fn delete_holiday(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
    ) -> EngineResult<()> {
        let request = self.http.delete(self.url(&format!("settings/holidays/{}", id)));
        self.submit(request, credentials, "Failed to delete holiday").await
    }

    /// `GET settings`, the company OT and working-time settings.
    pub async fn company_settings(
        &self,
        credentials: &dyn CredentialProvider,
    ) -> EngineResult<CompanySettings> {
        let request = self.http.get(self.url("settings"));
        self.fetch(request, credentials, "Failed to fetch OT settings").await
    }

    /// `PUT settings`, validated and normalized first. Returns what was sent.
    pub async fn save_company_settings(
        &self,
        credentials: &dyn CredentialProvider,
        settings: CompanySettings,
    ) -> EngineResult<CompanySettings> {
        let settings = settings.validate()?;
        let request = self.http.put(self.url("settings")).json(&settings);
        self.submit(request, credentials, "Failed to save OT settings").await?;
        tracing::info!(ot_type = ?settings.ot_type, working_days = settings.working_days, "OT settings saved");
        Ok(settings)
    }

    /// `GET employees`
    pub async fn employees(&self, credentials: &dyn CredentialProvider) -> EngineResult<Vec<Employee>> {
        let request = self.http.get(self.url("employees"));
        self.fetch(request, credentials, "Failed to fetch employees").await
    }

    /// `GET employees/:id`
    pub async fn employee(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
    ) -> EngineResult<Employee> {
        let request = self.http.get(self.url(&format!("employees/{}", id)));
        self.fetch(request, credentials, "Failed to fetch employee").await
    }

    /// `POST employees`. Required fields are checked before the request.
    pub async fn create_employee(
        &self,
        credentials: &dyn CredentialProvider,
        employee: EmployeeInput,
    ) -> EngineResult<()> {
        let employee = employee.validate_new()?;
        let request = self.http.post(self.url("employees")).json(&employee);
        self.submit(request, credentials, "Failed to create employee").await?;
        tracing::info!(email = %employee.email, "Employee created");
        Ok(())
    }

    /// `PUT employees/:id`. The password is never sent from here.
    pub async fn update_employee(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
        employee: EmployeeInput,
    ) -> EngineResult<()> {
        let employee = employee.validate_update()?;
        let request = self
            .http
            .put(self.url(&format!("employees/{}", id)))
            .json(&employee);
        self.submit(request, credentials, "Failed to update employee").await
    }

    /// `DELETE employees/:id`
    pub async fn delete_employee(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
    ) -> EngineResult<()> {
        let request = self.http.delete(self.url(&format!("employees/{}", id)));
        self.submit(request, credentials, "Failed to delete employee").await
    }

    /// `PATCH employees/:id/status`, flipping the current status.
    pub async fn toggle_employee_status(
        &self,
        credentials: &dyn CredentialProvider,
        employee: &Employee,
    ) -> EngineResult<EntityStatus> {
        let status = employee.status.toggled();
        let request = self
            .http
            .patch(self.url(&format!("employees/{}/status", employee.id)))
            .json(&StatusUpdate { status });
        self.submit(request, credentials, "Failed to update employee status")
            .await?;
        Ok(status)
    }

    /// `PUT employees/:id/password`
    pub async fn reset_employee_password(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
        reset: &PasswordReset,
    ) -> EngineResult<()> {
        let request = self
            .http
            .put(self.url(&format!("employees/{}/password", id)))
            .json(reset);
        self.submit(request, credentials, "Failed to update password").await
    }

    /// `GET departments`
    pub async fn departments(
        &self,
        credentials: &dyn CredentialProvider,
    ) -> EngineResult<Vec<Department>> {
        let request = self.http.get(self.url("departments"));
        let listing: Listing<Department> = self
            .fetch(request, credentials, "Failed to fetch departments")
            .await?;
        Ok(listing.into_vec())
    }

    /// `POST departments`
    pub async fn create_department(
        &self,
        credentials: &dyn CredentialProvider,
        department: NewDepartment,
    ) -> EngineResult<()> {
        let department = department.validate()?;
        let request = self.http.post(self.url("departments")).json(&department);
        self.submit(request, credentials, "Failed to create department").await
    }

    /// `PUT departments/:id`
    pub async fn rename_department(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
        department: NewDepartment,
    ) -> EngineResult<()> {
        let department = department.validate()?;
        let request = self
            .http
            .put(self.url(&format!("departments/{}", id)))
            .json(&department);
        self.submit(request, credentials, "Failed to update department").await
    }

    /// `DELETE departments/:id`
    pub async fn delete_department(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
    ) -> EngineResult<()> {
        let request = self.http.delete(self.url(&format!("departments/{}", id)));
        self.submit(request, credentials, "Failed to delete department").await
    }

    /// `PATCH departments/:id/status`, flipping the current status.
    pub async fn toggle_department_status(
        &self,
        credentials: &dyn CredentialProvider,
        department: &Department,
    ) -> EngineResult<EntityStatus> {
        let status = department.status.toggled();
        let request = self
            .http
            .patch(self.url(&format!("departments/{}/status", department.id)))
            .json(&StatusUpdate { status });
        self.submit(request, credentials, "Failed to update department status")
            .await?;
        Ok(status)
    }

    /// `GET roles`
    pub async fn roles(&self, credentials: &dyn CredentialProvider) -> EngineResult<Vec<Role>> {
        let request = self.http.get(self.url("roles"));
        let listing: Listing<Role> = self.fetch(request, credentials, "Failed to fetch roles").await?;
        Ok(listing.into_vec())
    }

    /// `POST roles`
    pub async fn create_role(
        &self,
        credentials: &dyn CredentialProvider,
        role: NewRole,
    ) -> EngineResult<()> {
        let role = role.validate()?;
        let request = self.http.post(self.url("roles")).json(&role);
        self.submit(request, credentials, "Failed to create role").await
    }

    /// `PUT roles/:id`
    pub async fn rename_role(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
        role: NewRole,
    ) -> EngineResult<()> {
        let role = role.validate()?;
        let request = self.http.put(self.url(&format!("roles/{}", id))).json(&role);
        self.submit(request, credentials, "Failed to update role").await
    }

    /// `DELETE roles/:id`
    pub async fn delete_role(
        &self,
        credentials: &dyn CredentialProvider,
        id: &str,
    ) -> EngineResult<()> {
        let request = self.http.delete(self.url(&format!("roles/{}", id)));
        self.submit(request, credentials, "Failed to delete role").await
    }

    /// `PATCH roles/:id/status`, flipping the current status.
    pub async fn toggle_role_status(
        &self,
        credentials: &dyn CredentialProvider,
        role: &Role,
    ) -> EngineResult<EntityStatus> {
        let status = role.status.toggled();
        let request = self
            .http
            .patch(self.url(&format!("roles/{}/status", role.id)))
            .json(&StatusUpdate { status });
        self.submit(request, credentials, "Failed to update role status")
            .await?;
        Ok(status)
    }
}
