// ==========================================
// 賃貸管理システム - 社員 API
// ==========================================
// 职责: 社員批量新增（先写先赢）/ 更新 / 查询
// 社員主键为外部编码（源数据自带），不在本库铸造
// ==========================================

use crate::api::error::MutationOutcome;
use crate::domain::database::Database;
use crate::domain::Employee;
use tracing::info;

pub struct EmployeeApi;

impl EmployeeApi {
    pub fn new() -> Self {
        Self
    }

    /// 批量新增社員
    ///
    /// id/name 为空的条目记为错误；id 已存在的条目静默跳过（先写先赢）
    pub fn add_employees(&self, db: &mut Database, employees: Vec<Employee>) -> MutationOutcome {
        let mut errors = Vec::new();
        let mut added = 0usize;

        for employee in employees {
            if employee.id.trim().is_empty() {
                errors.push("社員番号不能为空".to_string());
                continue;
            }
            if employee.name.trim().is_empty() {
                errors.push(format!("社員「{}」氏名不能为空", employee.id));
                continue;
            }
            if db.employee_by_id(&employee.id).is_some() {
                continue;
            }
            db.employees.push(employee);
            added += 1;
        }

        info!(added, errors = errors.len(), "批量新增社員");
        if errors.is_empty() {
            MutationOutcome::ok()
        } else {
            MutationOutcome::failed(errors)
        }
    }

    /// 更新社員（编码不变，更新后形态重查必填项）
    pub fn update_employee(
        &self,
        db: &mut Database,
        id: &str,
        updated: Employee,
    ) -> MutationOutcome {
        if updated.name.trim().is_empty() {
            return MutationOutcome::failed_with("氏名不能为空");
        }
        match db.employees.iter_mut().find(|e| e.id == id) {
            Some(employee) => {
                *employee = Employee {
                    id: id.to_string(),
                    ..updated
                };
                MutationOutcome::ok()
            }
            None => MutationOutcome::failed_with(format!("社員不存在: id={}", id)),
        }
    }

    pub fn get_employee_by_id<'a>(&self, db: &'a Database, id: &str) -> Option<&'a Employee> {
        db.employee_by_id(id)
    }
}

impl Default for EmployeeApi {
    fn default() -> Self {
        Self::new()
    }
}
