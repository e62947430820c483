//! Employee entity model and transfer shape.

use buildtrack_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, ForeignKey, PgQueryAs, Reference, Transfer};

/// `employees.project_id -> projects.id`
pub const EMPLOYEE_PROJECT: ForeignKey = ForeignKey {
    column: "project_id",
    table: "projects",
    entity: "Project",
};

/// An employee row from the `employees` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Employee {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub project_id: DbId,
}

/// Transfer shape for [`Employee`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    #[serde(default)]
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub project_id: DbId,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name,
            last_name: e.last_name,
            role: e.role,
            project_id: e.project_id,
        }
    }
}

impl From<EmployeeDto> for Employee {
    fn from(dto: EmployeeDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            role: dto.role,
            project_id: dto.project_id,
        }
    }
}

impl Transfer for EmployeeDto {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Entity for Employee {
    const NAME: &'static str = "Employee";
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static [&'static str] = &["first_name", "last_name", "role", "project_id"];

    type Dto = EmployeeDto;

    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn references(&self) -> Vec<Reference> {
        vec![EMPLOYEE_PROJECT.to(self.project_id)]
    }

    fn apply(&mut self, dto: EmployeeDto) {
        self.first_name = dto.first_name;
        self.last_name = dto.last_name;
        self.role = dto.role;
        self.project_id = dto.project_id;
    }

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.first_name)
            .bind(&self.last_name)
            .bind(&self.role)
            .bind(self.project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_entity_has_no_route_parent() {
        let employee = Employee {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Brick".to_string(),
            role: "Foreman".to_string(),
            project_id: 5,
        };
        assert_eq!(employee.parent_id(), None);
        assert_eq!(employee.references(), vec![EMPLOYEE_PROJECT.to(5)]);
    }
}
