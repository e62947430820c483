//! Task entity model and transfer shape.
//!
//! Tasks are nested under projects in routes: `/projects/{project_id}/tasks`.

use buildtrack_core::types::DbId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, ForeignKey, PgQueryAs, Reference, Transfer};

/// `tasks.project_id -> projects.id`
pub const TASK_PROJECT: ForeignKey = ForeignKey {
    column: "project_id",
    table: "projects",
    entity: "Project",
};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Transfer shape for [`Task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    #[serde(default)]
    pub id: DbId,
    /// Overridden by the route parent on create and update.
    #[serde(default)]
    pub project_id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl From<Task> for TaskDto {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            project_id: t.project_id,
            name: t.name,
            description: t.description,
            status: t.status,
            start_date: t.start_date,
            end_date: t.end_date,
        }
    }
}

impl From<TaskDto> for Task {
    fn from(dto: TaskDto) -> Self {
        Self {
            id: dto.id,
            project_id: dto.project_id,
            name: dto.name,
            description: dto.description,
            status: dto.status,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }
}

impl Transfer for TaskDto {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Entity for Task {
    const NAME: &'static str = "Task";
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &[
        "project_id",
        "name",
        "description",
        "status",
        "start_date",
        "end_date",
    ];
    const PARENT: Option<ForeignKey> = Some(TASK_PROJECT);

    type Dto = TaskDto;

    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn references(&self) -> Vec<Reference> {
        vec![TASK_PROJECT.to(self.project_id)]
    }

    fn set_parent_id(&mut self, parent_id: DbId) {
        self.project_id = parent_id;
    }

    fn apply(&mut self, dto: TaskDto) {
        self.project_id = dto.project_id;
        self.name = dto.name;
        self.description = dto.description;
        self.status = dto.status;
        self.start_date = dto.start_date;
        self.end_date = dto.end_date;
    }

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.project_id)
            .bind(&self.name)
            .bind(&self.description)
            .bind(&self.status)
            .bind(self.start_date)
            .bind(self.end_date)
    }
}
