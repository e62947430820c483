//! Resource usage entity model and transfer shape.
//!
//! Usages are nested under tasks in routes: `/tasks/{task_id}/usages`, and
//! additionally reference the consumed resource.

use buildtrack_core::types::DbId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, ForeignKey, PgQueryAs, Reference, Transfer};

/// `resource_usages.task_id -> tasks.id`
pub const USAGE_TASK: ForeignKey = ForeignKey {
    column: "task_id",
    table: "tasks",
    entity: "Task",
};

/// `resource_usages.resource_id -> resources.id`
pub const USAGE_RESOURCE: ForeignKey = ForeignKey {
    column: "resource_id",
    table: "resources",
    entity: "Resource",
};

/// A row from the `resource_usages` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ResourceUsage {
    pub id: DbId,
    pub task_id: DbId,
    pub resource_id: DbId,
    pub quantity_used: i32,
    pub usage_date: NaiveDate,
}

/// Transfer shape for [`ResourceUsage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUsageDto {
    #[serde(default)]
    pub id: DbId,
    /// Overridden by the route parent on create and update.
    #[serde(default)]
    pub task_id: DbId,
    pub resource_id: DbId,
    pub quantity_used: i32,
    pub usage_date: NaiveDate,
}

impl From<ResourceUsage> for ResourceUsageDto {
    fn from(u: ResourceUsage) -> Self {
        Self {
            id: u.id,
            task_id: u.task_id,
            resource_id: u.resource_id,
            quantity_used: u.quantity_used,
            usage_date: u.usage_date,
        }
    }
}

impl From<ResourceUsageDto> for ResourceUsage {
    fn from(dto: ResourceUsageDto) -> Self {
        Self {
            id: dto.id,
            task_id: dto.task_id,
            resource_id: dto.resource_id,
            quantity_used: dto.quantity_used,
            usage_date: dto.usage_date,
        }
    }
}

impl Transfer for ResourceUsageDto {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Entity for ResourceUsage {
    const NAME: &'static str = "ResourceUsage";
    const TABLE: &'static str = "resource_usages";
    const COLUMNS: &'static [&'static str] =
        &["task_id", "resource_id", "quantity_used", "usage_date"];
    const PARENT: Option<ForeignKey> = Some(USAGE_TASK);

    type Dto = ResourceUsageDto;

    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn references(&self) -> Vec<Reference> {
        vec![USAGE_TASK.to(self.task_id), USAGE_RESOURCE.to(self.resource_id)]
    }

    fn set_parent_id(&mut self, parent_id: DbId) {
        self.task_id = parent_id;
    }

    fn apply(&mut self, dto: ResourceUsageDto) {
        self.task_id = dto.task_id;
        self.resource_id = dto.resource_id;
        self.quantity_used = dto.quantity_used;
        self.usage_date = dto.usage_date;
    }

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.task_id)
            .bind(self.resource_id)
            .bind(self.quantity_used)
            .bind(self.usage_date)
    }
}
