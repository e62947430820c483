//! Project entity model and transfer shape.

use buildtrack_core::types::DbId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, PgQueryAs, Transfer};

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub budget: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
}

/// Transfer shape for [`Project`], used for both requests and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    #[serde(default)]
    pub id: DbId,
    pub name: String,
    /// Written as a JSON number with every digit kept.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub budget: Decimal,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: String,
}

impl From<Project> for ProjectDto {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            budget: p.budget,
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status,
        }
    }
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            budget: dto.budget,
            start_date: dto.start_date,
            end_date: dto.end_date,
            status: dto.status,
        }
    }
}

impl Transfer for ProjectDto {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Entity for Project {
    const NAME: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] =
        &["name", "budget", "start_date", "end_date", "status"];

    type Dto = ProjectDto;

    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn apply(&mut self, dto: ProjectDto) {
        self.name = dto.name;
        self.budget = dto.budget;
        self.start_date = dto.start_date;
        self.end_date = dto.end_date;
        self.status = dto.status;
    }

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.name)
            .bind(self.budget)
            .bind(self.start_date)
            .bind(self.end_date)
            .bind(&self.status)
    }
}
