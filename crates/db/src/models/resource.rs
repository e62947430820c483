//! Resource entity model and transfer shape.

use buildtrack_core::types::DbId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, PgQueryAs, Transfer};

/// A resource row from the `resources` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

/// Transfer shape for [`Resource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    #[serde(default)]
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_cost: Decimal,
}

impl From<Resource> for ResourceDto {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            quantity: r.quantity,
            unit_cost: r.unit_cost,
        }
    }
}

impl From<ResourceDto> for Resource {
    fn from(dto: ResourceDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            quantity: dto.quantity,
            unit_cost: dto.unit_cost,
        }
    }
}

impl Transfer for ResourceDto {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Entity for Resource {
    const NAME: &'static str = "Resource";
    const TABLE: &'static str = "resources";
    const COLUMNS: &'static [&'static str] = &["name", "description", "quantity", "unit_cost"];

    type Dto = ResourceDto;

    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn apply(&mut self, dto: ResourceDto) {
        self.name = dto.name;
        self.description = dto.description;
        self.quantity = dto.quantity;
        self.unit_cost = dto.unit_cost;
    }

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.quantity)
            .bind(self.unit_cost)
    }
}
