use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "employees")]
#[serde(rename_all = "camelCase")]
#[schema(as = Employee)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip)]
    pub row_version: i32,
}

impl Model {
    /// "First Last", used for choice lists and task rows.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_employee::Entity")]
    ProjectEmployees,
}

impl Related<super::project_employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectEmployees.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_employee::Relation::Project.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_employee::Relation::Employee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
