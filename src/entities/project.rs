use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "projects")]
#[serde(rename_all = "camelCase")]
#[schema(as = Project)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub customer_company: String,
    pub executor_company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub priority: i32,
    /// Always a member of the project (see `project_employees`)
    pub leader_id: i32,
    #[serde(skip)]
    pub row_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_employee::Entity")]
    ProjectEmployees,
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
}

impl Related<super::project_employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectEmployees.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_employee::Relation::Employee.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_employee::Relation::Project.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
