use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
    #[sea_orm(nullable)]
    pub due_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub project_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_projects::entity::Entity",
        from = "Column::ProjectId",
        to = "domain_projects::entity::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<domain_projects::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Task
impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            is_completed: model.is_completed,
            due_date: model.due_date.map(Into::into),
            created_at: model.created_at.into(),
            project_id: model.project_id,
        }
    }
}

impl crate::models::CreateTask {
    /// Build an insertable ActiveModel for the given owning project
    pub fn into_active_model(self, project_id: i64) -> ActiveModel {
        ActiveModel {
            id: NotSet, // assigned by the database
            title: Set(self.title),
            is_completed: Set(false),
            due_date: Set(self.due_date.map(Into::into)),
            created_at: Set(chrono::Utc::now().into()),
            project_id: Set(project_id),
        }
    }
}
