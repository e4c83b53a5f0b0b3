use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use crate::{
    entity,
    error::{ProjectError, ProjectResult},
    models::{CreateProject, Project, ProjectFilter, ProjectPage, UpdateProject},
    repository::ProjectRepository,
};

pub struct PgProjectRepository {
    db: DatabaseConnection,
}

impl PgProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered_query(filter: &ProjectFilter) -> Select<entity::Entity> {
        let mut query = entity::Entity::find();

        if let Some(ref search) = filter.search {
            query = query.filter(entity::Column::Name.contains(search));
        }

        query
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn create(&self, input: CreateProject) -> ProjectResult<Project> {
        let active_model: entity::ActiveModel = input.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| ProjectError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(project_id = model.id, "Created project");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProjectResult<Option<Project>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ProjectError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: ProjectFilter) -> ProjectResult<ProjectPage> {
        // Count all matching rows before the page is applied
        let total = Self::filtered_query(&filter)
            .count(&self.db)
            .await
            .map_err(|e| ProjectError::Internal(format!("Database error: {}", e)))?;

        let models = Self::filtered_query(&filter)
            .order_by_asc(entity::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.db)
            .await
            .map_err(|e| ProjectError::Internal(format!("Database error: {}", e)))?;

        Ok(ProjectPage {
            data: models.into_iter().map(|m| m.into()).collect(),
            total,
        })
    }

    async fn update(&self, id: i64, input: UpdateProject) -> ProjectResult<Project> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ProjectError::Internal(format!("Database error: {}", e)))?
            .ok_or(ProjectError::NotFound(id))?;

        let mut project: Project = model.into();
        project.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(project.id),
            name: Set(project.name.clone()),
            description: Set(project.description.clone()),
            created_at: Set(project.created_at.into()),
        };

        let updated_model = entity::Entity::update(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| ProjectError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(project_id = id, "Updated project");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i64) -> ProjectResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ProjectError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(project_id = id, "Deleted project");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
