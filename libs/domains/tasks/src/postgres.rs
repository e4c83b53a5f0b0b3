use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTask, Task, TaskFilter, UpdateTask},
    repository::TaskRepository,
};

pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered_query(project_id: i64, filter: &TaskFilter) -> Select<entity::Entity> {
        let mut query = entity::Entity::find().filter(entity::Column::ProjectId.eq(project_id));

        if let Some(is_completed) = filter.is_completed {
            query = query.filter(entity::Column::IsCompleted.eq(is_completed));
        }

        if let Some(ref search) = filter.search {
            query = query.filter(entity::Column::Title.contains(search));
        }

        query
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, project_id: i64, input: CreateTask) -> TaskResult<Task> {
        let active_model = input.into_active_model(project_id);

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| TaskError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(task_id = model.id, project_id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TaskError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, project_id: i64, filter: TaskFilter) -> TaskResult<(Vec<Task>, u64)> {
        // Count all matching rows before the page is applied
        let total = Self::filtered_query(project_id, &filter)
            .count(&self.db)
            .await
            .map_err(|e| TaskError::Internal(format!("Database error: {}", e)))?;

        let models = Self::filtered_query(project_id, &filter)
            .order_by_asc(entity::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.db)
            .await
            .map_err(|e| TaskError::Internal(format!("Database error: {}", e)))?;

        Ok((models.into_iter().map(|m| m.into()).collect(), total))
    }

    async fn update(&self, id: i64, input: UpdateTask) -> TaskResult<Task> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TaskError::Internal(format!("Database error: {}", e)))?
            .ok_or(TaskError::NotFound(id))?;

        let mut task: Task = model.into();
        task.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(task.id),
            title: Set(task.title.clone()),
            is_completed: Set(task.is_completed),
            due_date: Set(task.due_date.map(Into::into)),
            created_at: Set(task.created_at.into()),
            project_id: Set(task.project_id),
        };

        let updated_model = entity::Entity::update(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| TaskError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(task_id = id, "Updated task");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i64) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TaskError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
