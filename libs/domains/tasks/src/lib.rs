//! Tasks Domain
//!
//! Tasks are units of work owned by exactly one project. This crate builds
//! on `domain_projects`: the task service resolves the owning project for
//! every operation, and the shared in-memory store mirrors the database's
//! cascade semantics when a project goes away.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use memory::{InMemoryProjectStore, InMemoryStore, InMemoryTaskStore};
pub use models::{
    CreateTask, DeleteTaskResponse, Task, TaskFilter, TaskPage, TaskWithProject, UpdateTask,
};
pub use postgres::PgTaskRepository;
pub use repository::TaskRepository;
pub use service::TaskService;
