use std::sync::Arc;

use super::{DataFetcher, FetcherRegistry, FieldSelection};
use crate::{
    models::{Database, Task, User},
    GraphqlResult,
};

/// Fetches tasks for a user.
pub struct TaskDataFetcher {
    db: Arc<dyn Database>,
}

impl TaskDataFetcher {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    pub fn user_tasks(
        &self,
        user: &User,
        _fields: &FieldSelection,
    ) -> GraphqlResult<Vec<Task>> {
        user.tasks(self.db.as_ref()).get()
    }
}

impl DataFetcher for TaskDataFetcher {
    fn name(&self) -> &'static str {
        "tasks"
    }

    fn register_relations(self: Arc<Self>, registry: &mut FetcherRegistry) {
        registry.relation(
            User::TYPE_NAME,
            "tasks",
            Task::TYPE_NAME,
            move |user: &User, fields| self.user_tasks(user, fields),
        );
    }
}
