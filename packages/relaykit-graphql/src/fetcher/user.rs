use std::sync::Arc;

use super::{DataFetcher, FetcherRegistry, FieldSelection, TaskDataFetcher};
use crate::{
    models::{Company, Database, User},
    GraphqlResult,
};

/// Fetches users for a company.
pub struct UserDataFetcher {
    db: Arc<dyn Database>,
}

impl UserDataFetcher {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Resolve company users.
    pub fn company_users(
        &self,
        company: &Company,
        _fields: &FieldSelection,
    ) -> GraphqlResult<Vec<User>> {
        company.users(self.db.as_ref()).get()
    }
}

impl DataFetcher for UserDataFetcher {
    fn name(&self) -> &'static str {
        "users"
    }

    fn children(&self) -> Vec<(&'static str, Arc<dyn DataFetcher>)> {
        vec![("tasks", Arc::new(TaskDataFetcher::new(self.db.clone())))]
    }

    fn register_relations(self: Arc<Self>, registry: &mut FetcherRegistry) {
        registry.relation(
            Company::TYPE_NAME,
            "users",
            User::TYPE_NAME,
            move |company: &Company, fields| self.company_users(company, fields),
        );
    }
}
