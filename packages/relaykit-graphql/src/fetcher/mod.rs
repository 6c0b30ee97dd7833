//! Data fetchers and the registry that dispatches relation fields to them.
//!
//! A fetcher owns the typed resolver functions for the relations it serves
//! and names the fetchers responsible for its children. Registering a fetcher
//! registers its whole subtree, so a schema only needs to register its roots.

mod task;
mod user;

pub use task::TaskDataFetcher;
pub use user::UserDataFetcher;

use std::{
    any::Any,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_graphql::dynamic::FieldValue;
use tracing::debug;

use crate::{GraphqlError, GraphqlResult};

/// Names of the sub-fields requested beneath a relation field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSelection(Vec<String>);

impl FieldSelection {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for FieldSelection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Type-erased relation resolver, as stored in the registry.
pub type RelationResolver = Arc<
    dyn Fn(&FieldValue<'_>, &FieldSelection) -> GraphqlResult<Vec<FieldValue<'static>>>
        + Send
        + Sync,
>;

/// A relation field served by a registered fetcher.
#[derive(Clone)]
pub struct Relation {
    pub parent_type: String,
    pub name: String,
    pub target_type: String,
    resolver: RelationResolver,
}

impl std::fmt::Debug for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relation")
            .field("parent_type", &self.parent_type)
            .field("name", &self.name)
            .field("target_type", &self.target_type)
            .finish()
    }
}

pub trait DataFetcher: Send + Sync {
    /// Unique name of this fetcher.
    fn name(&self) -> &'static str;

    /// Fetchers for the relations of the entities this fetcher returns,
    /// keyed by relation name.
    fn children(&self) -> Vec<(&'static str, Arc<dyn DataFetcher>)> {
        Vec::new()
    }

    /// Add this fetcher's resolver functions to `registry`.
    fn register_relations(self: Arc<Self>, registry: &mut FetcherRegistry);
}

fn erase<F>(resolver: F) -> RelationResolver
where
    F: Fn(&FieldValue<'_>, &FieldSelection) -> GraphqlResult<Vec<FieldValue<'static>>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(resolver)
}

#[derive(Default)]
pub struct FetcherRegistry {
    fetchers: HashMap<&'static str, Arc<dyn DataFetcher>>,
    relations: BTreeMap<(String, String), Relation>,
}

impl FetcherRegistry {
    /// Register `fetcher` and, recursively, its children. A fetcher name is
    /// only registered once.
    pub fn register(&mut self, fetcher: Arc<dyn DataFetcher>) {
        if self.fetchers.contains_key(fetcher.name()) {
            return;
        }

        debug!("Registering data fetcher {:?}", fetcher.name());
        self.fetchers.insert(fetcher.name(), fetcher.clone());
        fetcher.clone().register_relations(self);

        for (relation, child) in fetcher.children() {
            debug!(
                "Data fetcher {:?} delegates {relation:?} to {:?}",
                fetcher.name(),
                child.name()
            );
            self.register(child);
        }
    }

    /// Map `parent_type.relation` to a typed resolver function.
    pub fn relation<P, T, F>(
        &mut self,
        parent_type: &str,
        relation: &str,
        target_type: &str,
        resolve: F,
    ) where
        P: Any,
        T: Any + Send + Sync,
        F: Fn(&P, &FieldSelection) -> GraphqlResult<Vec<T>> + Send + Sync + 'static,
    {
        let expected = parent_type.to_string();
        let name = relation.to_string();
        let resolver = erase(move |parent, fields| {
            let parent = parent.downcast_ref::<P>().ok_or_else(|| {
                GraphqlError::ParentTypeMismatch(name.clone(), expected.clone())
            })?;

            Ok(resolve(parent, fields)?
                .into_iter()
                .map(FieldValue::owned_any)
                .collect())
        });

        self.relations.insert(
            (parent_type.to_string(), relation.to_string()),
            Relation {
                parent_type: parent_type.to_string(),
                name: relation.to_string(),
                target_type: target_type.to_string(),
                resolver,
            },
        );
    }

    /// Resolve `parent_type.relation` for `parent`.
    pub fn resolve(
        &self,
        parent_type: &str,
        relation: &str,
        parent: &FieldValue<'_>,
        fields: &FieldSelection,
    ) -> GraphqlResult<Vec<FieldValue<'static>>> {
        let entry = self
            .relations
            .get(&(parent_type.to_string(), relation.to_string()))
            .ok_or_else(|| {
                GraphqlError::UnrecognizedField(
                    parent_type.to_string(),
                    relation.to_string(),
                )
            })?;

        debug!("Resolving {parent_type}.{relation} with fields {fields:?}");

        (entry.resolver)(parent, fields)
    }

    pub fn fetcher(&self, name: &str) -> Option<&Arc<dyn DataFetcher>> {
        self.fetchers.get(name)
    }

    /// Relations whose parent is `parent_type`, ordered by relation name.
    pub fn relations_of<'a>(
        &'a self,
        parent_type: &'a str,
    ) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations
            .values()
            .filter(move |relation| relation.parent_type == parent_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{test::*, Company, Database, Task, User};
    use assert_matches::assert_matches;

    fn registry(db: Arc<dyn Database>) -> FetcherRegistry {
        let mut registry = FetcherRegistry::default();
        registry.register(Arc::new(UserDataFetcher::new(db)));
        registry
    }

    #[test]
    fn test_registering_a_fetcher_registers_its_children() {
        let registry = registry(Arc::new(fixture_database()));

        assert!(registry.fetcher("users").is_some());
        assert!(registry.fetcher("tasks").is_some());

        let company: Vec<_> = registry.relations_of(Company::TYPE_NAME).collect();
        assert_eq!(company.len(), 1);
        assert_eq!(company[0].name, "users");
        assert_eq!(company[0].target_type, User::TYPE_NAME);

        let user: Vec<_> = registry.relations_of(User::TYPE_NAME).collect();
        assert_eq!(user.len(), 1);
        assert_eq!(user[0].name, "tasks");
        assert_eq!(user[0].target_type, Task::TYPE_NAME);

        assert_eq!(registry.relations_of(Task::TYPE_NAME).count(), 0);
    }

    #[test]
    fn test_resolve_dispatches_by_relation_name() {
        let db = fixture_database();
        let registry = registry(Arc::new(db.clone()));
        let parent = FieldValue::owned_any(db.companies[0].clone());

        let users = registry
            .resolve(
                Company::TYPE_NAME,
                "users",
                &parent,
                &FieldSelection::new(["name"]),
            )
            .unwrap();

        assert_eq!(users.len(), 30);
        assert_eq!(
            users[0].downcast_ref::<User>().map(|u| u.name.as_str()),
            Some("user-1")
        );
    }

    #[test]
    fn test_resolve_unknown_relation() {
        let registry = registry(Arc::new(fixture_database()));
        let parent = FieldValue::owned_any(1_i64);

        assert_matches!(
            registry
                .resolve("Company", "projects", &parent, &FieldSelection::default())
                .map(|values| values.len()),
            Err(GraphqlError::UnrecognizedField(ty, field)) if ty == "Company" && field == "projects"
        );
    }

    #[test]
    fn test_resolve_rejects_mismatched_parent() {
        let db = fixture_database();
        let registry = registry(Arc::new(db.clone()));
        let parent = FieldValue::owned_any(db.users[0].clone());

        assert_matches!(
            registry
                .resolve(Company::TYPE_NAME, "users", &parent, &FieldSelection::default())
                .map(|values| values.len()),
            Err(GraphqlError::ParentTypeMismatch(relation, ty)) if relation == "users" && ty == "Company"
        );
    }

    #[test]
    fn test_field_selection() {
        let fields: FieldSelection =
            vec!["name".to_string(), "tasks".to_string()].into_iter().collect();

        assert!(fields.contains("tasks"));
        assert!(!fields.contains("email"));
        assert_eq!(fields.iter().collect::<Vec<_>>(), vec!["name", "tasks"]);
        assert!(FieldSelection::default().is_empty());
    }
}
