//! Entities exposed through the schema and the relations between them.

use crate::GraphqlResult;

/// Storage backend that relation accessors read from.
pub trait Database: Send + Sync {
    fn companies(&self) -> GraphqlResult<Vec<Company>>;

    fn users(&self) -> GraphqlResult<Vec<User>>;

    fn company_users(&self, company_id: i64) -> GraphqlResult<Vec<User>>;

    fn user_tasks(&self, user_id: i64) -> GraphqlResult<Vec<Task>>;
}

/// A pending one-to-many relation query. Nothing is loaded until [`HasMany::get`].
pub struct HasMany<'a, T> {
    query: Box<dyn FnOnce() -> GraphqlResult<Vec<T>> + 'a>,
}

impl<'a, T> HasMany<'a, T> {
    pub fn new(query: impl FnOnce() -> GraphqlResult<Vec<T>> + 'a) -> Self {
        Self {
            query: Box::new(query),
        }
    }

    /// Run the query and materialize every related entity.
    pub fn get(self) -> GraphqlResult<Vec<T>> {
        (self.query)()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

impl Company {
    pub const TYPE_NAME: &'static str = "Company";

    pub fn users<'a>(&self, db: &'a dyn Database) -> HasMany<'a, User> {
        let company_id = self.id;
        HasMany::new(move || db.company_users(company_id))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    pub const TYPE_NAME: &'static str = "User";

    pub fn tasks<'a>(&self, db: &'a dyn Database) -> HasMany<'a, Task> {
        let user_id = self.id;
        HasMany::new(move || db.user_tasks(user_id))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

impl Task {
    pub const TYPE_NAME: &'static str = "Task";
}

/// In-memory [`Database`], filtered by foreign key.
#[derive(Clone, Debug, Default)]
pub struct MemoryDatabase {
    pub companies: Vec<Company>,
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
}

impl Database for MemoryDatabase {
    fn companies(&self) -> GraphqlResult<Vec<Company>> {
        Ok(self.companies.clone())
    }

    fn users(&self) -> GraphqlResult<Vec<User>> {
        Ok(self.users.clone())
    }

    fn company_users(&self, company_id: i64) -> GraphqlResult<Vec<User>> {
        Ok(self
            .users
            .iter()
            .filter(|user| user.company_id == company_id)
            .cloned()
            .collect())
    }

    fn user_tasks(&self, user_id: i64) -> GraphqlResult<Vec<Task>> {
        Ok(self
            .tasks
            .iter()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::GraphqlError;

    /// Two companies, the second without any users; 30 users; one task per even user.
    pub fn fixture_database() -> MemoryDatabase {
        let companies = vec![
            Company {
                id: 1,
                name: "Acme".to_string(),
            },
            Company {
                id: 2,
                name: "Empty Co".to_string(),
            },
        ];
        let users = (1..=30)
            .map(|id| User {
                id,
                company_id: 1,
                name: format!("user-{id}"),
                email: format!("user-{id}@acme.test"),
            })
            .collect();
        let tasks = (1..=30)
            .filter(|id| id % 2 == 0)
            .map(|id| Task {
                id: 100 + id,
                user_id: id,
                title: format!("task-{id}"),
            })
            .collect();

        MemoryDatabase {
            companies,
            users,
            tasks,
        }
    }

    /// Database whose relation queries always fail.
    pub struct FailingDatabase;

    impl Database for FailingDatabase {
        fn companies(&self) -> GraphqlResult<Vec<Company>> {
            Ok(vec![Company {
                id: 1,
                name: "Acme".to_string(),
            }])
        }

        fn users(&self) -> GraphqlResult<Vec<User>> {
            Err(GraphqlError::RelationError("connection reset".to_string()))
        }

        fn company_users(&self, _company_id: i64) -> GraphqlResult<Vec<User>> {
            Err(GraphqlError::RelationError("connection reset".to_string()))
        }

        fn user_tasks(&self, _user_id: i64) -> GraphqlResult<Vec<Task>> {
            Err(GraphqlError::RelationError("connection reset".to_string()))
        }
    }

    #[test]
    fn test_relation_accessors_filter_by_parent() {
        let db = fixture_database();
        let acme = &db.companies[0];

        let users = acme.users(&db).get().unwrap();
        assert_eq!(users.len(), 30);
        assert!(users.iter().all(|user| user.company_id == acme.id));

        let tasks = users[1].tasks(&db).get().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "task-2");
        assert!(users[0].tasks(&db).get().unwrap().is_empty());
    }

    #[test]
    fn test_company_without_users_yields_empty_relation() {
        let db = fixture_database();

        assert!(db.companies[1].users(&db).get().unwrap().is_empty());
    }
}
