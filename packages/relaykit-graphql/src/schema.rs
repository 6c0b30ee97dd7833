//! `async_graphql::dynamic` extensions binding paginators and data fetchers
//! into a schema.
//! See: https://graphql.org/learn/pagination/
//! See: https://relay.dev/graphql/connections.htm#sec-Connection-Types

use std::{any::Any, sync::Arc};

use async_graphql::{
    dynamic::{
        Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext,
        Schema as DynamicSchema, SchemaBuilder, TypeRef,
    },
    Value,
};
use extension_trait::extension_trait;
use relaykit_lib::config::GraphQLConfig;
use tracing::debug;

use crate::{
    fetcher::{FetcherRegistry, FieldSelection, UserDataFetcher},
    models::{Company, Database, Task, User},
    page_info::PageInfo,
    paginator::{LengthAwarePage, PaginatedCollection},
    GraphqlError, GraphqlResult,
};

/// Field resolving to a projection of its parent value. `None` resolves to `null`.
fn projection<T, V, F>(name: &str, ty: TypeRef, project: F) -> Field
where
    T: Any,
    V: Into<Value>,
    F: Fn(&T) -> Option<V> + Send + Sync + 'static,
{
    Field::new(name, ty, move |ctx: ResolverContext| {
        let value = ctx
            .parent_value
            .try_downcast_ref::<T>()
            .map(|parent| project(parent).map(FieldValue::value));
        FieldFuture::new(async move { value })
    })
}

#[extension_trait]
pub impl TypeRefPagingExt for TypeRef {
    const PAGE_INFO: &'static str = "PageInfo";

    fn connection(node_name: impl Into<String>) -> String {
        format!("{}Connection", node_name.into())
    }
}

#[extension_trait]
pub impl SchemaBuilderPagingExt for SchemaBuilder {
    fn register_paging_types(self) -> Self {
        let page_info_object = Object::new(TypeRef::PAGE_INFO)
            .description("Information to aid in pagination.")
            .field(
                projection(
                    "hasNextPage",
                    TypeRef::named_nn(TypeRef::BOOLEAN),
                    |info: &PageInfo| Some(info.has_next_page),
                )
                .description("When paginating forwards, are there more items?"),
            )
            .field(
                projection(
                    "hasPreviousPage",
                    TypeRef::named_nn(TypeRef::BOOLEAN),
                    |info: &PageInfo| Some(info.has_previous_page),
                )
                .description("When paginating backwards, are there more items?"),
            )
            .field(
                projection(
                    "startCursor",
                    TypeRef::named(TypeRef::STRING),
                    |info: &PageInfo| info.start_cursor.clone(),
                )
                .description("When paginating backwards, the cursor to continue."),
            )
            .field(
                projection(
                    "endCursor",
                    TypeRef::named(TypeRef::STRING),
                    |info: &PageInfo| info.end_cursor.clone(),
                )
                .description("When paginating forwards, the cursor to continue."),
            )
            .field(
                projection("total", TypeRef::named(TypeRef::INT), |info: &PageInfo| {
                    info.total
                })
                .description("Total number of node in connection."),
            )
            .field(
                projection("count", TypeRef::named(TypeRef::INT), |info: &PageInfo| {
                    info.count
                })
                .description("Count of nodes in current request."),
            )
            .field(
                projection(
                    "currentPage",
                    TypeRef::named(TypeRef::INT),
                    |info: &PageInfo| info.current_page,
                )
                .description("Current page of request."),
            )
            .field(
                projection(
                    "lastPage",
                    TypeRef::named(TypeRef::INT),
                    |info: &PageInfo| info.last_page,
                )
                .description("Last page in connection."),
            );
        self.register(page_info_object)
    }
}

#[extension_trait]
pub impl FieldPagingExt for Field {
    /// Add pagination arguments to a field.
    fn paging_arguments(self) -> Self {
        self.argument(
            InputValue::new("first", TypeRef::named(TypeRef::INT))
                .description("Number of items per page, at least 1. Larger values are capped at the configured maximum."),
        )
        .argument(
            InputValue::new("page", TypeRef::named(TypeRef::INT))
                .description("The page to return, starting at 1."),
        )
    }
}

#[extension_trait]
pub impl ObjectConnectionExt for Object {
    /// Connection object for nodes of type `T`, resolved from a
    /// `PaginatedCollection<T>` parent.
    fn new_connection<T: Any + Clone + Send + Sync>(node_name: &str) -> Self {
        Self::new(TypeRef::connection(node_name))
            .field(Field::new(
                "nodes",
                TypeRef::named_nn_list_nn(node_name),
                |ctx: ResolverContext| {
                    let nodes = ctx
                        .parent_value
                        .try_downcast_ref::<PaginatedCollection<T>>()
                        .map(|collection| {
                            FieldValue::list(
                                collection.items().iter().cloned().map(FieldValue::owned_any),
                            )
                        });
                    FieldFuture::new(async move { nodes.map(Some) })
                },
            ))
            .field(Field::new(
                "pageInfo",
                TypeRef::named_nn(TypeRef::PAGE_INFO),
                |ctx: ResolverContext| {
                    let info = ctx
                        .parent_value
                        .try_downcast_ref::<PaginatedCollection<T>>()
                        .map(|collection| FieldValue::owned_any(PageInfo::resolve(collection)));
                    FieldFuture::new(async move { info.map(Some) })
                },
            ))
    }

    /// Add a field for every relation the registry serves for this object type.
    fn relation_fields(self, registry: &Arc<FetcherRegistry>) -> Self {
        let parent_type = self.type_name().to_string();
        let relations: Vec<(String, String)> = registry
            .relations_of(&parent_type)
            .map(|relation| (relation.name.clone(), relation.target_type.clone()))
            .collect();

        relations
            .into_iter()
            .fold(self, |object, (relation, target_type)| {
                let registry = registry.clone();
                let parent_type = parent_type.clone();
                object.field(Field::new(
                    relation.clone(),
                    TypeRef::named_nn_list_nn(target_type),
                    move |ctx: ResolverContext| {
                        let fields: FieldSelection = ctx
                            .ctx
                            .field()
                            .selection_set()
                            .map(|field| field.name().to_string())
                            .collect();
                        let values = registry
                            .resolve(&parent_type, &relation, ctx.parent_value, &fields)
                            .map(|values| Some(FieldValue::list(values)))
                            .map_err(async_graphql::Error::from);
                        FieldFuture::new(async move { values })
                    },
                ))
            })
    }
}

fn users_collection(
    ctx: &ResolverContext<'_>,
    db: &dyn Database,
    config: &GraphQLConfig,
) -> async_graphql::Result<PaginatedCollection<User>> {
    let first = ctx.args.get("first").map(|value| value.i64()).transpose()?;
    let page = ctx.args.get("page").map(|value| value.i64()).transpose()?;
    let users = db.users()?;

    if first.is_none() && page.is_none() {
        return Ok(users.into());
    }

    let requested = match first {
        Some(first) if first < 1 => {
            return Err(GraphqlError::InvalidPagination(format!(
                "first must be at least 1, got {first}"
            ))
            .into())
        }
        Some(first) => Some(usize::try_from(first).unwrap_or(usize::MAX)),
        None => None,
    };
    let per_page = i64::try_from(config.page_size(requested)).unwrap_or(i64::MAX);

    Ok(LengthAwarePage::paginate(users, per_page, page.unwrap_or(1))?.into())
}

fn query_root(config: &GraphQLConfig, db: Arc<dyn Database>) -> Object {
    let config = config.clone();
    let companies_db = db.clone();

    Object::new("Query")
        .field(Field::new(
            "companies",
            TypeRef::named_nn_list_nn(Company::TYPE_NAME),
            move |_ctx: ResolverContext| {
                let companies = companies_db
                    .companies()
                    .map(|companies| {
                        Some(FieldValue::list(
                            companies.into_iter().map(FieldValue::owned_any),
                        ))
                    })
                    .map_err(async_graphql::Error::from);
                FieldFuture::new(async move { companies })
            },
        ))
        .field(
            Field::new(
                "users",
                TypeRef::named_nn(TypeRef::connection(User::TYPE_NAME)),
                move |ctx: ResolverContext| {
                    let users = users_collection(&ctx, db.as_ref(), &config)
                        .map(|users| Some(FieldValue::owned_any(users)));
                    FieldFuture::new(async move { users })
                },
            )
            .description("All users. Pass `first` or `page` to paginate.")
            .paging_arguments(),
        )
}

/// Build the schema, registering every data fetcher reachable from the root
/// fetchers.
pub fn build_dynamic_schema(
    config: &GraphQLConfig,
    db: Arc<dyn Database>,
) -> GraphqlResult<DynamicSchema> {
    let mut registry = FetcherRegistry::default();
    registry.register(Arc::new(UserDataFetcher::new(db.clone())));
    let registry = Arc::new(registry);

    let company = Object::new(Company::TYPE_NAME)
        .field(projection(
            "id",
            TypeRef::named_nn(TypeRef::INT),
            |company: &Company| Some(company.id),
        ))
        .field(projection(
            "name",
            TypeRef::named_nn(TypeRef::STRING),
            |company: &Company| Some(company.name.clone()),
        ))
        .relation_fields(&registry);

    let user = Object::new(User::TYPE_NAME)
        .field(projection(
            "id",
            TypeRef::named_nn(TypeRef::INT),
            |user: &User| Some(user.id),
        ))
        .field(projection(
            "name",
            TypeRef::named_nn(TypeRef::STRING),
            |user: &User| Some(user.name.clone()),
        ))
        .field(projection(
            "email",
            TypeRef::named_nn(TypeRef::STRING),
            |user: &User| Some(user.email.clone()),
        ))
        .relation_fields(&registry);

    let task = Object::new(Task::TYPE_NAME)
        .field(projection(
            "id",
            TypeRef::named_nn(TypeRef::INT),
            |task: &Task| Some(task.id),
        ))
        .field(projection(
            "title",
            TypeRef::named_nn(TypeRef::STRING),
            |task: &Task| Some(task.title.clone()),
        ));

    let mut schema = DynamicSchema::build("Query", None, None)
        .register_paging_types()
        .register(company)
        .register(user)
        .register(task)
        .register(Object::new_connection::<User>(User::TYPE_NAME))
        .register(query_root(config, db));

    if !config.introspection {
        schema = schema.disable_introspection();
    }

    debug!("Building dynamic schema");

    Ok(schema.finish()?)
}
