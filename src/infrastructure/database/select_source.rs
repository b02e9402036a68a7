//! SeaORM adapter
//!
//! [`SelectSource`] exposes a `Select<E>` as a [`PageSource`]. The extension
//! traits put pagination directly on queries and entities:
//!
//! ```ignore
//! use sea_paginate::{EntityPaginateExt, PaginateExt};
//!
//! // Caller-ordered query
//! let page = post::Entity::find()
//!     .filter(post::Column::Published.eq(true))
//!     .order_by_desc(post::Column::CreatedAt)
//!     .fetch_page(&db, 2, 20)
//!     .await?;
//!
//! // Whole table in primary key order
//! let page = post::Entity::find_page(&db, 1, 20).await?;
//! ```

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, Iterable, PaginatorTrait,
    PrimaryKeyToColumn, QueryOrder, QuerySelect, Select,
};

use crate::application::ports::PageSource;
use crate::application::services::{paginate, paginate_request};
use crate::shared::{DbPaginationError, PageRequest, PageResult};

/// A SeaORM query bound to a connection.
///
/// Row order is whatever the query specifies; without an `ORDER BY` the
/// database is free to return windows inconsistently.
pub struct SelectSource<'db, E, C>
where
    E: EntityTrait,
{
    select: Select<E>,
    db: &'db C,
}

impl<'db, E, C> SelectSource<'db, E, C>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    pub fn new(select: Select<E>, db: &'db C) -> Self {
        Self { select, db }
    }
}

#[async_trait]
impl<'db, E, C> PageSource for SelectSource<'db, E, C>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'db,
    C: ConnectionTrait,
{
    type Item = E::Model;
    type Error = DbErr;

    async fn count(&self) -> Result<u64, DbErr> {
        self.select.clone().count(self.db).await
    }

    async fn fetch_window(&self, offset: u64, limit: u64) -> Result<Vec<E::Model>, DbErr> {
        self.select
            .clone()
            .offset(offset)
            .limit(limit)
            .all(self.db)
            .await
    }
}

/// Page-number pagination for SeaORM `Select` queries
#[async_trait]
pub trait PaginateExt<E>: Sized + Send
where
    E: EntityTrait,
{
    /// Fetch page `page_number` (1-based) of `page_size` rows.
    async fn fetch_page<C>(
        self,
        db: &C,
        page_number: u64,
        page_size: u64,
    ) -> Result<PageResult<E::Model>, DbPaginationError>
    where
        C: ConnectionTrait;

    async fn fetch_page_request<C>(
        self,
        db: &C,
        request: PageRequest,
    ) -> Result<PageResult<E::Model>, DbPaginationError>
    where
        C: ConnectionTrait;
}

#[async_trait]
impl<E> PaginateExt<E> for Select<E>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
{
    async fn fetch_page<C>(
        self,
        db: &C,
        page_number: u64,
        page_size: u64,
    ) -> Result<PageResult<E::Model>, DbPaginationError>
    where
        C: ConnectionTrait,
    {
        let source = SelectSource::new(self, db);
        paginate(&source, page_number, page_size).await
    }

    async fn fetch_page_request<C>(
        self,
        db: &C,
        request: PageRequest,
    ) -> Result<PageResult<E::Model>, DbPaginationError>
    where
        C: ConnectionTrait,
    {
        let source = SelectSource::new(self, db);
        paginate_request(&source, request).await
    }
}

/// Pagination over a whole entity table, ordered by primary key.
///
/// Works the same for integer, UUID and composite keys: every key column is
/// added to the `ORDER BY` in declaration order.
#[async_trait]
pub trait EntityPaginateExt: EntityTrait {
    /// `Self::find()` ordered ascending by each primary key column.
    fn find_in_key_order() -> Select<Self>;

    async fn find_page<C>(
        db: &C,
        page_number: u64,
        page_size: u64,
    ) -> Result<PageResult<Self::Model>, DbPaginationError>
    where
        C: ConnectionTrait;
}

#[async_trait]
impl<E> EntityPaginateExt for E
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
{
    fn find_in_key_order() -> Select<E> {
        E::PrimaryKey::iter().fold(E::find(), |select, key| {
            select.order_by_asc(key.into_column())
        })
    }

    async fn find_page<C>(
        db: &C,
        page_number: u64,
        page_size: u64,
    ) -> Result<PageResult<E::Model>, DbPaginationError>
    where
        C: ConnectionTrait,
    {
        Self::find_in_key_order()
            .fetch_page(db, page_number, page_size)
            .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{
        ColumnTrait, ConnectOptions, Database, DatabaseConnection, QueryFilter, Schema, Set,
    };

    use super::*;
    use crate::infrastructure::database::entities::{membership, post, token};
    use crate::shared::{InvalidPageRequest, PaginationError};

    async fn connect() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        Database::connect(opts).await.unwrap()
    }

    async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
        let backend = db.get_database_backend();
        let schema = Schema::new(backend);
        db.execute(backend.build(&schema.create_table_from_entity(entity)))
            .await
            .unwrap();
    }

    /// Posts with ids 1..=total, inserted in reverse id order
    async fn posts_db(total: i32) -> DatabaseConnection {
        let db = connect().await;
        create_table(&db, post::Entity).await;
        if total > 0 {
            let rows = (1..=total).rev().map(|id| post::ActiveModel {
                id: Set(id),
                title: Set(format!("post {}", id)),
            });
            post::Entity::insert_many(rows).exec_without_returning(&db).await.unwrap();
        }
        db
    }

    fn ids(page: &PageResult<post::Model>) -> Vec<i32> {
        page.items.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_pages_in_primary_key_order() {
        let db = posts_db(25).await;

        let first = post::Entity::find_page(&db, 1, 10).await.unwrap();
        assert_eq!(ids(&first), (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_count, 25);
        assert_eq!(first.total_pages, 3);

        let last = post::Entity::find_page(&db, 3, 10).await.unwrap();
        assert_eq!(ids(&last), (21..=25).collect::<Vec<_>>());

        let beyond = post::Entity::find_page(&db, 5, 10).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 25);
        assert_eq!(beyond.total_pages, 3);
    }

    #[tokio::test]
    async fn test_empty_table() {
        let db = posts_db(0).await;
        let page = post::Entity::find_page(&db, 1, 10).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_filtered_query_counts_only_matching_rows() {
        let db = posts_db(25).await;
        let page = post::Entity::find()
            .filter(post::Column::Id.lte(12))
            .order_by_desc(post::Column::Id)
            .fetch_page(&db, 2, 5)
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![7, 6, 5, 4, 3]);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_validated_request_and_map() {
        let db = posts_db(4).await;
        let request = PageRequest::new(2, 3).unwrap();
        let titles = post::Entity::find_in_key_order()
            .fetch_page_request(&db, request)
            .await
            .unwrap()
            .map(|p| p.title);

        assert_eq!(titles.items, vec!["post 4".to_string()]);
        assert_eq!(titles.total_pages, 2);
    }

    #[tokio::test]
    async fn test_uuid_keys() {
        let db = connect().await;
        create_table(&db, token::Entity).await;

        let mut keys: Vec<uuid::Uuid> = (0..7).map(|_| uuid::Uuid::new_v4()).collect();
        let rows = keys.iter().map(|id| token::ActiveModel {
            id: Set(*id),
            label: Set(id.to_string()),
        });
        token::Entity::insert_many(rows).exec_without_returning(&db).await.unwrap();
        keys.sort();

        let mut seen = Vec::new();
        for page_number in 1..=3 {
            let page = token::Entity::find_page(&db, page_number, 3).await.unwrap();
            assert_eq!(page.total_count, 7);
            assert_eq!(page.total_pages, 3);
            seen.extend(page.items.into_iter().map(|t| t.id));
        }
        assert_eq!(seen, keys);
    }

    #[tokio::test]
    async fn test_composite_keys() {
        let db = connect().await;
        create_table(&db, membership::Entity).await;

        let pairs = [(2, 1), (1, 3), (2, 2), (1, 1), (3, 1), (1, 2)];
        let rows = pairs.iter().map(|(group_id, user_id)| membership::ActiveModel {
            group_id: Set(*group_id),
            user_id: Set(*user_id),
        });
        membership::Entity::insert_many(rows).exec_without_returning(&db).await.unwrap();

        let page = membership::Entity::find_page(&db, 1, 4).await.unwrap();
        let keys: Vec<(i32, i32)> = page.items.iter().map(|m| (m.group_id, m.user_id)).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (1, 3), (2, 1)]);
        assert_eq!(page.total_count, 6);
        assert_eq!(page.total_pages, 2);

        let page = membership::Entity::find_page(&db, 2, 4).await.unwrap();
        let keys: Vec<(i32, i32)> = page.items.iter().map(|m| (m.group_id, m.user_id)).collect();
        assert_eq!(keys, vec![(2, 2), (3, 1)]);
    }

    #[tokio::test]
    async fn test_invalid_arguments_checked_before_query() {
        // No tables: any query would fail
        let db = connect().await;

        let err = post::Entity::find_page(&db, 0, 10).await.unwrap_err();
        assert!(matches!(
            err,
            PaginationError::InvalidArgument(InvalidPageRequest::PageNumber(0))
        ));

        let err = post::Entity::find_page(&db, 1, 0).await.unwrap_err();
        assert!(matches!(
            err,
            PaginationError::InvalidArgument(InvalidPageRequest::PageSize(0))
        ));
    }

    #[tokio::test]
    async fn test_database_error_is_passed_through() {
        let db = connect().await;
        let err = post::Entity::find_page(&db, 1, 10).await.unwrap_err();
        assert!(!err.is_invalid_argument());
        assert!(err.into_source().is_some());
    }
}
