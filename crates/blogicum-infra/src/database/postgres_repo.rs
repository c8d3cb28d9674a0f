//! PostgreSQL repository implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use blogicum_core::domain::{
    Category, Comment, CommentEntry, Location, Page, PageRequest, Post, PostEntry, User,
};
use blogicum_core::error::RepoError;
use blogicum_core::policy::{PostFilter, Visibility};
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, Repositories,
    UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// All repositories sharing one connection pool.
pub fn postgres_repositories(db: DbConn) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        posts: Arc::new(PostgresPostRepository::new(db.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
        locations: Arc::new(PostgresLocationRepository::new(db.clone())),
        comments: Arc::new(PostgresCommentRepository::new(db)),
    }
}

/// Mask an email address so it can be logged without PII.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 1 => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        Some((_, domain)) => format!("***@{domain}"),
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }
}

/// Translate a [`PostFilter`] into a posts query.
///
/// Live-only filters left-join the category so that posts without one stay
/// visible while posts in an unpublished category drop out.
pub(crate) fn filtered_posts(filter: &PostFilter) -> Select<PostEntity> {
    let mut query = PostEntity::find();

    if let Some(author_id) = filter.author_id {
        query = query.filter(post::Column::AuthorId.eq(author_id));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(post::Column::CategoryId.eq(category_id));
    }
    if let Visibility::LiveAt(now) = filter.visibility {
        query = query
            .join(JoinType::LeftJoin, post::Relation::Category.def())
            .filter(post::Column::IsPublished.eq(true))
            .filter(post::Column::PubDate.lte(now))
            .filter(
                Condition::any()
                    .add(post::Column::CategoryId.is_null())
                    .add(category::Column::IsPublished.eq(true)),
            );
    }

    query
}

#[derive(Debug, FromQueryResult)]
struct CommentCount {
    post_id: Uuid,
    comment_count: i64,
}

impl PostgresPostRepository {
    /// Resolve authors, categories, locations and comment counts for a page
    /// of posts with one query per relation.
    async fn annotate(&self, models: Vec<post::Model>) -> Result<Vec<PostEntry>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let author_ids: Vec<Uuid> = models.iter().map(|m| m.author_id).collect();
        let category_ids: Vec<Uuid> = models.iter().filter_map(|m| m.category_id).collect();
        let location_ids: Vec<Uuid> = models.iter().filter_map(|m| m.location_id).collect();

        let authors = self.usernames(author_ids).await?;
        let categories = self.categories(category_ids).await?;
        let locations = self.locations(location_ids).await?;
        let counts = self.comment_counts(post_ids).await?;

        let entries = models
            .into_iter()
            .map(|model| {
                let post: Post = model.into();
                PostEntry {
                    author_username: authors.get(&post.author_id).cloned().unwrap_or_default(),
                    category: post.category_id.and_then(|id| categories.get(&id).cloned()),
                    location: post.location_id.and_then(|id| locations.get(&id).cloned()),
                    comment_count: counts.get(&post.id).copied().unwrap_or(0),
                    post,
                }
            })
            .collect();

        Ok(entries)
    }

    async fn usernames(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, String>, RepoError> {
        let users = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
    }

    async fn categories(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, Category>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let categories = CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(categories.into_iter().map(|c| (c.id, c.into())).collect())
    }

    async fn locations(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, Location>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let locations = LocationEntity::find()
            .filter(location::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(locations.into_iter().map(|l| (l.id, l.into())).collect())
    }

    async fn comment_counts(&self, post_ids: Vec<Uuid>) -> Result<HashMap<Uuid, u64>, RepoError> {
        let counts = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(comment::Column::Id.count(), "comment_count")
            .filter(comment::Column::PostId.is_in(post_ids))
            .group_by(comment::Column::PostId)
            .into_model::<CommentCount>()
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(counts
            .into_iter()
            .map(|c| (c.post_id, c.comment_count.max(0) as u64))
            .collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<PostEntry>, RepoError> {
        let query = filtered_posts(filter);

        let total = query.clone().count(&self.db).await.map_err(repo_err)?;
        let models = query
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::CreatedAt)
            .offset(request.offset())
            .limit(request.size())
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        let items = self.annotate(models).await?;
        Ok(Page::new(items, request, total))
    }

    async fn find_entry(&self, id: Uuid) -> Result<Option<PostEntry>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?
        else {
            return Ok(None);
        };

        Ok(self.annotate(vec![model]).await?.pop())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_published(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::IsPublished.eq(true))
            .order_by_asc(category::Column::Slug)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn list_published(&self) -> Result<Vec<Location>, RepoError> {
        let result = LocationEntity::find()
            .filter(location::Column::IsPublished.eq(true))
            .order_by_asc(location::Column::Name)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_for_post(&self, post_id: Uuid) -> Result<Vec<CommentEntry>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentEntry {
                author_username: author.map(|a| a.username).unwrap_or_default(),
                comment: comment.into(),
            })
            .collect())
    }

    async fn find_in_post(
        &self,
        comment_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find_by_id(comment_id)
            .filter(comment::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }
}
