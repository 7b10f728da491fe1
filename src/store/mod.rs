mod memory;
mod postgres;

pub use memory::MemoryPostRepository;
pub use postgres::PgPostRepository;

use crate::model::Post;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// The fields of a post that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPost {
	pub title: String,
	pub content: String,
}

/// A window into the posts, ordered newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	pub offset: i64,
	pub limit: i64,
}

/// Storage for posts.
///
/// Implementations assign ids on [`PostRepository::save`] and must write both
/// fields of an [`PostRepository::update`] at once, so that readers never see
/// a half-edited post.
#[axum::async_trait]
pub trait PostRepository: Send + Sync {
	/// Stores a new post and returns it with its assigned id.
	async fn save(&self, post: NewPost) -> Result<Post, Error>;

	async fn find_by_id(&self, id: i64) -> Result<Option<Post>, Error>;

	/// Overwrites the title and content of an existing post.
	///
	/// Returns `false` if no post with the id exists.
	async fn update(&self, post: &Post) -> Result<bool, Error>;

	/// Returns `false` if no post with the id exists.
	async fn delete_by_id(&self, id: i64) -> Result<bool, Error>;

	/// Lists posts ordered by id descending.
	async fn list(&self, page: Page) -> Result<Vec<Post>, Error>;
}
