use crate::{model::Post, Database};

use super::{Error, NewPost, Page, PostRepository};

/// Posts stored in the `post` table.
#[derive(Debug, Clone)]
pub struct PgPostRepository {
	database: Database,
}

impl PgPostRepository {
	pub fn new(database: Database) -> Self {
		Self { database }
	}
}

#[axum::async_trait]
impl PostRepository for PgPostRepository {
	async fn save(&self, post: NewPost) -> Result<Post, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				INSERT INTO post (title, content)
				VALUES ($1, $2)
				RETURNING id, title, content
			"#,
		)
		.bind(post.title)
		.bind(post.content)
		.fetch_one(&self.database)
		.await?;

		Ok(post)
	}

	async fn find_by_id(&self, id: i64) -> Result<Option<Post>, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				SELECT id, title, content FROM post
				WHERE id = $1
			"#,
		)
		.bind(id)
		.fetch_optional(&self.database)
		.await?;

		Ok(post)
	}

	async fn update(&self, post: &Post) -> Result<bool, Error> {
		let status = sqlx::query(
			r#"
				UPDATE post
				SET title = $1, content = $2
				WHERE id = $3
			"#,
		)
		.bind(&post.title)
		.bind(&post.content)
		.bind(post.id)
		.execute(&self.database)
		.await?;

		Ok(status.rows_affected() > 0)
	}

	async fn delete_by_id(&self, id: i64) -> Result<bool, Error> {
		let status = sqlx::query(
			r#"
				DELETE FROM post
				WHERE id = $1
			"#,
		)
		.bind(id)
		.execute(&self.database)
		.await?;

		Ok(status.rows_affected() > 0)
	}

	async fn list(&self, page: Page) -> Result<Vec<Post>, Error> {
		let posts = sqlx::query_as::<_, Post>(
			r#"
				SELECT id, title, content FROM post
				ORDER BY id DESC
				LIMIT $1 OFFSET $2
			"#,
		)
		.bind(page.limit)
		.bind(page.offset)
		.fetch_all(&self.database)
		.await?;

		Ok(posts)
	}
}
