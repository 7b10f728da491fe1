use std::sync::Arc;

use crate::store::{NewPost, PostRepository};

use super::{
	model::{PostCreate, PostEdit, PostResponse, PostSearch},
	policy::TitlePolicy,
	Error,
};

/// Post operations on top of a [`PostRepository`].
#[derive(Clone)]
pub struct PostService {
	repository: Arc<dyn PostRepository>,
	policy: Arc<TitlePolicy>,
}

impl PostService {
	pub fn new(repository: Arc<dyn PostRepository>, policy: TitlePolicy) -> Self {
		Self {
			repository,
			policy: Arc::new(policy),
		}
	}

	/// Stores a new post, returning its id.
	#[tracing::instrument(skip_all)]
	pub async fn write(&self, input: PostCreate) -> Result<i64, Error> {
		self.policy.check(&input.title)?;

		let post = self
			.repository
			.save(NewPost {
				title: input.title,
				content: input.content,
			})
			.await?;

		tracing::info!(id = post.id, "created post");

		Ok(post.id)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: i64) -> Result<PostResponse, Error> {
		let post = self
			.repository
			.find_by_id(id)
			.await?
			.ok_or(Error::UnknownPost(id))?;

		Ok(post.into())
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self, search: &PostSearch) -> Result<Vec<PostResponse>, Error> {
		let posts = self.repository.list(search.page()).await?;

		Ok(posts.into_iter().map(PostResponse::from).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn edit(&self, id: i64, edit: PostEdit) -> Result<(), Error> {
		let mut post = self
			.repository
			.find_by_id(id)
			.await?
			.ok_or(Error::UnknownPost(id))?;

		post.edit(edit.title, edit.content);

		// the post can disappear between the read and the write
		if !self.repository.update(&post).await? {
			return Err(Error::UnknownPost(id));
		}

		tracing::info!(id, "edited post");

		Ok(())
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: i64) -> Result<(), Error> {
		let post = self
			.repository
			.find_by_id(id)
			.await?
			.ok_or(Error::UnknownPost(id))?;

		if !self.repository.delete_by_id(post.id).await? {
			return Err(Error::UnknownPost(id));
		}

		tracing::info!(id, "deleted post");

		Ok(())
	}
}
