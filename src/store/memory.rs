use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::model::Post;

use super::{Error, NewPost, Page, PostRepository};

/// Posts kept in process memory, lost on restart.
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
	inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
	last_id: i64,
	posts: BTreeMap<i64, Post>,
}

#[axum::async_trait]
impl PostRepository for MemoryPostRepository {
	async fn save(&self, post: NewPost) -> Result<Post, Error> {
		let mut inner = self.inner.write().await;

		inner.last_id += 1;

		let post = Post {
			id: inner.last_id,
			title: post.title,
			content: post.content,
		};

		inner.posts.insert(post.id, post.clone());

		Ok(post)
	}

	async fn find_by_id(&self, id: i64) -> Result<Option<Post>, Error> {
		Ok(self.inner.read().await.posts.get(&id).cloned())
	}

	async fn update(&self, post: &Post) -> Result<bool, Error> {
		let mut inner = self.inner.write().await;

		let Some(stored) = inner.posts.get_mut(&post.id) else {
			return Ok(false);
		};

		stored.clone_from(post);

		Ok(true)
	}

	async fn delete_by_id(&self, id: i64) -> Result<bool, Error> {
		Ok(self.inner.write().await.posts.remove(&id).is_some())
	}

	async fn list(&self, page: Page) -> Result<Vec<Post>, Error> {
		let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
		let limit = usize::try_from(page.limit).unwrap_or(0);

		Ok(self
			.inner
			.read()
			.await
			.posts
			.values()
			.rev()
			.skip(offset)
			.take(limit)
			.cloned()
			.collect())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn new_post(n: usize) -> NewPost {
		NewPost {
			title: format!("title {n}"),
			content: format!("content {n}"),
		}
	}

	#[tokio::test]
	async fn test_ids_are_assigned_in_order() {
		let repository = MemoryPostRepository::default();

		let first = repository.save(new_post(1)).await.unwrap();
		let second = repository.save(new_post(2)).await.unwrap();

		assert_eq!(first.id, 1);
		assert_eq!(second.id, 2);
		assert_eq!(repository.find_by_id(2).await.unwrap(), Some(second));
	}

	#[tokio::test]
	async fn test_ids_are_not_reused_after_delete() {
		let repository = MemoryPostRepository::default();

		let post = repository.save(new_post(1)).await.unwrap();

		assert!(repository.delete_by_id(post.id).await.unwrap());
		assert!(!repository.delete_by_id(post.id).await.unwrap());

		let next = repository.save(new_post(2)).await.unwrap();

		assert_eq!(next.id, 2);
	}

	#[tokio::test]
	async fn test_update_missing_post() {
		let repository = MemoryPostRepository::default();

		let post = Post {
			id: 42,
			title: "title".into(),
			content: "content".into(),
		};

		assert!(!repository.update(&post).await.unwrap());
		assert_eq!(repository.find_by_id(42).await.unwrap(), None);
	}

	#[tokio::test]
	async fn test_list_is_newest_first() {
		let repository = MemoryPostRepository::default();

		for n in 1..=10 {
			repository.save(new_post(n)).await.unwrap();
		}

		let posts = repository
			.list(Page {
				offset: 3,
				limit: 4,
			})
			.await
			.unwrap();

		let ids = posts.iter().map(|post| post.id).collect::<Vec<_>>();

		assert_eq!(ids, vec![7, 6, 5, 4]);

		let posts = repository
			.list(Page {
				offset: 20,
				limit: 5,
			})
			.await
			.unwrap();

		assert!(posts.is_empty());
	}
}
