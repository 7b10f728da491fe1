/// A single blog post.
///
/// The `id` is assigned by the store when the post is first saved and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
	pub id: i64,
	pub title: String,
	pub content: String,
}

impl Post {
	/// Replaces each field that has a new value, keeping the rest as-is.
	pub fn edit(&mut self, title: Option<String>, content: Option<String>) {
		if let Some(title) = title {
			self.title = title;
		}

		if let Some(content) = content {
			self.content = content;
		}
	}
}
