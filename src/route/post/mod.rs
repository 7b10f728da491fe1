use aide::axum::{routing::get_with, ApiRouter};

use crate::{error::AppError, store, AppState};

pub mod model;
pub mod policy;
pub mod route;
pub mod service;

pub const UNKNOWN_POST: &str = "post does not exist";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	UnknownPost(i64),
	#[error("title contains forbidden word {word:?}")]
	ForbiddenTitle { word: String, message: String },
	#[error("storage error: {0}")]
	Storage(#[from] store::Error),
}

impl From<Error> for AppError {
	fn from(error: Error) -> Self {
		match error {
			Error::UnknownPost(..) => Self::NotFound(UNKNOWN_POST),
			Error::ForbiddenTitle { message, .. } => Self::field("title", message),
			Error::Storage(error) => Self::Unclassified(error.to_string()),
		}
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_posts, get_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route(
			"/:id",
			get_with(get_post, get_post_docs)
				.patch_with(update_post, update_post_docs)
				.delete_with(delete_post, delete_post_docs),
		)
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_create_and_get() {
		let app = app();

		let response = app
			.post("/posts")
			.json(&json!({
				"title": "title",
				"content": "content",
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let id = response.json::<i64>();
		let response = app.get(&format!("/posts/{id}")).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(
			response.json::<Value>(),
			json!({
				"id": id,
				"title": "title",
				"content": "content",
			})
		);
	}

	#[tokio::test]
	async fn test_create_blank_title() {
		let app = app();

		for body in [
			json!({ "content": "content" }),
			json!({ "title": null, "content": "content" }),
			json!({ "title": "", "content": "content" }),
			json!({ "title": " \t\n", "content": "content" }),
		] {
			let response = app.post("/posts").json(&body).await;

			assert_eq!(response.status_code(), 400);

			let body = response.json::<Value>();

			assert_eq!(body["code"], "400");
			assert_eq!(body["message"], "invalid request");
			assert_eq!(body["validation"]["title"], "title must not be blank");
		}
	}

	#[tokio::test]
	async fn test_create_reports_every_field() {
		let app = app();

		let response = app.post("/posts").json(&json!({})).await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(
			response.json::<Value>()["validation"],
			json!({
				"title": "title must not be blank",
				"content": "content must not be blank",
			})
		);
	}

	#[tokio::test]
	async fn test_create_forbidden_title() {
		let app = app();

		let response = app
			.post("/posts")
			.json(&json!({
				"title": format!("나는 {FORBIDDEN}입니다"),
				"content": "content",
			}))
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(
			response.json::<Value>(),
			json!({
				"code": "400",
				"message": "invalid request",
				"validation": { "title": FORBIDDEN_MESSAGE },
			})
		);

		// nothing was written
		let response = app.get("/posts").await;

		assert_eq!(response.json::<Value>(), json!([]));
	}

	#[tokio::test]
	async fn test_create_forbidden_title_with_blank_content() {
		let app = app();

		let response = app
			.post("/posts")
			.json(&json!({
				"title": FORBIDDEN,
				"content": "",
			}))
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_create_wrong_type() {
		let app = app();

		let response = app
			.post("/posts")
			.json(&json!({
				"title": 5,
				"content": "content",
			}))
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(response.json::<Value>()["validation"], json!({}));
	}

	#[tokio::test]
	async fn test_get_posts_newest_first() {
		let app = app();

		for n in 1..=30 {
			create_post(&app, &format!("title {n}"), &format!("content {n}")).await;
		}

		let response = app
			.get("/posts")
			.add_query_param("page", 1)
			.add_query_param("size", 5)
			.await;

		assert_eq!(response.status_code(), 200);

		let posts = response.json::<Vec<Value>>();

		assert_eq!(posts.len(), 5);
		assert_eq!(posts[0]["title"], "title 30");
		assert_eq!(posts[4]["title"], "title 26");

		let response = app.get("/posts").add_query_param("page", 0).await;
		let posts = response.json::<Vec<Value>>();

		// page 0 is read as page 1 and size defaults to 5
		assert_eq!(posts.len(), 5);
		assert_eq!(posts[0]["title"], "title 30");
	}

	#[tokio::test]
	async fn test_get_unknown_post() {
		let app = app();

		let id = create_post(&app, "title", "content").await;
		let response = app.get(&format!("/posts/{}", id + 1)).await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(
			response.json::<Value>(),
			json!({
				"code": "404",
				"message": "post does not exist",
				"validation": {},
			})
		);
	}

	#[tokio::test]
	async fn test_get_invalid_id() {
		let app = app();

		let response = app.get("/posts/abc").await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(response.json::<Value>()["message"], "invalid request");
	}

	#[tokio::test]
	async fn test_update_keeps_null_fields() {
		let app = app();

		let id = create_post(&app, "title", "content").await;

		let response = app
			.patch(&format!("/posts/{id}"))
			.json(&json!({
				"title": null,
				"content": "new content",
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let post = app.get(&format!("/posts/{id}")).await.json::<Value>();

		assert_eq!(post["title"], "title");
		assert_eq!(post["content"], "new content");

		let response = app
			.patch(&format!("/posts/{id}"))
			.json(&json!({ "title": "new title" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let post = app.get(&format!("/posts/{id}")).await.json::<Value>();

		assert_eq!(post["title"], "new title");
		assert_eq!(post["content"], "new content");
	}

	#[tokio::test]
	async fn test_update_unknown_post() {
		let app = app();

		let response = app
			.patch("/posts/1")
			.json(&json!({ "title": "title" }))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_delete_post() {
		let app = app();

		let id = create_post(&app, "title", "content").await;
		let response = app.delete(&format!("/posts/{id}")).await;

		assert_eq!(response.status_code(), 200);

		let response = app.get(&format!("/posts/{id}")).await;

		assert_eq!(response.status_code(), 404);

		let response = app.delete(&format!("/posts/{id}")).await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>()["message"], "post does not exist");
	}

	#[tokio::test]
	async fn test_unsupported_method() {
		let app = app();

		let id = create_post(&app, "title", "content").await;
		let response = app.put(&format!("/posts/{id}")).await;

		assert_eq!(response.status_code(), 405);
		assert_eq!(
			response.json::<Value>(),
			json!({
				"code": "405",
				"message": "method not allowed",
				"validation": {},
			})
		);
	}

	#[tokio::test]
	async fn test_unknown_route() {
		let app = app();

		let response = app.get("/nope").await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(
			response.json::<Value>(),
			json!({
				"code": "404",
				"message": "resource does not exist",
				"validation": {},
			})
		);
	}

	#[tokio::test]
	async fn test_docs_list_error_responses() {
		let app = app();

		let response = app.get("/docs/api.json").await;

		assert_eq!(response.status_code(), 200);

		let api = response.json::<Value>();
		let post = &api["paths"]["/posts/{id}"];

		for method in ["get", "patch", "delete"] {
			assert!(
				post[method]["responses"]["404"].is_object(),
				"{method} is missing its 404 response"
			);
		}

		let posts = api["paths"]
			.get("/posts")
			.or_else(|| api["paths"].get("/posts/"))
			.unwrap();

		assert!(posts["post"]["responses"]["400"].is_object());
	}
}
