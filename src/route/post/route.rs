use axum::extract::State;
use macros::route;

use crate::{
	error::{AppError, ErrorResponse},
	extract::{Json, Path, Query},
	openapi::tag,
};

use super::{model, service::PostService};

/// Create post
/// Creates a new post and returns its id. The title and content must not be blank, and the title must not contain a forbidden word.
#[route(tag = tag::POST, response(status = 400, description = "The title or content was rejected.", shape = "Json<ErrorResponse>"))]
pub async fn create_post(
	State(posts): State<PostService>,
	Json(input): Json<model::PostCreate>,
) -> Result<Json<i64>, AppError> {
	Ok(Json(posts.write(input).await?))
}

/// Get all posts
/// Returns a paginated response of posts, newest first.
#[route(tag = tag::POST)]
pub async fn get_posts(
	State(posts): State<PostService>,
	Query(search): Query<model::PostSearch>,
) -> Result<Json<Vec<model::PostResponse>>, AppError> {
	Ok(Json(posts.list(&search).await?))
}

/// Get single post
/// Returns a single post by its unique id.
#[route(tag = tag::POST, response(status = 404, description = "The post does not exist.", shape = "Json<ErrorResponse>"))]
pub async fn get_post(
	State(posts): State<PostService>,
	Path(path): Path<model::PostIdInput>,
) -> Result<Json<model::PostResponse>, AppError> {
	Ok(Json(posts.get(path.id).await?))
}

/// Update post
/// Updates an existing post by its unique id. Fields that are missing or null keep their current value.
#[route(tag = tag::POST, response(status = 404, description = "The post does not exist.", shape = "Json<ErrorResponse>"))]
pub async fn update_post(
	State(posts): State<PostService>,
	Path(path): Path<model::PostIdInput>,
	Json(input): Json<model::PostEdit>,
) -> Result<(), AppError> {
	Ok(posts.edit(path.id, input).await?)
}

/// Delete post
/// Deletes an existing post by its unique id.
#[route(tag = tag::POST, response(status = 404, description = "The post does not exist.", shape = "Json<ErrorResponse>"))]
pub async fn delete_post(
	State(posts): State<PostService>,
	Path(path): Path<model::PostIdInput>,
) -> Result<(), AppError> {
	Ok(posts.delete(path.id).await?)
}
