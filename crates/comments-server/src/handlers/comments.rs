use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use comments_shared::{
    Comment, CreateCommentRequest, ItemResponse, ListResponse, MessageResponse, ProductComment,
    UpdateCommentRequest,
};

use crate::error::AppError;
use crate::routes::AppState;
use crate::store::NewComment;

/// Treats a missing field and a blank one the same way.
fn required(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

/// A malformed id can never match a stored comment, so it gets the
/// same 404 envelope as an unknown one instead of a parse rejection.
fn parse_comment_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

/// GET /api/comments/
pub async fn list_all_comments(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<ProductComment>>, AppError> {
    let data = state
        .store
        .list_all()
        .await
        .map_err(AppError::storage("Failed to fetch all comments"))?;

    Ok(Json(ListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// GET /api/comments/:productId
pub async fn list_product_comments(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ListResponse<Comment>>, AppError> {
    let data = state
        .store
        .list_by_product(&product_id)
        .await
        .map_err(AppError::storage("Failed to fetch comments"))?;

    Ok(Json(ListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// POST /api/comments/:productId
pub async fn create_comment(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ItemResponse<Comment>>), AppError> {
    let (Some(user_name), Some(content)) = (required(req.user_name), required(req.content))
    else {
        return Err(AppError::Validation(
            "Username and content are required".to_string(),
        ));
    };

    let comment = state
        .store
        .add(
            &product_id,
            NewComment {
                user_name,
                content,
                rating_val: req.rating_val,
            },
        )
        .await
        .map_err(AppError::storage("Failed to add comment"))?;

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            success: true,
            data: comment,
        }),
    ))
}

/// PUT /api/comments/:productId/:commentId
pub async fn update_comment(
    State(state): State<AppState>,
    Path((product_id, comment_id)): Path<(String, String)>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<ItemResponse<Comment>>, AppError> {
    let Some(content) = required(req.content) else {
        return Err(AppError::Validation("Content is required".to_string()));
    };
    let comment_id = parse_comment_id(&comment_id)?;

    let updated = state
        .store
        .update(&product_id, comment_id, content)
        .await
        .map_err(AppError::storage("Failed to update comment"))?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ItemResponse {
        success: true,
        data: updated,
    }))
}

/// DELETE /api/comments/:productId/:commentId
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((product_id, comment_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    let comment_id = parse_comment_id(&comment_id)?;
    let removed = state
        .store
        .delete(&product_id, comment_id)
        .await
        .map_err(AppError::storage("Failed to delete comment"))?;

    if !removed {
        return Err(AppError::NotFound);
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Comment deleted successfully".to_string(),
    }))
}
