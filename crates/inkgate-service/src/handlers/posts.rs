//! Post listing and subscription-gated post content.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use inkgate_core::{Post, PostSummary};

use crate::auth::{AuthedUser, MaybeAuthedUser};
use crate::content::{ContentClient, ContentError};
use crate::error::ApiError;
use crate::state::AppState;

/// Response for the post list.
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    /// Post summaries, as returned by the content API.
    pub posts: Vec<PostSummary>,
}

/// Response for a single post.
///
/// Readers without an active subscription get the first paragraph and
/// `preview: true`, mirroring the preview page of the original reader flow.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// URL slug.
    pub slug: String,
    /// Plain-text title.
    pub title: String,
    /// Full body, or just the first paragraph when previewing.
    pub content: String,
    /// Last publication time.
    pub updated_at: DateTime<Utc>,
    /// Whether the content was truncated to a preview.
    pub preview: bool,
}

impl PostResponse {
    fn full(post: Post) -> Self {
        Self {
            slug: post.slug,
            title: post.title,
            content: post.content,
            updated_at: post.updated_at,
            preview: false,
        }
    }

    fn preview(post: Post) -> Self {
        let excerpt = post.excerpt().to_string();
        Self {
            slug: post.slug,
            title: post.title,
            content: excerpt,
            updated_at: post.updated_at,
            preview: true,
        }
    }
}

/// List posts. Public; excerpts only.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PostListResponse>, ApiError> {
    let content = content_client(&state)?;
    let posts = content.list_posts().await.map_err(content_failed)?;

    Ok(Json(PostListResponse {
        posts: posts.iter().map(Post::summary).collect(),
    }))
}

/// Fetch a post by slug.
///
/// Full content requires an active subscription on the caller's linked
/// customer; everyone else (including anonymous callers) gets the preview.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    MaybeAuthedUser(user): MaybeAuthedUser,
) -> Result<Json<PostResponse>, ApiError> {
    let content = content_client(&state)?;

    let post = content
        .get_post(&slug)
        .await
        .map_err(content_failed)?
        .ok_or_else(|| ApiError::NotFound(format!("post not found: {slug}")))?;

    let subscribed = match &user {
        Some(user) => has_active_subscription(&state, user)?,
        None => false,
    };

    if subscribed {
        Ok(Json(PostResponse::full(post)))
    } else {
        Ok(Json(PostResponse::preview(post)))
    }
}

fn content_client(state: &AppState) -> Result<&ContentClient, ApiError> {
    state
        .content
        .as_deref()
        .ok_or_else(|| ApiError::ExternalService("content API not configured".into()))
}

fn content_failed(err: ContentError) -> ApiError {
    tracing::warn!(error = %err, "Content API request failed");
    ApiError::ExternalService("content API request failed".into())
}

/// Whether the user's linked customer has an active subscription record.
fn has_active_subscription(state: &AppState, user: &AuthedUser) -> Result<bool, ApiError> {
    let Some(account) = state.store.get_account(&user.user_id)? else {
        return Ok(false);
    };
    let Some(customer_id) = account.stripe_customer_id else {
        return Ok(false);
    };

    Ok(state
        .store
        .get_subscription_by_customer(&customer_id)?
        .is_some_and(|record| record.active))
}
