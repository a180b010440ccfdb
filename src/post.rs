//! Host platform post-creation integration
//!
//! One-shot administrative action: a privileged user asks the hosting
//! social platform to publish the game as an interactive post. The
//! crate only sequences the success path (submit -> toast -> navigate);
//! auth and network failures belong to the host SDK and surface here as
//! `PostError` from the trait seam.

use thiserror::Error;

/// Post title shown on the platform
pub const POST_TITLE: &str = "Catch the circles";
/// Static preview shown while the post loads
pub const LOADING_PREVIEW_URL: &str = "loading.gif";
/// Confirmation toast after a successful submission
pub const CREATED_TOAST: &str = "Created post!";

#[derive(Debug, Error)]
pub enum PostError {
    #[error("caller lacks permission to create posts")]
    NotAuthorized,
    #[error("could not resolve the current community: {0}")]
    Community(String),
    #[error("host rejected the submission: {0}")]
    Submission(String),
}

/// What the host needs to publish the game post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSubmission {
    pub title: String,
    pub community: String,
    pub preview_image_url: String,
}

/// Opaque host-side handle to a created post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostId(pub String);

/// The slice of the host SDK this integration touches
pub trait HostPlatform {
    /// Community the invoking menu action belongs to
    fn current_community(&self) -> Result<String, PostError>;
    fn submit_post(&mut self, submission: &PostSubmission) -> Result<PostId, PostError>;
    /// Fire-and-forget UI feedback
    fn show_toast(&mut self, text: &str);
    fn navigate_to(&mut self, post: &PostId);
}

/// Publish the game as a new post in the current community, confirm,
/// and navigate the user to it.
pub fn create_game_post<H: HostPlatform>(host: &mut H) -> Result<PostId, PostError> {
    let community = host.current_community()?;
    let submission = PostSubmission {
        title: POST_TITLE.to_string(),
        community,
        preview_image_url: LOADING_PREVIEW_URL.to_string(),
    };

    let post = host.submit_post(&submission)?;
    log::info!("created post {} in {}", post.0, submission.community);
    host.show_toast(CREATED_TOAST);
    host.navigate_to(&post);
    Ok(post)
}
