//! Naming helpers shared by the user and blog services.
//!
//! Upload filenames are derived from the owning entity's id plus the
//! client-supplied filename. Only the final path component of the client
//! filename is used; a repeated upload under the same name overwrites the
//! previous file.

use crate::types::DbId;

/// Author name substituted when the user service cannot resolve an owner id.
///
/// Article reads never fail because of a failed enrichment call; affected
/// entries carry this deterministic placeholder instead.
pub fn placeholder_author_name(owner_id: DbId) -> String {
    format!("사용자_{owner_id}")
}

/// Stored filename for a user's profile image.
pub fn profile_image_filename(user_id: DbId, original: &str) -> String {
    format!("user_{user_id}_{}", base_name(original))
}

/// Stored filename for an article image.
pub fn article_image_filename(article_id: DbId, original: &str) -> String {
    format!("article_{article_id}_{}", base_name(original))
}

/// Strip any directory components from a client-supplied filename.
fn base_name(original: &str) -> &str {
    original
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("upload")
}
