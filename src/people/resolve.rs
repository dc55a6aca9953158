//! Looking up members that are not on the roster.

use tracing::info;

use super::Member;
use crate::error::ResolveError;
use crate::markup;
use crate::site::{Endpoints, Site};

/// Fetch `/people/show/{id}` and build a member from its name header and
/// creation-date metadata.
pub async fn resolve_raw_id<S: Site>(
    site: &S,
    endpoints: &Endpoints,
    id: &str,
) -> Result<Member, ResolveError> {
    info!(id, "resolving to a user");
    let page = site
        .get(&endpoints.profile(id))
        .await
        .map_err(|source| ResolveError::Fetch {
            id: id.to_string(),
            source,
        })?;

    let name = markup::profile_name(&page.body).ok_or_else(|| ResolveError::MissingName {
        id: id.to_string(),
    })?;
    let meta = markup::profile_metadata(&page.body).map_err(|source| ResolveError::Markup {
        id: id.to_string(),
        source,
    })?;

    Ok(Member {
        name,
        id: id.to_string(),
        joined: meta.created.date(),
    })
}
