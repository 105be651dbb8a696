//! Helpers for template source locations

use url::Url;

/// Derive a template name from a repository location
///
/// Handles URLs (`https://host/org/repo.git`), scp-style remotes
/// (`git@host:org/repo.git`) and local paths. Returns `None` when no
/// usable last segment exists.
pub fn suggest_identifier(location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }

    let path = match Url::parse(location) {
        // Single-letter schemes are Windows drive letters, not URLs
        Ok(url) if url.scheme().len() > 1 => url.path().to_string(),
        _ => match location.split_once(':') {
            Some((host, path)) if host.contains('@') => path.to_string(),
            _ => location.to_string(),
        },
    };

    let segment = path
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
