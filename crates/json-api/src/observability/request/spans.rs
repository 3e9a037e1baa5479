//! HTTP route label helpers.

use uuid::Uuid;

/// Collapse identifier segments so requests group by route rather than by
/// the entity they touch.
pub(super) fn route_for_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if is_item_key(segment) {
            normalised.push_str("{key}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

fn is_item_key(segment: &str) -> bool {
    let parts: Vec<&str> = segment.split('_').collect();

    parts.len() == 3
        && parts.iter().enumerate().all(|(index, part)| {
            (!part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
                || (index > 0 && *part == swatch::items::ABSENT_TOKEN)
        })
}
