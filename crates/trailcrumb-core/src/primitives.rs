//! # Innate Primitives
//!
//! Fixed constants of the breadcrumb engine.
//!
//! These values mirror conventions of the host publishing model and are
//! compiled in; they are not configuration.

/// The generic blog-post content type.
///
/// Items of this type never get a content-type archive crumb, and they are
/// the only items that can receive the blog-index crumb.
pub const POST_TYPE: &str = "post";

/// Preferred-parent value meaning "the blog index page" for a taxonomy.
pub const BLOG_PARENT_SENTINEL: &str = "post";

/// Stored option value meaning "disabled" for taxonomy selectors.
pub const UNSET_OPTION: &str = "0";

/// Order assumed for a root ancestor that has no configured order.
///
/// Such candidates lose every tie against candidates with an order.
pub const DEFAULT_ROOT_ORDER: i64 = i64::MAX;

/// Hook names as reported in warnings.
pub const ANCESTORS_HOOK: &str = "ancestors";
pub const TRAIL_HOOK: &str = "trail";

/// Returns true when a stored selector value is present and not disabled.
#[must_use]
pub fn is_set(value: &str) -> bool {
    !value.is_empty() && value != UNSET_OPTION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values() {
        assert!(!is_set(""));
        assert!(!is_set("0"));
        assert!(is_set("category"));
    }

    #[test]
    fn blog_sentinel_is_post_type() {
        assert_eq!(BLOG_PARENT_SENTINEL, POST_TYPE);
    }
}
