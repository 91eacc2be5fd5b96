use super::{match_pattern, normalize, RoutePattern};
use crate::error::RouterError;

#[test]
fn test_root_path() {
    let pattern = RoutePattern::compile("/").unwrap();
    let params = pattern.match_path("/").unwrap();
    assert!(params.is_empty());
    assert!(pattern.match_path("/x").is_none());
}

#[test]
fn test_literal_pattern_has_no_params() {
    let pattern = RoutePattern::compile("/hello/world").unwrap();
    let params = pattern.match_path("/hello/world").unwrap();
    assert!(params.is_empty());
}

#[test]
fn test_pattern_is_anchored_at_both_ends() {
    let pattern = RoutePattern::compile("/hello").unwrap();
    assert!(pattern.match_path("/hello/world").is_none());
    assert!(pattern.match_path("/say/hello").is_none());
}

#[test]
fn test_top_level_alternation_is_anchored() {
    let pattern = RoutePattern::compile("/a|/b").unwrap();
    assert!(pattern.match_path("/a").is_some());
    assert!(pattern.match_path("/b").is_some());
    assert!(pattern.match_path("/a/trailing").is_none());
}

#[test]
fn test_wildcard_is_not_captured() {
    let params = match_pattern(r"/(\w+)/(\w+)/.*", "/blog/show/42")
        .unwrap()
        .unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params.get(0), Some("blog"));
    assert_eq!(params.get(1), Some("show"));
}

#[test]
fn test_nested_groups_split_at_next_group() {
    let pattern = RoutePattern::compile(r"/blog(/\d+(/\d+(/[a-z0-9_-]+)?)?)?").unwrap();

    let params = pattern.match_path("/blog/2024/10/my-post").unwrap();
    assert_eq!(params.get(0), Some("2024"));
    assert_eq!(params.get(1), Some("10"));
    assert_eq!(params.get(2), Some("my-post"));

    let params = pattern.match_path("/blog/2024").unwrap();
    assert_eq!(params.get(0), Some("2024"));
    assert!(!params.is_present(1));
    assert!(!params.is_present(2));
}

#[test]
fn test_non_participating_group_is_none() {
    let pattern = RoutePattern::compile("/(a)|/(b)").unwrap();
    let params = pattern.match_path("/b").unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params.as_slice()[0], None);
    assert_eq!(params.get(1), Some("b"));
}

#[test]
fn test_empty_match_is_distinct_from_absent() {
    let pattern = RoutePattern::compile("/item/([0-9]*)").unwrap();
    let params = pattern.match_path("/item/").unwrap();
    assert!(params.is_present(0));
    assert_eq!(params.get(0), Some(""));
}

#[test]
fn test_placeholder_segments_are_named() {
    let pattern = RoutePattern::compile("/users/{user_id}/posts/{id}").unwrap();
    assert_eq!(pattern.group_count(), 2);
    let params = pattern.match_path("/users/7/posts/abc").unwrap();
    assert_eq!(params.get_named("user_id"), Some("7"));
    assert_eq!(params.get_named("id"), Some("abc"));
    assert_eq!(params.get(0), Some("7"));
    assert!(pattern.match_path("/users/7/posts").is_none());
}

#[test]
fn test_regex_quantifier_braces_are_not_placeholders() {
    let pattern = RoutePattern::compile(r"/year/(\d{4})").unwrap();
    let params = pattern.match_path("/year/2024").unwrap();
    assert_eq!(params.get(0), Some("2024"));
    assert_eq!(params.get_named("4"), None);
    assert!(pattern.match_path("/year/24").is_none());
}

#[test]
fn test_named_regex_group() {
    let params = match_pattern(r"/tag/(?P<tag>[a-z]+)", "/tag/rust")
        .unwrap()
        .unwrap();
    assert_eq!(params.get_named("tag"), Some("rust"));
}

#[test]
fn test_malformed_pattern_is_rejected() {
    let err = RoutePattern::compile("/(unclosed").unwrap_err();
    assert!(matches!(err, RouterError::MalformedPattern { .. }));
}

#[test]
fn test_unbalanced_close_cannot_escape_anchors() {
    for pattern in ["/x)|(.*", "/a)(", "/users)|(?:.*"] {
        let err = RoutePattern::compile(pattern).unwrap_err();
        assert!(
            matches!(err, RouterError::MalformedPattern { .. }),
            "{pattern}"
        );
    }
    assert!(match_pattern("/x)|(.*", "/anything/at/all").is_err());
}

#[test]
fn test_normalize() {
    assert_eq!(normalize("", "/"), "/");
    assert_eq!(normalize("", ""), "/");
    assert_eq!(normalize("", "/users/"), "/users");
    assert_eq!(normalize("", "users"), "/users");
    assert_eq!(normalize("/v1", "/users"), "/v1/users");
    assert_eq!(normalize("/v1", "/"), "/v1");
    assert_eq!(normalize("/v1/admin", "settings/"), "/v1/admin/settings");
}
