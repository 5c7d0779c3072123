//! Domain-specific assertion macros for micrographia harnesses.
//!
//! These wrap `pretty_assertions` and add context about which part of the
//! rendered page was being inspected.

/// Assert the text content of the element with `id` in a view tree.
///
/// ```rust,ignore
/// assert_text!(tree, "gramStain", "Positive");
/// ```
#[macro_export]
macro_rules! assert_text {
    ($tree:expr, $id:expr, $expected:expr) => {{
        let tree: &micrographia_core::view::Element = &$tree;
        let id: &str = $id;
        match tree.find_by_id(id) {
            Some(el) => pretty_assertions::assert_eq!(
                el.text_content(),
                $expected,
                "text of #{} did not match",
                id
            ),
            None => panic!("assert_text! failed: no element with id {:?} in\n{}", id, tree.to_html()),
        }
    }};
}

/// Assert that no element with `id` is present (the panel is hidden).
#[macro_export]
macro_rules! assert_absent {
    ($tree:expr, $id:expr) => {{
        let tree: &micrographia_core::view::Element = &$tree;
        let id: &str = $id;
        if tree.find_by_id(id).is_some() {
            panic!("assert_absent! failed: #{} is present in\n{}", id, tree.to_html());
        }
    }};
}

/// Assert the banner message and whether it is minor.
#[macro_export]
macro_rules! assert_banner {
    ($controller:expr, $message:expr, minor) => {
        $crate::assert_banner!(@check $controller, $message, micrographia_core::Severity::Minor)
    };
    ($controller:expr, $message:expr, fatal) => {
        $crate::assert_banner!(@check $controller, $message, micrographia_core::Severity::Error)
    };
    (@check $controller:expr, $message:expr, $severity:expr) => {{
        let page = $controller.page();
        match &page.banner {
            Some(banner) => {
                pretty_assertions::assert_eq!(banner.message, $message);
                pretty_assertions::assert_eq!(banner.severity, $severity);
            }
            None => panic!("assert_banner! failed: no banner shown, expected {:?}", $message),
        }
    }};
}
