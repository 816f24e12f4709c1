//! Dispatch table from request paths to controller actions
//!
//! Routes are matched by suffix so that prefixed paths such as
//! `/usr/article/list` reach the same action. The first matching entry wins.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ArticleAdd,
    ArticleList,
    ArticleDetail,
    ArticleModify,
    ArticleDelete,
    Help,
    Exit,
}

/// Ordered (suffix, action) pairs; longer suffixes precede their aliases
pub const ROUTES: &[(&str, Action)] = &[
    ("article/add", Action::ArticleAdd),
    ("article/doAdd", Action::ArticleAdd),
    ("article/list", Action::ArticleList),
    ("article/detail", Action::ArticleDetail),
    ("article/modify", Action::ArticleModify),
    ("article/delete", Action::ArticleDelete),
    ("system/help", Action::Help),
    ("system/exit", Action::Exit),
    ("help", Action::Help),
    ("exit", Action::Exit),
];

/// Find the action for a path; `article add` is read as `article/add`
pub fn resolve(path: &str) -> Option<Action> {
    let normalized = path.split_whitespace().collect::<Vec<_>>().join("/");
    if normalized.is_empty() {
        return None;
    }

    ROUTES
        .iter()
        .find(|(suffix, _)| ends_with_segment(&normalized, suffix))
        .map(|(_, action)| *action)
}

// `xarticle/list` must not match `article/list`
fn ends_with_segment(path: &str, suffix: &str) -> bool {
    match path.strip_suffix(suffix) {
        Some(rest) => rest.is_empty() || rest.ends_with('/'),
        None => false,
    }
}
