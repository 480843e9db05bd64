//! Named routes of the cheese catalogue.
//!
//! The axum router is built from the `*_PATH` patterns below, and `Route`
//! reverses and resolves URLs against the same patterns so handlers,
//! templates and tests never spell a path out by hand.

use crate::validation::slug::validate_slug;

pub const LIST_PATH: &str = "/cheeses/";
pub const ADD_PATH: &str = "/cheeses/add/";
pub const DETAIL_PATH: &str = "/cheeses/{slug}/";
pub const UPDATE_PATH: &str = "/cheeses/{slug}/update/";

const SLUG_PARAM: &str = "{slug}";

/// Login page served by the hosting site.
pub const LOGIN_URL: &str = "/accounts/login/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    Add,
    Detail { slug: String },
    Update { slug: String },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::List => "cheeses:list",
            Route::Add => "cheeses:add",
            Route::Detail { .. } => "cheeses:detail",
            Route::Update { .. } => "cheeses:update",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Route::List => LIST_PATH,
            Route::Add => ADD_PATH,
            Route::Detail { .. } => DETAIL_PATH,
            Route::Update { .. } => UPDATE_PATH,
        }
    }

    pub fn reverse(&self) -> String {
        match self {
            Route::Detail { slug } | Route::Update { slug } => {
                self.pattern().replace(SLUG_PARAM, slug)
            }
            Route::List | Route::Add => self.pattern().to_string(),
        }
    }

    /// Match a request path against the cheese routes. Static patterns are
    /// tried first, so `/cheeses/add/` is never a detail lookup.
    pub fn resolve(path: &str) -> Option<Route> {
        if path == LIST_PATH {
            return Some(Route::List);
        }
        if path == ADD_PATH {
            return Some(Route::Add);
        }
        if let Some(slug) = match_slug_pattern(DETAIL_PATH, path) {
            return Some(Route::Detail { slug });
        }
        match_slug_pattern(UPDATE_PATH, path).map(|slug| Route::Update { slug })
    }
}

/// Capture the `{slug}` segment of `pattern` from `path`.
fn match_slug_pattern(pattern: &str, path: &str) -> Option<String> {
    let (prefix, suffix) = pattern.split_once(SLUG_PARAM)?;
    let slug = path.strip_prefix(prefix)?.strip_suffix(suffix)?;
    validate_slug(slug).ok()?;
    Some(slug.to_string())
}

pub fn login_url(next: &str) -> String {
    format!("{LOGIN_URL}?next={}", urlencoding::encode(next))
}
