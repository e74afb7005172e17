// Operation parameters

use armature_validation::Arguments;

pub const GET: &str = "get";
pub const SEARCH: &str = "search";
pub const UPDATE: &str = "update";
pub const DELETE: &str = "delete";
pub const BY_USERNAME: &str = "byUsername";

/// Argument names of the operations taking only a user id
pub const ID_ARGS: &[&str] = &["id"];
pub const SEARCH_ARGS: &[&str] = &["q", "limit"];
pub const BY_USERNAME_ARGS: &[&str] = &["username"];

/// Page size used when a search does not ask for one
pub const DEFAULT_LIMIT: i64 = 10;

/// Arguments of a user lookup by id
pub fn get(id: i64) -> Arguments<'static> {
    Arguments::new(GET).arg("id", id)
}

/// Arguments of a user search
pub fn search(q: &str, limit: Option<i64>) -> Arguments<'_> {
    Arguments::new(SEARCH)
        .arg("q", q)
        .arg("limit", limit.unwrap_or(DEFAULT_LIMIT))
}

/// Path arguments of a user update
pub fn update(id: i64) -> Arguments<'static> {
    Arguments::new(UPDATE).arg("id", id)
}

/// Arguments of a user deletion
pub fn delete(id: i64) -> Arguments<'static> {
    Arguments::new(DELETE).arg("id", id)
}

/// Arguments of a lookup by username
pub fn by_username(username: &str) -> Arguments<'_> {
    Arguments::new(BY_USERNAME).arg("username", username)
}
