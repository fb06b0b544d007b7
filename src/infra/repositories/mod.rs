pub mod sqlite_shop_repo;
pub mod sqlite_user_repo;
pub mod sqlite_report_repo;
pub mod sqlite_reference_repo;

pub mod postgres_shop_repo;
pub mod postgres_user_repo;
pub mod postgres_report_repo;
pub mod postgres_reference_repo;

/// Escapes `LIKE` wildcards so a search term matches literally under `ESCAPE '\'`.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("P0301"), "P0301");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
