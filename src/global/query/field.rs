/// 허용 필드 목록에서 요청 키에 해당하는 필드를 찾습니다.
///
/// 허용 필드는 `name` 같은 단순 이름이거나 `students.name` 같은 테이블 한정 이름입니다.
/// 요청 키는 항목 전체 또는 (점이 있는 경우) 첫 번째 점 이후 부분과 비교하며,
/// 목록 순서상 가장 먼저 일치하는 항목을 반환합니다.
pub fn resolve_field<'a>(permitted: &[&'a str], key: &str) -> Option<&'a str> {
    permitted.iter().copied().find(|field| {
        *field == key
            || field
                .split_once('.')
                .is_some_and(|(_, column)| column == key)
    })
}

/// `table.column` 형태를 (테이블, 컬럼)으로 분리
pub fn split_qualified(field: &str) -> (Option<&str>, &str) {
    match field.split_once('.') {
        Some((table, column)) => (Some(table), column),
        None => (None, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDENT_FIELDS: [&str; 4] = ["name", "email", "cpf", "ra"];

    #[test]
    fn should_resolve_plain_field() {
        assert_eq!(resolve_field(&STUDENT_FIELDS, "email"), Some("email"));
    }

    #[test]
    fn should_resolve_qualified_field_by_column_name() {
        let fields = ["students.name", "students.email"];

        assert_eq!(resolve_field(&fields, "email"), Some("students.email"));
    }

    #[test]
    fn should_resolve_qualified_field_by_full_name() {
        let fields = ["students.name"];

        assert_eq!(resolve_field(&fields, "students.name"), Some("students.name"));
    }

    #[test]
    fn should_return_first_match_in_permitted_order() {
        let fields = ["teams.name", "students.name"];

        assert_eq!(resolve_field(&fields, "name"), Some("teams.name"));
    }

    #[test]
    fn should_ignore_unknown_key() {
        assert_eq!(resolve_field(&STUDENT_FIELDS, "password"), None);
        assert_eq!(resolve_field(&STUDENT_FIELDS, ""), None);
    }

    #[test]
    fn should_not_match_table_prefix() {
        let fields = ["students.name"];

        assert_eq!(resolve_field(&fields, "students"), None);
    }

    #[test]
    fn should_split_only_on_first_dot() {
        assert_eq!(split_qualified("students.name"), (Some("students"), "name"));
        assert_eq!(split_qualified("name"), (None, "name"));
        assert_eq!(split_qualified("a.b.c"), (Some("a"), "b.c"));
    }
}
