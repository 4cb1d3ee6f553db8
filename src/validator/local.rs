/// Partie locale: un ou plusieurs caractères de `[A-Za-z0-9_.+-]`.
pub(crate) fn is_local_valid(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'))
}
