/// Domaine: labels de `[A-Za-z0-9-]` séparés par des points,
/// au moins un point, aucun label vide.
pub(crate) fn is_domain_valid(s: &str) -> bool {
    if !s.contains('.') {
        return false;
    }
    s.split('.').all(|label| {
        !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_domain_ok() {
        assert!(is_domain_valid("example.com"));
        assert!(is_domain_valid("mail-1.example.co.uk"));
    }

    #[test]
    fn dot_required() {
        assert!(!is_domain_valid("localhost"));
        assert!(!is_domain_valid(""));
    }

    #[test]
    fn empty_labels_rejected() {
        assert!(!is_domain_valid("example..com"));
        assert!(!is_domain_valid(".example.com"));
        assert!(!is_domain_valid("example.com."));
    }

    #[test]
    fn foreign_chars_rejected() {
        assert!(!is_domain_valid("exam_ple.com"));
        assert!(!is_domain_valid("exäm.ple"));
    }
}
