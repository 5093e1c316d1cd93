use crate::ConversionResult;

/// Assemble the markdown notice: heading, description, then the mention line.
///
/// Title and description are checked trimmed but emitted as given. Each
/// present section except the mention line is followed by a blank line.
pub fn build_notice(title: &str, description: &str, results: &[ConversionResult]) -> String {
    let mut notice = String::new();

    if !title.trim().is_empty() {
        notice.push('#');
        notice.push_str(title);
        notice.push_str("\n\n");
    }

    if !description.trim().is_empty() {
        notice.push_str(description);
        notice.push_str("\n\n");
    }

    if !results.is_empty() {
        notice.push('>');
        notice.push_str(&mention_line(results));
    }

    notice
}

/// Space-joined `@id` mentions.
pub fn mention_line(results: &[ConversionResult]) -> String {
    results
        .iter()
        .map(|r| r.at_id_space.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(id: &str) -> ConversionResult {
        ConversionResult {
            id: id.to_string(),
            at_id: format!("@{}", id),
            at_id_space: format!("@{}", id),
            email: format!("{}@kakaocorp.com", id),
        }
    }

    #[test]
    fn test_full_notice() {
        let results = vec![mention("x"), mention("y")];
        assert_eq!(build_notice("T", "D", &results), "#T\n\nD\n\n>@x @y");
    }

    #[test]
    fn test_empty_notice() {
        assert_eq!(build_notice("", "", &[]), "");
        assert_eq!(build_notice("  ", "\n", &[]), "");
    }

    #[test]
    fn test_sections_are_optional() {
        let results = vec![mention("x")];
        assert_eq!(build_notice("", "D", &results), "D\n\n>@x");
        assert_eq!(build_notice("T", "", &results), "#T\n\n>@x");
        assert_eq!(build_notice("T", "", &[]), "#T\n\n");
        assert_eq!(build_notice("", "", &results), ">@x");
    }

    #[test]
    fn test_title_emitted_untrimmed() {
        assert_eq!(build_notice(" Release ", "", &[]), "# Release \n\n");
    }
}
