pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn window<'a>(lines: &'a [&'a str], start: usize, end: usize) -> &'a [&'a str] {
    let end = end.min(lines.len());
    let start = start.min(end);
    &lines[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    Certifications,
}

impl SectionKind {
    const ALL: [SectionKind; 6] = [
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Certifications,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &[
                "summary",
                "professional summary",
                "objective",
                "profile",
                "about me",
            ],
            SectionKind::Skills => &[
                "skills",
                "technical skills",
                "professional skills",
                "core competencies",
                "technologies",
            ],
            SectionKind::Experience => &[
                "experience",
                "work experience",
                "professional experience",
                "relevant experience",
                "work history",
                "employment",
                "employment history",
            ],
            SectionKind::Education => &["education", "academic background"],
            SectionKind::Projects => &["projects", "personal projects"],
            SectionKind::Certifications => &["certifications", "certificates", "licenses"],
        }
    }

    pub fn classify(line: &str) -> Option<SectionKind> {
        let trimmed = line.trim();
        let has_colon = trimmed.ends_with(':');
        let normalized = trimmed.trim_end_matches(':').trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        if let Some(kind) = Self::ALL
            .into_iter()
            .find(|kind| kind.keywords().contains(&normalized.as_str()))
        {
            return Some(kind);
        }

        let word_count = normalized.split_whitespace().count();
        if word_count > 4 || normalized.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        if !(has_colon || is_all_caps(trimmed)) {
            return None;
        }

        Self::ALL.into_iter().find(|kind| {
            kind.keywords()
                .iter()
                .any(|keyword| normalized.ends_with(&format!(" {keyword}")))
        })
    }
}

pub fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_drops_blanks_and_keeps_order() {
        let lines = split_lines("  John Doe \n\n\t\nNew York, NY\r\n  john@x.io  ");
        assert_eq!(lines, vec!["John Doe", "New York, NY", "john@x.io"]);
    }

    #[test]
    fn window_clamps_to_available_lines() {
        let lines = vec!["a", "b", "c"];
        assert_eq!(window(&lines, 0, 5), &["a", "b", "c"]);
        assert_eq!(window(&lines, 5, 15), &[] as &[&str]);
        assert_eq!(window(&lines, 1, 2), &["b"]);
    }

    #[test]
    fn classify_recognizes_common_headings() {
        assert_eq!(
            SectionKind::classify("PROFESSIONAL EXPERIENCE"),
            Some(SectionKind::Experience)
        );
        assert_eq!(SectionKind::classify("Work Experience"), Some(SectionKind::Experience));
        assert_eq!(SectionKind::classify("Education:"), Some(SectionKind::Education));
        assert_eq!(SectionKind::classify("TECHNICAL SKILLS"), Some(SectionKind::Skills));
        assert_eq!(
            SectionKind::classify("CERTIFICATIONS"),
            Some(SectionKind::Certifications)
        );
    }

    #[test]
    fn classify_ignores_sentences_that_mention_keywords() {
        assert_eq!(SectionKind::classify("Led cross-team projects"), None);
        assert_eq!(SectionKind::classify("5 years of experience"), None);
        assert_eq!(SectionKind::classify("Senior Software Engineer"), None);
    }

    #[test]
    fn all_caps_requires_letters() {
        assert!(is_all_caps("JOHN DOE"));
        assert!(!is_all_caps("John Doe"));
        assert!(!is_all_caps("2019 - 2021"));
    }
}
