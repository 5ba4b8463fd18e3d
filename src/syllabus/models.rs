use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named unit of syllabus content, optionally with sub-topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_topics: Vec<String>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_topics: Vec::new(),
        }
    }

    pub fn with_sub_topics(name: impl Into<String>, sub_topics: &[&str]) -> Self {
        Self {
            name: name.into(),
            sub_topics: sub_topics.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One syllabus section: a titled group of topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    /// Title in the language being studied (e.g. the Sanskrit heading).
    pub native_title: String,
    pub description: String,
    pub topics: Vec<Topic>,
}

impl Section {
    /// Flatten this section's topic tree into the plain names used for
    /// completion tracking. Duplicate names collapse in the completed set,
    /// so a well-formed syllabus keeps them unique.
    pub fn topic_names(&self) -> Vec<String> {
        self.topics
            .iter()
            .flat_map(|t| {
                std::iter::once(t.name.clone()).chain(t.sub_topics.iter().cloned())
            })
            .collect()
    }
}

/// Flattened topic names across a whole syllabus.
pub fn all_topic_names(sections: &[Section]) -> Vec<String> {
    sections.iter().flat_map(|s| s.topic_names()).collect()
}

/// A file uploaded as study material for a topic. Immutable once created;
/// content is raw text, or base64 for binary uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyFile {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub content: String,
}

impl StudyFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_names_flatten_sub_topics() {
        let section = Section {
            id: "C".to_string(),
            title: "Applied Grammar".to_string(),
            native_title: "अनुप्रयुक्त-व्याकरणम्".to_string(),
            description: String::new(),
            topics: vec![
                Topic::with_sub_topics("Sandhi", &["Vowel Sandhi", "Visarga Sandhi"]),
                Topic::new("Time"),
            ],
        };

        assert_eq!(
            section.topic_names(),
            vec!["Sandhi", "Vowel Sandhi", "Visarga Sandhi", "Time"]
        );
    }
}
