//! The built-in syllabus used until the user uploads their own.
//!
//! Mirrors a generalized CBSE Sanskrit curriculum: unseen passage, creative
//! writing, applied grammar, and seen comprehension.

use super::models::{Section, Topic};

pub fn default_sections() -> Vec<Section> {
    vec![
        Section {
            id: "A".to_string(),
            native_title: "अपठित-अवबोधनम्".to_string(),
            title: "Unseen Passage".to_string(),
            description: "Practice with unseen passages to improve comprehension skills."
                .to_string(),
            topics: vec![Topic::new("General Unseen Passage")],
        },
        Section {
            id: "B".to_string(),
            native_title: "रचनात्मकं-कार्यम्".to_string(),
            title: "Creative Writing".to_string(),
            description:
                "Master formal letters, picture-based descriptions, and paragraph writing."
                    .to_string(),
            topics: vec![
                Topic::new("पत्रलेखनम् (Letter Writing)"),
                Topic::new("चित्र-वर्णनम् (Picture Description)"),
                Topic::new("अनुच्छेद-लेखनम् (Paragraph Writing)"),
            ],
        },
        Section {
            id: "C".to_string(),
            native_title: "अनुप्रयुक्त-व्याकरणम्".to_string(),
            title: "Applied Grammar".to_string(),
            description:
                "Targeted practice for all grammar topics as per the CBSE syllabus, with detailed sub-topics."
                    .to_string(),
            topics: vec![
                Topic::with_sub_topics(
                    "सन्धिः (Sandhi)",
                    &[
                        "स्वर-सन्धिः (Vowel Sandhi)",
                        "व्यञ्जन-सन्धिः (Consonant Sandhi)",
                        "विसर्ग-सन्धिः (Visarga Sandhi)",
                    ],
                ),
                Topic::with_sub_topics(
                    "समासः (Samas)",
                    &[
                        "अव्ययीभावः (Avyayibhava)",
                        "तत्पुरुषः (Tatpurusha)",
                        "कर्मधारयः (Karmadharaya)",
                        "द्विगुः (Dvigu)",
                        "द्वन्द्वः (Dvandva)",
                        "बहुव्रीहिः (Bahuvrihi)",
                    ],
                ),
                Topic::with_sub_topics(
                    "प्रत्ययाः (Pratyaya - Suffixes)",
                    &[
                        "कृत्-प्रत्ययाः (Krit Pratyaya)",
                        "तद्धित-प्रत्ययाः (Taddhita Pratyaya)",
                        "स्त्री-प्रत्ययाः (Stri Pratyaya)",
                    ],
                ),
                Topic::new("वाच्य-परिवर्तनम् (Voice Change)"),
                Topic::new("समयः (Time)"),
                Topic::new("अव्ययपदानि (Indeclinables)"),
                Topic::new("अशुद्धि-संशोधनम् (Error Correction)"),
            ],
        },
        Section {
            id: "D".to_string(),
            native_title: "पठित-अवबोधनम्".to_string(),
            title: "Seen Comprehension".to_string(),
            description: "Practice questions from the Shemushi textbook lessons.".to_string(),
            topics: vec![
                Topic::new("प्रथमः पाठः (Lesson 1)"),
                Topic::new("द्वितीयः पाठः (Lesson 2)"),
                Topic::new("तृतीयः पाठः (Lesson 3)"),
                Topic::new("चतुर्थः पाठः (Lesson 4)"),
                Topic::new("पञ्चमः पाठः (Lesson 5)"),
                Topic::new("षष्ठः पाठः (Lesson 6)"),
                Topic::new("सप्तमः पाठः (Lesson 7)"),
                Topic::new("अष्टमः पाठः (Lesson 8)"),
                Topic::new("नवमः पाठः (Lesson 9)"),
                Topic::new("दशमः पाठः (Lesson 10)"),
                Topic::new("एकादशः पाठः (Lesson 11)"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllabus::models::all_topic_names;

    #[test]
    fn test_default_topic_names_are_unique() {
        let names = all_topic_names(&default_sections());
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }
}
