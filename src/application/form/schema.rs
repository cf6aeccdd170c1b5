//! Rules of the post form.

use crate::domain::posts::ImageSource;

use super::rules::{Check, Rule, RuleSet};
use super::snapshot::FieldValue;

pub const TITLE: &str = "title";
pub const AUTHOR: &str = "author";
pub const DESCRIPTION: &str = "description";
pub const IMAGE_SOURCE: &str = "imageSource";
pub const IMAGE_URL: &str = "imageUrl";
pub const IMAGE: &str = "image";

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 3 * 1024 * 1024;

const IMAGE_SOURCES: &[&str] = &["picsum", "upload"];
const MIN_WORDS: usize = 2;
const MIN_WORD_CHARS: usize = 3;

/// The image field that `source` makes authoritative. Both the visible input
/// group and the active validation branch derive from this mapping.
pub fn governed_field(source: ImageSource) -> &'static str {
    match source {
        ImageSource::Picsum => IMAGE_URL,
        ImageSource::Upload => IMAGE,
    }
}

/// At least two space-separated words of three or more characters.
pub fn has_two_long_words(value: Option<&FieldValue>) -> bool {
    let Some(FieldValue::Text(text)) = value else {
        return false;
    };
    text.split(' ')
        .filter(|word| word.chars().count() >= MIN_WORD_CHARS)
        .count()
        >= MIN_WORDS
}

/// Build the post form rules with the given upload ceiling.
pub fn post_rules(max_upload_bytes: u64) -> RuleSet {
    let picsum = ImageSource::Picsum.as_str();
    let upload = ImageSource::Upload.as_str();

    RuleSet::new(vec![
        Rule::new(TITLE, Check::Required, "Please enter title"),
        Rule::new(AUTHOR, Check::Required, "Please enter author"),
        Rule::new(
            AUTHOR,
            Check::Predicate(has_two_long_words),
            "Please enter at least two words",
        ),
        Rule::new(IMAGE_SOURCE, Check::Required, "Please select an image source"),
        Rule::new(
            IMAGE_SOURCE,
            Check::OneOf(IMAGE_SOURCES),
            "Invalid image source",
        ),
        Rule::new(
            governed_field(ImageSource::Picsum),
            Check::Required,
            "Please random a background image",
        )
        .when(IMAGE_SOURCE, picsum),
        Rule::new(
            governed_field(ImageSource::Picsum),
            Check::Url,
            "Please enter valid URL",
        )
        .when(IMAGE_SOURCE, picsum),
        Rule::new(
            governed_field(ImageSource::Upload),
            Check::FileSelected,
            "Please select an image to upload",
        )
        .when(IMAGE_SOURCE, upload),
        Rule::new(
            governed_field(ImageSource::Upload),
            Check::MaxFileSize(max_upload_bytes),
            format!("Max {}mb", max_upload_bytes / (1024 * 1024)),
        )
        .when(IMAGE_SOURCE, upload),
    ])
}
