use crate::subtitle::domain::subtitle::{Subtitle, SubtitleTags};

/// Subtitle emotion tagger collaborator (typically a language model).
///
/// Errors are per line: the caller substitutes default tags and moves on.
pub trait SubtitleTagger: Send {
    fn tag(&mut self, subtitle: &Subtitle) -> Result<SubtitleTags, Box<dyn std::error::Error>>;
}
