use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::subtitle::domain::subtitle::{Subtitle, SubtitleTags, TaggedSubtitle};
use crate::subtitle::domain::subtitle_tagger::SubtitleTagger;
use crate::subtitle::domain::valence::valence;

/// Subtitle mode: tags each cue inside a closed time window and attaches
/// its valence. A failing tagger costs that cue its tags, nothing more.
pub struct TagSubtitlesUseCase {
    tagger: Box<dyn SubtitleTagger>,
    logger: Box<dyn PipelineLogger>,
    window: Option<(f64, f64)>,
}

impl TagSubtitlesUseCase {
    pub fn new(
        tagger: Box<dyn SubtitleTagger>,
        logger: Box<dyn PipelineLogger>,
        window: Option<(f64, f64)>,
    ) -> Self {
        Self {
            tagger,
            logger,
            window,
        }
    }

    pub fn execute(&mut self, subtitles: &[Subtitle]) -> Vec<TaggedSubtitle> {
        let selected: Vec<&Subtitle> = subtitles
            .iter()
            .filter(|s| self.window.map_or(true, |(start, end)| s.starts_within(start, end)))
            .collect();
        let total = selected.len();

        let tagged: Vec<TaggedSubtitle> = selected
            .into_iter()
            .enumerate()
            .map(|(i, subtitle)| {
                let tags = match self.tagger.tag(subtitle) {
                    Ok(tags) => {
                        self.logger.count("tagged");
                        tags
                    }
                    Err(e) => {
                        log::warn!("Cue {}: tagging failed: {e}", subtitle.id);
                        self.logger.count("untagged");
                        SubtitleTags::default()
                    }
                };
                self.logger.progress(i + 1, total);
                TaggedSubtitle {
                    id: subtitle.id,
                    start: subtitle.start,
                    end: subtitle.end,
                    text: subtitle.text.clone(),
                    valence: valence(&tags.emotions),
                    emotions: tags.emotions,
                    situation: tags.situation,
                    situation_type: tags.situation_type,
                }
            })
            .collect();

        self.logger.summary();
        tagged
    }
}
