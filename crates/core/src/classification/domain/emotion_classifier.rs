use std::collections::HashMap;

use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Raw label → weight output of an external classifier.
///
/// Labels may be a subset or superset of the image label set and the
/// weights need not sum to one.
pub type ExternalScores = HashMap<String, f64>;

/// External probabilistic emotion classifier collaborator.
///
/// `Ok(None)` and `Err` both mean "no signal for this item"; callers fall
/// back to heuristics alone and never retry.
pub trait EmotionClassifier: Send {
    fn classify(
        &mut self,
        frame: &Frame,
        face: &Region,
    ) -> Result<Option<ExternalScores>, Box<dyn std::error::Error>>;
}
