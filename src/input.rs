//! Pose prediction smoothing
//!
//! The pose classifier reports a probability per class several times a
//! second and flickers between classes near a boundary. The stabilizer only
//! reports a label once it has been the confident winner for most of the
//! recent frames.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One class score from the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub class_name: String,
    pub probability: f32,
}

impl Prediction {
    pub fn new(class_name: impl Into<String>, probability: f32) -> Self {
        Self {
            class_name: class_name.into(),
            probability,
        }
    }
}

/// Majority vote over the last few confident predictions
#[derive(Debug, Clone)]
pub struct PredictionStabilizer {
    /// Minimum top-class probability for a frame to vote
    threshold: f32,
    smoothing_frames: usize,
    /// Winning label per frame, None for low-confidence frames
    history: VecDeque<Option<String>>,
}

impl Default for PredictionStabilizer {
    fn default() -> Self {
        Self::new(0.85, 5)
    }
}

impl PredictionStabilizer {
    pub fn new(threshold: f32, smoothing_frames: usize) -> Self {
        let smoothing_frames = smoothing_frames.max(1);
        Self {
            threshold,
            smoothing_frames,
            history: VecDeque::with_capacity(smoothing_frames),
        }
    }

    /// Feed one classifier frame, returning the stable label if there is one
    pub fn stabilize(&mut self, predictions: &[Prediction]) -> Option<&str> {
        let top = predictions
            .iter()
            .filter(|p| p.probability.is_finite())
            .max_by(|a, b| a.probability.total_cmp(&b.probability));

        let vote = top
            .filter(|p| p.probability >= self.threshold)
            .map(|p| p.class_name.clone());

        if self.history.len() == self.smoothing_frames {
            self.history.pop_front();
        }
        self.history.push_back(vote);

        self.majority()
    }

    /// Label holding a strict majority of the window
    fn majority(&self) -> Option<&str> {
        let needed = self.smoothing_frames / 2 + 1;
        self.history
            .iter()
            .flatten()
            .find(|label| {
                self.history
                    .iter()
                    .filter(|l| l.as_deref() == Some(label.as_str()))
                    .count()
                    >= needed
            })
            .map(String::as_str)
    }

    /// Forget all history (e.g. on restart)
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(left: f32, center: f32, right: f32) -> Vec<Prediction> {
        vec![
            Prediction::new("Left", left),
            Prediction::new("Center", center),
            Prediction::new("Right", right),
        ]
    }

    #[test]
    fn test_needs_majority_of_window() {
        let mut stabilizer = PredictionStabilizer::new(0.85, 5);

        assert_eq!(stabilizer.stabilize(&frame(0.9, 0.05, 0.05)), None);
        assert_eq!(stabilizer.stabilize(&frame(0.9, 0.05, 0.05)), None);
        assert_eq!(stabilizer.stabilize(&frame(0.9, 0.05, 0.05)), Some("Left"));
    }

    #[test]
    fn test_low_confidence_frames_do_not_vote() {
        let mut stabilizer = PredictionStabilizer::new(0.85, 3);

        assert_eq!(stabilizer.stabilize(&frame(0.6, 0.3, 0.1)), None);
        assert_eq!(stabilizer.stabilize(&frame(0.7, 0.2, 0.1)), None);
        assert_eq!(stabilizer.stabilize(&frame(0.0, 0.0, 0.95)), None);
        assert_eq!(stabilizer.stabilize(&frame(0.0, 0.0, 0.95)), Some("Right"));
    }

    #[test]
    fn test_switches_after_window_turns_over() {
        let mut stabilizer = PredictionStabilizer::new(0.85, 3);
        for _ in 0..3 {
            stabilizer.stabilize(&frame(0.95, 0.0, 0.0));
        }
        assert_eq!(stabilizer.stabilize(&frame(0.0, 0.95, 0.0)), Some("Left"));
        assert_eq!(stabilizer.stabilize(&frame(0.0, 0.95, 0.0)), Some("Center"));
    }

    #[test]
    fn test_reset_and_empty_input() {
        let mut stabilizer = PredictionStabilizer::new(0.5, 1);
        assert_eq!(stabilizer.stabilize(&frame(0.0, 1.0, 0.0)), Some("Center"));
        stabilizer.reset();
        assert_eq!(stabilizer.stabilize(&[]), None);
    }
}
