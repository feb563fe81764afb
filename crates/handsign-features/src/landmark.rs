//! LandmarkExtractor: frames of hand/face landmarks to a (T × dim) sequence.
//!
//! Row layout: right hand (21 × xyz), left hand (21 × xyz), then optionally
//! face (70 × xyz) with x/y anchored on the first face point.

use handsign_core::config::defaults::{FACE_POINTS, HAND_POINTS};
use handsign_core::config::FeatureConfig;
use handsign_core::errors::InsufficientInput;
use handsign_core::models::{FeatureSequence, Frame, Point};
use handsign_core::traits::IFeatureExtractor;

use crate::hand;

/// Absolute values above this (95th percentile) mean pixel coordinates.
const PIXEL_P95_THRESHOLD: f32 = 10.0;
const PIXEL_SCALE: f32 = 1000.0;

/// Reference feature extractor over 21-point hands and an optional 70-point face.
#[derive(Debug, Clone)]
pub struct LandmarkExtractor {
    config: FeatureConfig,
}

impl LandmarkExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Encode one frame into `row`. Returns whether any hand was present.
    fn encode_frame(&self, frame: &Frame, row: &mut Vec<f32>) -> bool {
        let mut right = hand::pad_points(frame.hands.first().map(Vec::as_slice), HAND_POINTS);
        let mut left = hand::pad_points(frame.hands.get(1).map(Vec::as_slice), HAND_POINTS);
        if self.config.mirrored {
            std::mem::swap(&mut right, &mut left);
        }
        if self.config.hand_norm {
            hand::normalize(&mut right);
            hand::normalize(&mut left);
        }
        let present = hand::is_present(&right) || hand::is_present(&left);

        hand::flatten_into(&right, row);
        hand::flatten_into(&left, row);

        if self.config.use_face {
            let mut face: Vec<Point> = hand::pad_points(frame.face.as_deref(), FACE_POINTS);
            hand::anchor_to_first(&mut face);
            hand::flatten_into(&face, row);
        }
        present
    }
}

impl Default for LandmarkExtractor {
    fn default() -> Self {
        Self::new(FeatureConfig::default())
    }
}

impl IFeatureExtractor for LandmarkExtractor {
    fn extract(&self, frames: &[Frame]) -> Result<FeatureSequence, InsufficientInput> {
        let t = self.config.sequence_len;
        if frames.len() < t {
            return Err(InsufficientInput::TooFewFrames {
                received: frames.len(),
                required: t,
            });
        }

        let dim = self.feature_dim();
        let mut sequence = FeatureSequence::zeros(t, dim);
        let mut row = Vec::with_capacity(dim);
        let mut empty = 0usize;

        for (i, frame) in frames[frames.len() - t..].iter().enumerate() {
            row.clear();
            if !self.encode_frame(frame, &mut row) {
                empty += 1;
            }
            if let Some(slot) = sequence.row_mut(i) {
                for (dst, src) in slot.iter_mut().zip(row.iter()) {
                    *dst = *src;
                }
            }
        }

        let allowed = self.config.max_empty_frames();
        if empty > allowed {
            return Err(InsufficientInput::TooManyEmptyFrames { empty, allowed });
        }

        if !self.config.hand_norm {
            let p95 = percentile_abs(sequence.values(), 0.95);
            if p95 > PIXEL_P95_THRESHOLD {
                tracing::debug!(p95, "pixel-scale landmarks, rescaling");
                for v in sequence.values_mut() {
                    *v /= PIXEL_SCALE;
                }
            }
        }

        Ok(sequence)
    }

    fn feature_dim(&self) -> usize {
        self.config.feature_dim()
    }

    fn sequence_len(&self) -> usize {
        self.config.sequence_len
    }
}

/// Percentile of absolute values with linear interpolation between ranks.
fn percentile_abs(values: &[f32], q: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut abs: Vec<f32> = values.iter().map(|v| v.abs()).collect();
    abs.sort_by(f32::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (abs.len() - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f32;
    abs[lo] + (abs[hi] - abs[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates() {
        let values: Vec<f32> = (0..=100).map(|v| v as f32).collect();
        assert!((percentile_abs(&values, 0.95) - 95.0).abs() < 1e-4);
        assert!((percentile_abs(&[-4.0, 2.0], 0.5) - 3.0).abs() < 1e-6);
        assert_eq!(percentile_abs(&[], 0.95), 0.0);
    }
}
