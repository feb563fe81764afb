use serde::{Deserialize, Deserializer, Serialize};

/// One landmark point. Missing or null coordinates read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub x: f32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub y: f32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Landmarks observed in one camera frame.
///
/// `hands` holds up to two hands of 21 points each: slot 0 is the right hand,
/// slot 1 the left. `face` holds up to 70 points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default, deserialize_with = "null_hands")]
    pub hands: Vec<Vec<Point>>,
    #[serde(default)]
    pub face: Option<Vec<Point>>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(0.0))
}

type RawHand = Option<Vec<Option<Point>>>;

/// A null hand list reads as no hands, a null slot as an absent hand and a
/// null point as the origin.
fn null_hands<'de, D>(deserializer: D) -> Result<Vec<Vec<Point>>, D::Error>
where
    D: Deserializer<'de>,
{
    let slots = Option::<Vec<RawHand>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(slots
        .into_iter()
        .map(|hand| {
            hand.unwrap_or_default()
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect()
        })
        .collect())
}

/// Fixed-shape feature matrix (`frames` rows of `dim` values), row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSequence {
    frames: usize,
    dim: usize,
    values: Vec<f32>,
}

impl FeatureSequence {
    /// Build from equally sized rows. Returns `None` when rows differ in width.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Option<Self> {
        let dim = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != dim) {
            return None;
        }
        let frames = rows.len();
        Some(Self {
            frames,
            dim,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// All-zero sequence of the given shape.
    pub fn zeros(frames: usize, dim: usize) -> Self {
        Self {
            frames,
            dim,
            values: vec![0.0; frames * dim],
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.frames {
            return None;
        }
        Some(&self.values[i * self.dim..(i + 1) * self.dim])
    }

    pub fn row_mut(&mut self, i: usize) -> Option<&mut [f32]> {
        if i >= self.frames {
            return None;
        }
        Some(&mut self.values[i * self.dim..(i + 1) * self.dim])
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }
}
