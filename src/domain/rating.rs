// Star rating widget model used on public feedback forms
use serde::Serialize;

pub const DEFAULT_MAX_STARS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StarState {
    Filled,
    Empty,
}

impl StarState {
    pub fn icon_classes(&self) -> &'static str {
        match self {
            StarState::Filled => "bi-star-fill text-warning",
            StarState::Empty => "bi-star",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    max: u8,
    value: u8,
}

impl Default for StarRating {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STARS)
    }
}

impl StarRating {
    pub fn new(max: u8) -> Self {
        Self { max, value: 0 }
    }

    /// Restore from the form's hidden input; blank or garbage means no stars.
    pub fn from_input(max: u8, raw: &str) -> Self {
        let mut rating = Self::new(max);
        rating.set(raw.trim().parse().unwrap_or(0));
        rating
    }

    pub fn set(&mut self, value: i64) {
        self.value = value.clamp(0, self.max as i64) as u8;
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Value written back to the hidden input.
    pub fn input_value(&self) -> String {
        self.value.to_string()
    }

    pub fn stars(&self) -> Vec<StarState> {
        (0..self.max)
            .map(|idx| {
                if idx < self.value {
                    StarState::Filled
                } else {
                    StarState::Empty
                }
            })
            .collect()
    }
}
