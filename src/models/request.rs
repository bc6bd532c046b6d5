use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Seed value asking the server to pick a random seed.
pub const RANDOM_SEED: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarSex {
    #[default]
    Unspecified,
    Male,
    Female,
}

impl AvatarSex {
    /// Wire value, or `None` when the field must be left out of the request.
    pub fn as_form_value(&self) -> Option<&'static str> {
        match self {
            AvatarSex::Unspecified => None,
            AvatarSex::Male => Some("male"),
            AvatarSex::Female => Some("female"),
        }
    }
}

/// Only the exact strings `male` and `female` select a sex.
impl From<&str> for AvatarSex {
    fn from(value: &str) -> Self {
        match value {
            "male" => AvatarSex::Male,
            "female" => AvatarSex::Female,
            _ => AvatarSex::Unspecified,
        }
    }
}

impl From<Option<&str>> for AvatarSex {
    fn from(value: Option<&str>) -> Self {
        value.map(AvatarSex::from).unwrap_or_default()
    }
}

/// Inputs of a single try-on generation. Every field is optional.
#[derive(Debug, Clone)]
pub struct TryOnRequest {
    pub clothing_image: Option<DynamicImage>,
    pub clothing_prompt: Option<String>,
    pub avatar_image: Option<DynamicImage>,
    pub avatar_prompt: Option<String>,
    pub avatar_sex: AvatarSex,
    pub background_image: Option<DynamicImage>,
    pub background_prompt: Option<String>,
    pub seed: i64,
    /// Keep the 200 body as raw bytes instead of decoding it as an image.
    pub raw_response: bool,
}

impl Default for TryOnRequest {
    fn default() -> Self {
        TryOnRequest {
            clothing_image: None,
            clothing_prompt: None,
            avatar_image: None,
            avatar_prompt: None,
            avatar_sex: AvatarSex::Unspecified,
            background_image: None,
            background_prompt: None,
            seed: RANDOM_SEED,
            raw_response: false,
        }
    }
}

impl TryOnRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clothing_image(mut self, image: DynamicImage) -> Self {
        self.clothing_image = Some(image);
        self
    }

    pub fn clothing_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.clothing_prompt = Some(prompt.into());
        self
    }

    pub fn avatar_image(mut self, image: DynamicImage) -> Self {
        self.avatar_image = Some(image);
        self
    }

    pub fn avatar_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.avatar_prompt = Some(prompt.into());
        self
    }

    pub fn avatar_sex(mut self, sex: impl Into<AvatarSex>) -> Self {
        self.avatar_sex = sex.into();
        self
    }

    pub fn background_image(mut self, image: DynamicImage) -> Self {
        self.background_image = Some(image);
        self
    }

    pub fn background_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.background_prompt = Some(prompt.into());
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn raw_response(mut self, raw: bool) -> Self {
        self.raw_response = raw;
        self
    }
}
