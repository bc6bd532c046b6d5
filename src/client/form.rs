use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use reqwest::multipart::{Form, Part};

use crate::{error::Result, models::TryOnRequest};

pub const JPEG_QUALITY: u8 = 99;
pub const UPLOAD_FILE_NAME: &str = "image.jpg";
pub const UPLOAD_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Jpeg(Vec<u8>),
}

/// Ordered list of the form fields that are present in a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    fields: Vec<(&'static str, FieldValue)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, FieldValue::Text(value.into())));
        self
    }

    pub fn optional_text(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn optional_image(
        mut self,
        name: &'static str,
        image: Option<&DynamicImage>,
    ) -> Result<Self> {
        if let Some(image) = image {
            self.fields.push((name, FieldValue::Jpeg(encode_jpeg(image)?)));
        }
        Ok(self)
    }

    /// Builds the field list for a try-on request, in wire order.
    pub fn from_request(request: &TryOnRequest) -> Result<Self> {
        Ok(Self::new()
            .text("seed", request.seed.to_string())
            .optional_image("clothing_image", request.clothing_image.as_ref())?
            .optional_text("clothing_prompt", request.clothing_prompt.as_deref())
            .optional_image("avatar_image", request.avatar_image.as_ref())?
            .optional_text("avatar_prompt", request.avatar_prompt.as_deref())
            .optional_text("avatar_sex", request.avatar_sex.as_form_value())
            .optional_image("background_image", request.background_image.as_ref())?
            .optional_text("background_prompt", request.background_prompt.as_deref()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();

        for (name, value) in self.fields {
            form = match value {
                FieldValue::Text(text) => form.text(name, text),
                FieldValue::Jpeg(bytes) => form.part(
                    name,
                    Part::bytes(bytes)
                        .file_name(UPLOAD_FILE_NAME)
                        .mime_str(UPLOAD_MIME)?,
                ),
            };
        }

        Ok(form)
    }
}

/// Encodes an image as a quality-99 JPEG. Alpha is dropped.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY).encode_image(&rgb)?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AvatarSex;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(8, 8, |x, y| {
            Rgb([(x * 30) as u8, (y * 30) as u8, 128])
        }))
    }

    #[test]
    fn seed_only_request_has_a_single_field() {
        let fields = FormFields::from_request(&TryOnRequest::new()).unwrap();
        assert_eq!(fields.names(), vec!["seed"]);
        assert_eq!(fields.get("seed"), Some(&FieldValue::Text("-1".into())));
    }

    #[test]
    fn present_fields_keep_wire_order() {
        let request = TryOnRequest::new()
            .background_prompt("in an autumn park")
            .avatar_sex("female")
            .avatar_prompt("a woman with dark hair")
            .clothing_image(sample_image())
            .clothing_prompt("a floral pattern blouse")
            .seed(7);

        let fields = FormFields::from_request(&request).unwrap();
        assert_eq!(
            fields.names(),
            vec![
                "seed",
                "clothing_image",
                "clothing_prompt",
                "avatar_prompt",
                "avatar_sex",
                "background_prompt"
            ]
        );
        assert_eq!(fields.get("seed"), Some(&FieldValue::Text("7".into())));
        assert_eq!(
            fields.get("avatar_sex"),
            Some(&FieldValue::Text("female".into()))
        );
    }

    #[test]
    fn invalid_avatar_sex_is_omitted() {
        for value in ["", "other", "Male"] {
            let request = TryOnRequest::new().avatar_sex(value);
            let fields = FormFields::from_request(&request).unwrap();
            assert!(fields.get("avatar_sex").is_none(), "{value:?}");
        }

        let request = TryOnRequest::new().avatar_sex(AvatarSex::Unspecified);
        assert_eq!(FormFields::from_request(&request).unwrap().len(), 1);
    }

    #[test]
    fn empty_prompt_is_sent_when_present() {
        let request = TryOnRequest::new().clothing_prompt("");
        let fields = FormFields::from_request(&request).unwrap();
        assert_eq!(
            fields.get("clothing_prompt"),
            Some(&FieldValue::Text(String::new()))
        );
    }

    #[test]
    fn images_are_encoded_as_jpeg() {
        let request = TryOnRequest::new().avatar_image(sample_image());
        let fields = FormFields::from_request(&request).unwrap();

        let Some(FieldValue::Jpeg(bytes)) = fields.get("avatar_image") else {
            panic!("avatar_image missing");
        };
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
        assert_eq!(
            image::guess_format(bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn alpha_images_can_be_encoded() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 40])));
        let bytes = encode_jpeg(&rgba).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn multipart_form_carries_boundary() {
        let form = FormFields::from_request(&TryOnRequest::new())
            .unwrap()
            .into_multipart()
            .unwrap();
        assert!(!form.boundary().is_empty());
    }
}
