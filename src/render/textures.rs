//! Decal textures
//!
//! Image references are decoded once and kept as GPU textures keyed by the
//! reference string. Empty or undecodable references fall back to a
//! generated placeholder badge.

use image::{imageops::FilterType, Rgba, RgbaImage};
use macroquad::logging::warn;
use macroquad::prelude::{FilterMode, Texture2D};
use std::collections::{HashMap, HashSet};

use crate::ingest::{decode_data_url, IngestError};

/// Largest edge kept on the GPU
pub const MAX_TEXTURE_EDGE: u32 = 1024;

const PLACEHOLDER_SIZE: u32 = 128;

/// Decode a data URL into RGBA pixels, downscaled to fit `MAX_TEXTURE_EDGE`
pub fn decode_image_ref(image_ref: &str) -> Result<RgbaImage, IngestError> {
    let (_mime, bytes) = decode_data_url(image_ref)?;
    let img = image::load_from_memory(&bytes)?.to_rgba8();
    let (w, h) = img.dimensions();
    if w.max(h) <= MAX_TEXTURE_EDGE {
        return Ok(img);
    }
    let scale = MAX_TEXTURE_EDGE as f32 / w.max(h) as f32;
    let new_w = ((w as f32 * scale).round() as u32).max(1);
    let new_h = ((h as f32 * scale).round() as u32).max(1);
    Ok(image::imageops::resize(&img, new_w, new_h, FilterType::Triangle))
}

/// Round badge with a ring and a diamond, transparent outside
pub fn placeholder_image() -> RgbaImage {
    let size = PLACEHOLDER_SIZE;
    let c = (size as f32 - 1.0) * 0.5;
    let r = size as f32 * 0.5;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - c;
        let dy = y as f32 - c;
        let d = (dx * dx + dy * dy).sqrt();
        if d > r {
            Rgba([0, 0, 0, 0])
        } else if d > r * 0.86 {
            Rgba([30, 30, 36, 255])
        } else if dx.abs() + dy.abs() < r * 0.5 {
            Rgba([240, 240, 245, 255])
        } else {
            Rgba([64, 140, 220, 255])
        }
    })
}

fn upload(img: &RgbaImage) -> Option<Texture2D> {
    let w = u16::try_from(img.width()).ok()?;
    let h = u16::try_from(img.height()).ok()?;
    let texture = Texture2D::from_rgba8(w, h, img.as_raw());
    texture.set_filter(FilterMode::Linear);
    Some(texture)
}

/// GPU textures for image references
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture2D>,
    /// References that failed to decode; warned about once
    failed: HashSet<String>,
    placeholder: Option<Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(&mut self) -> Option<Texture2D> {
        if self.placeholder.is_none() {
            self.placeholder = upload(&placeholder_image());
        }
        self.placeholder.clone()
    }

    /// Texture for an image reference (placeholder when empty or broken)
    pub fn get(&mut self, image_ref: &str) -> Option<Texture2D> {
        if image_ref.is_empty() || self.failed.contains(image_ref) {
            return self.placeholder();
        }
        if let Some(texture) = self.textures.get(image_ref) {
            return Some(texture.clone());
        }
        match decode_image_ref(image_ref).map(|img| upload(&img)) {
            Ok(Some(texture)) => {
                self.textures.insert(image_ref.to_string(), texture.clone());
                Some(texture)
            }
            Ok(None) => {
                warn!("decal image too large to upload");
                self.failed.insert(image_ref.to_string());
                self.placeholder()
            }
            Err(e) => {
                warn!("decal image unusable, showing placeholder: {}", e);
                self.failed.insert(image_ref.to_string());
                self.placeholder()
            }
        }
    }

    /// Drop textures no slot references anymore
    pub fn retain_refs<'a>(&mut self, live: impl IntoIterator<Item = &'a str>) {
        let live: HashSet<&str> = live.into_iter().collect();
        self.textures.retain(|key, _| live.contains(key.as_str()));
        self.failed.retain(|key| live.contains(key.as_str()));
    }
}
