//! Background texture loading.
//!
//! Every texture is fetched and decoded off the render loop: on native each
//! asset gets its own thread, in the browser a `fetch` future. Decoded
//! results come back over a channel that the engine drains once per frame.
//! A failed asset is logged and dropped, so the mesh that needed it is
//! simply never drawn.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::carousel::PANEL_COUNT;
use crate::error::OrreryError;
use crate::options::AssetOptions;

/// Which part of the scene an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    /// Color map of planet `i`.
    Planet(usize),
    /// Star map on the background sphere.
    Background,
    /// HDR environment map, reduced to an ambient tint.
    Environment,
}

impl AssetSlot {
    /// Every slot, in load order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..PANEL_COUNT)
            .map(Self::Planet)
            .chain([Self::Background, Self::Environment])
    }

    /// Source for this slot, if one is configured.
    #[must_use]
    pub fn source(self, options: &AssetOptions) -> Option<&str> {
        match self {
            Self::Planet(i) => {
                options.planet_textures.get(i).map(String::as_str)
            }
            Self::Background => Some(options.background.as_str()),
            Self::Environment => options.environment.as_deref(),
        }
        .filter(|s| !s.is_empty())
    }

    /// Short label for logs and GPU resource names.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Planet(i) => format!("planet {i}"),
            Self::Background => "background".to_owned(),
            Self::Environment => "environment".to_owned(),
        }
    }
}

/// Tightly packed 8-bit RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA bytes, `4 * width * height` long.
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Shrink the image so neither side exceeds `max_dimension`, keeping its
    /// aspect ratio. Returns `None` for empty images or a pixel buffer that
    /// does not match the stated size.
    #[must_use]
    pub fn fit_within(self, max_dimension: u32) -> Option<Self> {
        let expected =
            4 * u64::from(self.width) * u64::from(self.height);
        if self.rgba.len() as u64 != expected {
            return None;
        }
        let (width, height) =
            fit_to_limit(self.width, self.height, max_dimension)?;
        if (width, height) == (self.width, self.height) {
            return Some(self);
        }
        let source =
            image::RgbaImage::from_raw(self.width, self.height, self.rgba)?;
        let resized = image::imageops::resize(
            &source,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        Some(Self {
            width,
            height,
            rgba: resized.into_raw(),
        })
    }
}

/// Largest size with the same aspect ratio whose sides fit in
/// `max_dimension`. `None` if any input is zero.
#[must_use]
pub fn fit_to_limit(
    width: u32,
    height: u32,
    max_dimension: u32,
) -> Option<(u32, u32)> {
    if width == 0 || height == 0 || max_dimension == 0 {
        return None;
    }
    let longest = width.max(height);
    if longest <= max_dimension {
        return Some((width, height));
    }
    let scale = |side: u32| {
        let scaled = (u64::from(side) * u64::from(max_dimension)
            + u64::from(longest) / 2)
            / u64::from(longest);
        u32::try_from(scaled).map_or(max_dimension, |s| s.clamp(1, max_dimension))
    };
    Some((scale(width), scale(height)))
}

/// What a slot decodes to.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetPayload {
    /// sRGB color map.
    Color(DecodedImage),
    /// Linear ambient light color.
    Ambient([f32; 3]),
}

/// A decoded asset ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAsset {
    /// Where it goes.
    pub slot: AssetSlot,
    /// The decoded content.
    pub payload: AssetPayload,
}

/// Decode raw bytes for a slot. The format is detected from the content.
///
/// # Errors
///
/// Returns [`OrreryError::AssetDecode`] if the bytes are not a supported
/// image.
pub fn decode(slot: AssetSlot, bytes: &[u8]) -> Result<AssetPayload, OrreryError> {
    let image = image::load_from_memory(bytes)?;
    Ok(match slot {
        AssetSlot::Environment => {
            AssetPayload::Ambient(average_radiance(&image.to_rgb32f()))
        }
        AssetSlot::Planet(_) | AssetSlot::Background => {
            let rgba = image.to_rgba8();
            AssetPayload::Color(DecodedImage {
                width: rgba.width(),
                height: rgba.height(),
                rgba: rgba.into_raw(),
            })
        }
    })
}

/// Mean radiance of a linear image, each channel clamped to `[0, 1]`.
#[must_use]
pub fn average_radiance(image: &image::Rgb32FImage) -> [f32; 3] {
    let count = image.width() as f64 * image.height() as f64;
    if count == 0.0 {
        return [0.0; 3];
    }
    let mut sum = [0.0_f64; 3];
    for pixel in image.pixels() {
        for (acc, &c) in sum.iter_mut().zip(pixel.0.iter()) {
            if c.is_finite() {
                *acc += f64::from(c);
            }
        }
    }
    sum.map(|s| ((s / count) as f32).clamp(0.0, 1.0))
}

/// Spawns loads and collects their results.
pub struct AssetLoader {
    sender: Sender<LoadedAsset>,
    receiver: Receiver<LoadedAsset>,
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader {
    /// Create a loader with an empty result channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Start loading every configured slot.
    pub fn request_all(&self, options: &AssetOptions) {
        for slot in AssetSlot::all() {
            if let Some(source) = slot.source(options) {
                self.request(slot, source);
            }
        }
    }

    /// Start loading one slot in the background. Failures are logged.
    pub fn request(&self, slot: AssetSlot, source: &str) {
        log::debug!("loading {} from {source}", slot.label());
        if let Err(e) = self.spawn(slot, source.to_owned()) {
            log::warn!("{} not loaded: {e}", slot.label());
        }
    }

    /// Take every asset that finished since the last call.
    pub fn drain(&self) -> Vec<LoadedAsset> {
        self.receiver.try_iter().collect()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&self, slot: AssetSlot, source: String) -> Result<(), OrreryError> {
        let sender = self.sender.clone();
        let _ = std::thread::Builder::new()
            .name(format!("orrery-asset-{}", slot.label()))
            .spawn(move || {
                let result = read_source(&source)
                    .and_then(|bytes| decode(slot, &bytes));
                deliver(&sender, slot, &source, result);
            })
            .map_err(OrreryError::ThreadSpawn)?;
        Ok(())
    }

    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    #[allow(clippy::unnecessary_wraps)]
    fn spawn(&self, slot: AssetSlot, source: String) -> Result<(), OrreryError> {
        let sender = self.sender.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = web_fetch::fetch_bytes(&source)
                .await
                .and_then(|bytes| decode(slot, &bytes));
            deliver(&sender, slot, &source, result);
        });
        Ok(())
    }

    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    fn spawn(&self, _slot: AssetSlot, source: String) -> Result<(), OrreryError> {
        let _ = &self.sender;
        Err(OrreryError::AssetLoad {
            source,
            reason: "no fetch backend without the `web` feature".to_owned(),
        })
    }
}

fn deliver(
    sender: &Sender<LoadedAsset>,
    slot: AssetSlot,
    source: &str,
    result: Result<AssetPayload, OrreryError>,
) {
    match result {
        Ok(payload) => {
            log::debug!("loaded {} from {source}", slot.label());
            // The engine may already be gone; nothing to do then.
            let _ = sender.send(LoadedAsset { slot, payload });
        }
        Err(e) => log::warn!("{} not loaded: {e}", slot.label()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read an asset's bytes from disk or, with the `viewer` feature, over HTTP.
#[cfg(not(target_arch = "wasm32"))]
fn read_source(source: &str) -> Result<Vec<u8>, OrreryError> {
    if is_remote(source) {
        return http_get(source);
    }
    std::fs::read(source).map_err(|e| OrreryError::AssetLoad {
        source: source.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(all(not(target_arch = "wasm32"), feature = "viewer"))]
fn http_get(url: &str) -> Result<Vec<u8>, OrreryError> {
    let load_error = |e: ureq::Error| OrreryError::AssetLoad {
        source: url.to_owned(),
        reason: e.to_string(),
    };
    let mut response = ureq::get(url).call().map_err(load_error)?;
    response
        .body_mut()
        .with_config()
        .limit(64 * 1024 * 1024)
        .read_to_vec()
        .map_err(load_error)
}

#[cfg(all(not(target_arch = "wasm32"), not(feature = "viewer")))]
fn http_get(url: &str) -> Result<Vec<u8>, OrreryError> {
    Err(OrreryError::AssetLoad {
        source: url.to_owned(),
        reason: "HTTP sources need the `viewer` feature".to_owned(),
    })
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web_fetch {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use crate::error::OrreryError;

    fn load_error(source: &str, e: &wasm_bindgen::JsValue) -> OrreryError {
        OrreryError::AssetLoad {
            source: source.to_owned(),
            reason: format!("{e:?}"),
        }
    }

    /// Fetch a URL (relative URLs resolve against the page) into bytes.
    pub(super) async fn fetch_bytes(source: &str) -> Result<Vec<u8>, OrreryError> {
        let window = web_sys::window()
            .ok_or_else(|| OrreryError::Web("no window".to_owned()))?;
        let response = JsFuture::from(window.fetch_with_str(source))
            .await
            .map_err(|e| load_error(source, &e))?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|e| load_error(source, &e))?;
        if !response.ok() {
            return Err(OrreryError::AssetLoad {
                source: source.to_owned(),
                reason: format!("HTTP {}", response.status()),
            });
        }
        let buffer = response
            .array_buffer()
            .map_err(|e| load_error(source, &e))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| load_error(source, &e))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use image::{ImageFormat, Rgb, Rgb32FImage, RgbaImage};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([x as u8, y as u8, 7, 255])
        });
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn color_maps_decode_to_rgba() {
        let payload = decode(AssetSlot::Planet(2), &png_bytes(3, 2)).unwrap();
        let AssetPayload::Color(image) = payload else {
            panic!("expected a color map");
        };
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.rgba.len(), 3 * 2 * 4);
        // Pixel (2, 1).
        assert_eq!(&image.rgba[(3 + 2) * 4..(3 + 2) * 4 + 4], &[2, 1, 7, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode(AssetSlot::Background, b"not an image").unwrap_err();
        assert!(matches!(err, OrreryError::AssetDecode(_)));
    }

    #[test]
    fn sizes_fit_the_texture_limit() {
        assert_eq!(fit_to_limit(2048, 1024, 8192), Some((2048, 1024)));
        assert_eq!(fit_to_limit(8192, 8192, 8192), Some((8192, 8192)));
        assert_eq!(fit_to_limit(8193, 1, 8192), Some((8192, 1)));
        assert_eq!(fit_to_limit(16384, 8192, 8192), Some((8192, 4096)));
        assert_eq!(fit_to_limit(1000, 4000, 1000), Some((250, 1000)));
        assert_eq!(fit_to_limit(100_000, 1, 2048), Some((2048, 1)));
    }

    #[test]
    fn empty_sizes_do_not_fit() {
        assert_eq!(fit_to_limit(0, 512, 8192), None);
        assert_eq!(fit_to_limit(512, 0, 8192), None);
        assert_eq!(fit_to_limit(512, 512, 0), None);
    }

    #[test]
    fn oversized_color_map_is_downscaled() {
        let image = DecodedImage {
            width: 4,
            height: 2,
            rgba: [10, 20, 30, 255].repeat(8),
        };
        let fitted = image.fit_within(2).unwrap();
        assert_eq!((fitted.width, fitted.height), (2, 1));
        assert_eq!(fitted.rgba.len(), 2 * 4);
    }

    #[test]
    fn color_map_within_limit_is_untouched() {
        let AssetPayload::Color(image) =
            decode(AssetSlot::Planet(0), &png_bytes(3, 2)).unwrap()
        else {
            panic!("expected a color map");
        };
        assert_eq!(image.clone().fit_within(8192), Some(image));
    }

    #[test]
    fn malformed_color_maps_are_rejected() {
        let empty = DecodedImage {
            width: 0,
            height: 0,
            rgba: Vec::new(),
        };
        assert_eq!(empty.fit_within(8192), None);

        let short = DecodedImage {
            width: 8,
            height: 8,
            rgba: vec![0; 16],
        };
        assert_eq!(short.clone().fit_within(8192), None);
        assert_eq!(short.fit_within(4), None);
    }

    #[test]
    fn radiance_average_is_clamped() {
        let mut image = Rgb32FImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([0.2, 4.0, 0.0]));
        image.put_pixel(1, 0, Rgb([0.4, 2.0, f32::NAN]));
        let avg = average_radiance(&image);
        assert!((avg[0] - 0.3).abs() < 1e-6);
        assert_eq!(avg[1], 1.0);
        assert_eq!(avg[2], 0.0);
    }

    #[test]
    fn empty_radiance_is_black() {
        assert_eq!(average_radiance(&Rgb32FImage::new(0, 0)), [0.0; 3]);
    }

    #[test]
    fn slots_resolve_their_sources() {
        let mut options = AssetOptions::default();
        assert_eq!(
            AssetSlot::Planet(1).source(&options),
            Some("assets/textures/earth/map.jpg")
        );
        assert_eq!(AssetSlot::Planet(9).source(&options), None);
        options.environment = None;
        assert_eq!(AssetSlot::Environment.source(&options), None);
        options.background = String::new();
        assert_eq!(AssetSlot::Background.source(&options), None);
        assert_eq!(AssetSlot::all().count(), PANEL_COUNT + 2);
    }

    #[test]
    fn loader_delivers_files_and_drops_failures() {
        let dir = std::env::temp_dir().join(format!(
            "orrery-assets-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("planet.png");
        std::fs::write(&path, png_bytes(4, 4)).unwrap();

        let loader = AssetLoader::new();
        loader.request(AssetSlot::Planet(0), &path.to_string_lossy());
        loader.request(AssetSlot::Planet(1), &dir.join("missing.png").to_string_lossy());

        let mut loaded = Vec::new();
        for _ in 0..200 {
            loaded.extend(loader.drain());
            if !loaded.is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        // Give the failing load time to finish; it must never arrive.
        std::thread::sleep(Duration::from_millis(50));
        loaded.extend(loader.drain());

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].slot, AssetSlot::Planet(0));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
