use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::AnimationDecoder;

use crate::{
    descriptor::url::ResourceUrl,
    foundation::error::{SceneError, SceneResult},
    scene::backend::{ImageInfo, MediaBackend, VideoPlayer},
};

/// Average glyph advance as a fraction of the font size, used without font bytes.
const FALLBACK_ADVANCE_RATIO: f64 = 0.5;
/// Line height as a fraction of the font size, used without font bytes.
const FALLBACK_LINE_HEIGHT_RATIO: f64 = 1.2;

/// [`MediaBackend`] reading images from the local filesystem.
///
/// Bare paths resolve against `root`. Video decoding is outside this crate, so every
/// `open_video` call fails and the scene builder omits the video.
pub struct FsMediaBackend {
    root: PathBuf,
    text: TextMeasurer,
}

impl FsMediaBackend {
    /// Backend resolving bare paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            text: TextMeasurer::default(),
        }
    }

    /// Measure text with the given font instead of the fixed-advance estimate.
    pub fn with_font(mut self, font_bytes: Vec<u8>) -> Self {
        self.text.font_bytes = Some(font_bytes);
        self
    }

    fn local_path(&self, url: &ResourceUrl) -> SceneResult<PathBuf> {
        let path = url
            .to_file_path()
            .ok_or_else(|| SceneError::missing_resource(format!("not a local file: {url}")))?;
        Ok(if path.is_absolute() {
            path
        } else {
            self.root.join(path)
        })
    }
}

impl MediaBackend for FsMediaBackend {
    #[tracing::instrument(skip(self))]
    fn probe_image(&mut self, url: &ResourceUrl) -> SceneResult<ImageInfo> {
        let path = self.local_path(url)?;
        let info = probe_file(&path)?;
        tracing::debug!(path = %path.display(), ?info, "image probed");
        Ok(info)
    }

    fn open_video(&mut self, url: &ResourceUrl, _stream: bool) -> SceneResult<Box<dyn VideoPlayer>> {
        Err(SceneError::missing_resource(format!(
            "no video decoder available for {url}"
        )))
    }

    fn measure_text(&mut self, text: &str, font_size: f64, max_width: f64) -> f64 {
        self.text.measure(text, font_size, max_width)
    }
}

/// Pixel size and frame count of an image file.
pub fn probe_file(path: &Path) -> SceneResult<ImageInfo> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("open image {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("guess image format {}", path.display()))?;
    let format = reader.format();
    let (width, height) = reader
        .into_dimensions()
        .with_context(|| format!("read image header {}", path.display()))?;

    let frame_count = if format == Some(image::ImageFormat::Gif) {
        gif_frame_count(path)?
    } else {
        1
    };
    Ok(ImageInfo {
        width,
        height,
        frame_count,
    })
}

fn gif_frame_count(path: &Path) -> SceneResult<u32> {
    let file = File::open(path).with_context(|| format!("open gif {}", path.display()))?;
    let decoder = image::codecs::gif::GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("decode gif {}", path.display()))?;
    let count = decoder.into_frames().take_while(Result::is_ok).count();
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Text height measurement backed by Parley when font bytes are available.
#[derive(Default)]
struct TextMeasurer {
    font_bytes: Option<Vec<u8>>,
    engine: Option<(parley::FontContext, parley::LayoutContext<()>, String)>,
}

impl TextMeasurer {
    fn measure(&mut self, text: &str, font_size: f64, max_width: f64) -> f64 {
        if !font_size.is_finite() || font_size <= 0.0 {
            return 0.0;
        }
        if self.font_bytes.is_some() {
            match self.layout_height(text, font_size, max_width) {
                Ok(h) => return h,
                Err(e) => tracing::debug!(error = %e, "font layout failed; estimating text height"),
            }
        }
        estimate_height(text, font_size, max_width)
    }

    fn layout_height(&mut self, text: &str, font_size: f64, max_width: f64) -> SceneResult<f64> {
        if self.engine.is_none() {
            let bytes = self
                .font_bytes
                .clone()
                .ok_or_else(|| SceneError::validation("no font bytes configured"))?;
            let mut font_ctx = parley::FontContext::default();
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes), None);
            let family_id = families
                .first()
                .map(|(id, _)| *id)
                .ok_or_else(|| SceneError::validation("no font families registered from font bytes"))?;
            let family = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| SceneError::validation("registered font family has no name"))?
                .to_string();
            self.engine = Some((font_ctx, parley::LayoutContext::new(), family));
        }
        let Some((font_ctx, layout_ctx, family)) = &mut self.engine else {
            return Err(SceneError::validation("text engine unavailable"));
        };

        let mut builder = layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size as f32));
        let mut layout: parley::Layout<()> = builder.build(text);
        let width = (max_width.is_finite() && max_width > 0.0).then_some(max_width as f32);
        layout.break_all_lines(width);
        Ok(f64::from(layout.height()))
    }
}

/// Fixed-advance estimate: wrapped line count times a nominal line height.
fn estimate_height(text: &str, font_size: f64, max_width: f64) -> f64 {
    let advance = FALLBACK_ADVANCE_RATIO * font_size;
    let lines: usize = text
        .split('\n')
        .map(|line| {
            let width = line.chars().count() as f64 * advance;
            if max_width.is_finite() && max_width > 0.0 && width > max_width {
                (width / max_width).ceil() as usize
            } else {
                1
            }
        })
        .sum();
    lines as f64 * FALLBACK_LINE_HEIGHT_RATIO * font_size
}

#[cfg(test)]
#[path = "../../tests/unit/assets/probe.rs"]
mod tests;
