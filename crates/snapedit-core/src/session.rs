//! Edit session: the lifecycle of "current image + current edit state".
//!
//! # States
//!
//! ```text
//!            load ok              load ok
//!   Empty ──────────▶ Loaded ◀──────────┐
//!                       │               │
//!                       └───────────────┘
//! ```
//!
//! Filter, transform and reset calls are no-ops while `Empty`. A failed load
//! leaves the session exactly as it was. There is no way back to `Empty`.
//!
//! # Loading in phases
//!
//! Decoding is the slow step. Hosts that want to keep their event loop
//! responsive use the three phases explicitly:
//!
//! ```ignore
//! let pending = session.begin_load(file)?;   // validation only
//! let decoded = pending.decode()?;          // no session access, can run elsewhere
//! session.finish_load(decoded)?;            // atomic swap
//! ```
//!
//! [`EditSession::load`] runs all three back to back.
//!
//! # Exporting in phases
//!
//! Export mirrors loading: [`EditSession::render_export`] draws the native
//! size surface against the current state, and [`RenderedExport::encode`]
//! produces the PNG without touching the session. [`EditSession::export`]
//! runs both.

use crate::config::EditorConfig;
use crate::decode::{
    decode_image, fit_to_container, resize, validate_file, DecodeError, DecodedImage, Fit,
    ImageFile, SourceFormat,
};
use crate::encode::ExportFormat;
use crate::error::SessionError;
use crate::present::{Dispatch, Presenter, RenderSchedule};
use crate::render::{RasterSurface, RenderPlan, Surface};
use crate::state::{EditState, FilterKind, FlipAxis, TransformOp};
use tracing::{debug, info, instrument, warn};

/// Export quality handed to the surface encoder (maximum).
pub const EXPORT_QUALITY: f32 = 1.0;

/// A validated file waiting to be decoded.
#[derive(Debug, Clone)]
pub struct PendingDecode {
    format: SourceFormat,
    bytes: Vec<u8>,
}

impl PendingDecode {
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Decode the file. Touches no session state.
    pub fn decode(self) -> Result<DecodedSource, SessionError> {
        let image = decode_image(&self.bytes, self.format)?;
        Ok(DecodedSource {
            image,
            format: self.format,
        })
    }
}

/// A successfully decoded source image, ready to install.
///
/// Only [`PendingDecode::decode`] builds one.
#[derive(Debug, Clone)]
pub struct DecodedSource {
    image: DecodedImage,
    format: SourceFormat,
}

impl DecodedSource {
    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

/// A surface rendered at native size, waiting to be encoded.
#[derive(Debug)]
pub struct RenderedExport<S> {
    surface: S,
    width: u32,
    height: u32,
}

impl<S: Surface> RenderedExport<S> {
    /// The rendered surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Encode as PNG at maximum quality. Touches no session state.
    pub fn encode(self) -> Result<ExportedImage, SessionError> {
        let format = ExportFormat::Png;
        let bytes = self
            .surface
            .to_encoded_buffer(format, EXPORT_QUALITY)
            .inspect_err(|e| warn!(error = %e, "export encoding failed"))?;

        info!(
            width = self.width,
            height = self.height,
            bytes = bytes.len(),
            "image exported"
        );
        Ok(ExportedImage {
            bytes,
            width: self.width,
            height: self.height,
            format,
        })
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
}

impl ExportedImage {
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    /// Suggested download name, e.g. `edited-image-1700000000000.png`.
    pub fn file_name(&self, timestamp_millis: u64) -> String {
        format!("edited-image-{timestamp_millis}.{}", self.format.extension())
    }
}

/// Everything that exists only while an image is loaded.
#[derive(Debug, Clone)]
struct Document {
    source: DecodedImage,
    /// Source resampled to the preview size.
    proxy: DecodedImage,
    format: SourceFormat,
    state: EditState,
}

/// Owns the current image, its edit state and the preview surface.
#[derive(Debug)]
pub struct EditSession<S: Surface = RasterSurface> {
    config: EditorConfig,
    container: (u32, u32),
    document: Option<Document>,
    preview: S,
    presenter: Presenter,
}

impl EditSession<RasterSurface> {
    /// Create an empty session backed by an in-memory raster surface.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_surface(config, RasterSurface::default())
    }
}

impl Default for EditSession<RasterSurface> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl<S: Surface + Default> EditSession<S> {
    /// Create an empty session drawing its preview on `preview`.
    pub fn with_surface(config: EditorConfig, preview: S) -> Self {
        let presenter = Presenter::new(config.render_schedule());
        Self {
            config,
            container: (0, 0),
            document: None,
            preview,
            presenter,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Current edit state, if an image is loaded.
    pub fn state(&self) -> Option<&EditState> {
        self.document.as_ref().map(|d| &d.state)
    }

    /// Native dimensions of the loaded image.
    pub fn source_dimensions(&self) -> Option<(u32, u32)> {
        self.document.as_ref().map(|d| d.source.dimensions())
    }

    /// Format the loaded image was accepted as.
    pub fn source_format(&self) -> Option<SourceFormat> {
        self.document.as_ref().map(|d| d.format)
    }

    /// The preview surface.
    pub fn preview(&self) -> &S {
        &self.preview
    }

    pub fn schedule(&self) -> RenderSchedule {
        self.presenter.schedule()
    }

    /// Switch between immediate and coalesced preview rendering.
    pub fn set_schedule(&mut self, schedule: RenderSchedule) {
        self.presenter.set_schedule(schedule);
        if schedule == RenderSchedule::Immediate && self.presenter.take_frame() {
            self.render_preview();
        }
    }

    /// Number of preview renders so far.
    pub fn frames_presented(&self) -> u64 {
        self.presenter.frames_presented()
    }

    /// Whether a coalesced preview render is waiting for a frame.
    pub fn has_pending_frame(&self) -> bool {
        self.presenter.is_pending()
    }

    // -- Loading --------------------------------------------------------------

    /// Validate a file against the allow-list and size cap.
    #[instrument(skip_all, fields(mime = %file.mime, size = file.size()))]
    pub fn begin_load(&self, file: ImageFile) -> Result<PendingDecode, SessionError> {
        match validate_file(&file, self.config.max_file_size) {
            Ok(format) => Ok(PendingDecode {
                format,
                bytes: file.bytes,
            }),
            Err(rejection) => {
                warn!(reason = %rejection, "file rejected");
                Err(rejection.into())
            }
        }
    }

    /// Install a decoded image, replacing any previous one and resetting the
    /// edit state.
    ///
    /// Nothing is changed unless every step succeeds.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::CorruptedFile` if the pixel buffer does not match
    /// the image dimensions.
    pub fn finish_load(&mut self, decoded: DecodedSource) -> Result<(), SessionError> {
        let DecodedSource { image, format } = decoded;
        if !image.has_consistent_buffer() {
            return Err(DecodeError::CorruptedFile(format!(
                "expected {} pixel bytes for {}x{}, got {}",
                image.width as usize * image.height as usize * 4,
                image.width,
                image.height,
                image.pixels.len()
            ))
            .into());
        }
        let fit = self.fit(&image);
        let proxy = resize(&image, fit.width, fit.height, self.config.preview_filter)?;

        info!(
            width = image.width,
            height = image.height,
            format = %format,
            "image loaded"
        );

        self.document = Some(Document {
            source: image,
            proxy,
            format,
            state: EditState::reset(),
        });
        self.preview.resize(fit.width, fit.height);
        debug!(width = fit.width, height = fit.height, scale = fit.scale, "preview fitted");

        // A resized surface is blank, so draw now rather than wait a frame
        self.presenter.cancel();
        self.render_preview();
        Ok(())
    }

    /// Validate, decode and install a file in one call.
    pub fn load(&mut self, file: ImageFile) -> Result<(), SessionError> {
        let pending = self.begin_load(file)?;
        let decoded = pending.decode().inspect_err(|e| {
            warn!(error = %e, "decode failed");
        })?;
        self.finish_load(decoded)
    }

    // -- Layout ---------------------------------------------------------------

    /// Update the container the preview must fit in.
    ///
    /// A zero dimension means "unknown"; the preview then uses the image's
    /// native size.
    pub fn resize_container(&mut self, width: u32, height: u32) -> Result<(), SessionError> {
        self.container = (width, height);

        let Some(doc) = self.document.as_ref() else {
            return Ok(());
        };
        let fit = self.fit(&doc.source);
        if (fit.width, fit.height) == (self.preview.width(), self.preview.height()) {
            return Ok(());
        }

        let proxy = resize(&doc.source, fit.width, fit.height, self.config.preview_filter)?;
        if let Some(doc) = self.document.as_mut() {
            doc.proxy = proxy;
        }
        self.preview.resize(fit.width, fit.height);
        debug!(width = fit.width, height = fit.height, "preview refitted");

        self.presenter.cancel();
        self.render_preview();
        Ok(())
    }

    /// Preview dimensions for the current container.
    pub fn preview_size(&self) -> (u32, u32) {
        (self.preview.width(), self.preview.height())
    }

    fn fit(&self, image: &DecodedImage) -> Fit {
        let (cw, ch) = self.container;
        if cw == 0 || ch == 0 {
            return Fit {
                width: image.width,
                height: image.height,
                scale: 1.0,
            };
        }
        fit_to_container(image.width, image.height, cw, ch, self.config.container_margin)
    }

    // -- Mutation -------------------------------------------------------------

    /// Set one filter (clamped and rounded). No-op when no image is loaded.
    pub fn set_filter(&mut self, kind: FilterKind, value: f64) {
        if let Some(doc) = self.document.as_mut() {
            doc.state.set_filter(kind, value);
            self.request_preview();
        }
    }

    /// Set one filter from a slider's text value. No-op when no image is loaded.
    pub fn set_filter_str(&mut self, kind: FilterKind, value: &str) {
        if let Some(doc) = self.document.as_mut() {
            doc.state.set_filter_str(kind, value);
            self.request_preview();
        }
    }

    /// Apply a rotation or flip. No-op when no image is loaded.
    pub fn set_transform(&mut self, op: TransformOp) {
        if let Some(doc) = self.document.as_mut() {
            doc.state.set_transform(op);
            self.request_preview();
        }
    }

    pub fn rotate(&mut self, degrees: i32) {
        self.set_transform(TransformOp::Rotate(degrees));
    }

    pub fn flip(&mut self, axis: FlipAxis) {
        self.set_transform(TransformOp::Flip(axis));
    }

    /// Restore default filters and transform. No-op when no image is loaded.
    pub fn reset(&mut self) {
        if let Some(doc) = self.document.as_mut() {
            doc.state = EditState::reset();
            self.request_preview();
        }
    }

    /// Replace the whole edit state (e.g. restored from JSON), re-validating it.
    pub fn restore_state(&mut self, state: EditState) {
        if let Some(doc) = self.document.as_mut() {
            doc.state = state.sanitized();
            self.request_preview();
        }
    }

    // -- Rendering ------------------------------------------------------------

    /// Display-refresh hook for the coalesced schedule.
    ///
    /// Returns `true` if a preview render happened.
    pub fn on_animation_frame(&mut self) -> bool {
        if !self.presenter.take_frame() {
            return false;
        }
        self.render_preview()
    }

    fn request_preview(&mut self) {
        match self.presenter.request() {
            Dispatch::RenderNow => {
                self.render_preview();
            }
            Dispatch::AwaitFrame | Dispatch::Coalesced => {}
        }
    }

    fn render_preview(&mut self) -> bool {
        let Some(doc) = self.document.as_ref() else {
            return false;
        };
        let plan = RenderPlan::new(&doc.state, self.preview.width(), self.preview.height());
        plan.execute(&doc.proxy, &mut self.preview);
        self.presenter.mark_presented();
        true
    }

    // -- Export ---------------------------------------------------------------

    /// Render the current state at the source's native resolution on a fresh
    /// surface, independent of the preview surface's size.
    pub fn render_export(&self) -> Result<RenderedExport<S>, SessionError> {
        let doc = self.document.as_ref().ok_or(SessionError::NoImage)?;
        let (width, height) = doc.source.dimensions();

        let mut surface = S::default();
        surface.resize(width, height);
        RenderPlan::new(&doc.state, width, height).execute(&doc.source, &mut surface);

        Ok(RenderedExport {
            surface,
            width,
            height,
        })
    }

    /// Render at native resolution and encode as PNG.
    #[instrument(skip_all)]
    pub fn export(&self) -> Result<ExportedImage, SessionError> {
        self.render_export()?.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::EncodeError;
    use crate::error::ErrorKind;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_file(width: u32, height: u32) -> ImageFile {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255])
        });
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        ImageFile::new("image/png", bytes.into_inner())
    }

    fn immediate() -> EditorConfig {
        EditorConfig {
            prefers_reduced_motion: true,
            ..Default::default()
        }
    }

    fn loaded_session(width: u32, height: u32) -> EditSession {
        let mut session = EditSession::new(immediate());
        session.load(png_file(width, height)).unwrap();
        session
    }

    fn decode_png(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .unwrap()
            .into_rgba8()
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = EditSession::default();
        assert!(!session.is_loaded());
        assert!(session.state().is_none());
        assert_eq!(session.preview_size(), (0, 0));
    }

    #[test]
    fn test_load_installs_default_state() {
        let session = loaded_session(30, 20);
        assert!(session.is_loaded());
        assert_eq!(session.state(), Some(&EditState::default()));
        assert_eq!(session.source_dimensions(), Some((30, 20)));
        assert_eq!(session.source_format(), Some(SourceFormat::Png));
        assert_eq!(session.frames_presented(), 1);
    }

    #[test]
    fn test_load_fits_preview_to_container() {
        let mut session = EditSession::new(immediate());
        session.resize_container(800, 600).unwrap();
        session.load(png_file(400, 300)).unwrap();
        assert_eq!(session.preview_size(), (400, 300));

        session.load(png_file(1600, 900)).unwrap();
        let (w, h) = session.preview_size();
        assert_eq!(w, 760);
        assert!(h <= 560);
    }

    #[test]
    fn test_new_load_resets_state() {
        let mut session = loaded_session(10, 10);
        session.set_filter(FilterKind::Contrast, 150.0);
        session.rotate(90);

        session.load(png_file(12, 8)).unwrap();
        assert_eq!(session.state(), Some(&EditState::default()));
        assert_eq!(session.source_dimensions(), Some((12, 8)));
    }

    #[test]
    fn test_unsupported_format_leaves_empty_session() {
        let mut session = EditSession::new(immediate());
        let err = session
            .load(ImageFile::new("text/plain", b"hello".to_vec()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_unsupported_format_keeps_previous_image() {
        let mut session = loaded_session(16, 9);
        session.set_filter(FilterKind::Grayscale, 50.0);

        let err = session
            .load(ImageFile::new("text/plain", b"hello".to_vec()))
            .unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedFormat { .. }));
        assert_eq!(session.source_dimensions(), Some((16, 9)));
        assert_eq!(session.state().map(|s| s.filters.grayscale), Some(50));
    }

    #[test]
    fn test_too_large_rejected() {
        let mut session = EditSession::new(EditorConfig {
            max_file_size: 16,
            ..immediate()
        });
        let err = session.load(png_file(8, 8)).unwrap_err();
        assert!(matches!(err, SessionError::TooLarge { max: 16, .. }));
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_decode_failure_is_distinct_and_atomic() {
        let mut session = loaded_session(5, 5);
        let err = session
            .load(ImageFile::new("image/jpeg", vec![0xFF, 0xD8, 0x00, 0x01]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
        assert_eq!(session.source_dimensions(), Some((5, 5)));
    }

    #[test]
    fn test_phased_load() {
        let mut session = EditSession::new(immediate());
        let pending = session.begin_load(png_file(6, 4)).unwrap();
        assert_eq!(pending.format(), SourceFormat::Png);
        assert!(!session.is_loaded());

        let decoded = pending.decode().unwrap();
        assert!(!session.is_loaded());

        session.finish_load(decoded).unwrap();
        assert!(session.is_loaded());
    }

    #[test]
    fn test_finish_load_rejects_mismatched_buffer() {
        let mut session = loaded_session(3, 2);
        let bad = DecodedSource {
            image: DecodedImage {
                width: 4,
                height: 4,
                pixels: vec![255; 8],
            },
            format: SourceFormat::Png,
        };

        let err = session.finish_load(bad).unwrap_err();
        assert!(matches!(
            err,
            SessionError::DecodeError(DecodeError::CorruptedFile(_))
        ));
        assert_eq!(session.source_dimensions(), Some((3, 2)));
    }

    #[test]
    fn test_finish_load_rejects_mismatched_buffer_when_empty() {
        let mut session = EditSession::new(immediate());
        let bad = DecodedSource {
            image: DecodedImage {
                width: 2,
                height: 2,
                pixels: vec![0; 15],
            },
            format: SourceFormat::Png,
        };

        assert_eq!(session.finish_load(bad).unwrap_err().kind(), ErrorKind::DecodeError);
        assert!(!session.is_loaded());
        assert_eq!(session.frames_presented(), 0);
    }

    #[test]
    fn test_mutations_are_noops_when_empty() {
        let mut session = EditSession::new(immediate());
        session.set_filter(FilterKind::Brightness, 150.0);
        session.set_filter_str(FilterKind::Contrast, "20");
        session.rotate(90);
        session.flip(FlipAxis::Vertical);
        session.reset();

        assert!(session.state().is_none());
        assert_eq!(session.frames_presented(), 0);
    }

    #[test]
    fn test_filter_and_transform_update_state() {
        let mut session = loaded_session(10, 10);
        session.set_filter_str(FilterKind::Brightness, "150");
        session.set_filter(FilterKind::Contrast, 300.0);
        session.rotate(-90);
        session.flip(FlipAxis::Horizontal);

        let state = session.state().unwrap();
        assert_eq!(state.filters.brightness, 150);
        assert_eq!(state.filters.contrast, 200);
        assert_eq!(state.transform.rotation_degrees, 270);
        assert!(state.transform.flip_horizontal);
    }

    #[test]
    fn test_immediate_schedule_renders_each_change() {
        let mut session = loaded_session(10, 10);
        let before = session.frames_presented();
        session.set_filter(FilterKind::Brightness, 120.0);
        session.set_filter(FilterKind::Brightness, 130.0);
        assert_eq!(session.frames_presented(), before + 2);
        assert!(!session.on_animation_frame());
    }

    #[test]
    fn test_coalesced_schedule_renders_once_per_frame() {
        let mut session = EditSession::new(EditorConfig::default());
        session.load(png_file(10, 10)).unwrap();
        let before = session.frames_presented();

        for value in [110.0, 120.0, 130.0] {
            session.set_filter(FilterKind::Brightness, value);
        }
        assert_eq!(session.frames_presented(), before);
        assert!(session.has_pending_frame());

        assert!(session.on_animation_frame());
        assert_eq!(session.frames_presented(), before + 1);
        assert!(!session.on_animation_frame());
    }

    #[test]
    fn test_schedules_produce_identical_pixels() {
        let mut immediate_session = loaded_session(12, 7);
        let mut coalesced = EditSession::new(EditorConfig::default());
        coalesced.load(png_file(12, 7)).unwrap();

        for session_ops in [&mut immediate_session, &mut coalesced] {
            session_ops.set_filter(FilterKind::Saturation, 40.0);
            session_ops.rotate(180);
            session_ops.flip(FlipAxis::Vertical);
        }
        coalesced.on_animation_frame();

        assert_eq!(immediate_session.preview().pixels(), coalesced.preview().pixels());
    }

    #[test]
    fn test_reset_twice_equals_once() {
        let mut session = loaded_session(4, 4);
        session.set_filter(FilterKind::Saturation, 10.0);
        session.rotate(90);

        session.reset();
        let once = *session.state().unwrap();
        session.reset();
        assert_eq!(session.state(), Some(&once));
        assert!(once.is_default());
    }

    #[test]
    fn test_export_without_image_fails() {
        let session = EditSession::default();
        assert_eq!(session.export(), Err(SessionError::NoImage));
    }

    #[test]
    fn test_export_uses_native_resolution() {
        let mut session = EditSession::new(immediate());
        session.resize_container(100, 100).unwrap();
        session.load(png_file(300, 200)).unwrap();
        assert!(session.preview_size().0 <= 60);

        let exported = session.export().unwrap();
        assert_eq!((exported.width, exported.height), (300, 200));
        assert_eq!(exported.mime(), "image/png");
        assert_eq!(decode_png(&exported.bytes).dimensions(), (300, 200));
    }

    #[test]
    fn test_export_unedited_is_lossless() {
        let file = png_file(9, 5);
        let original = decode_png(&file.bytes);

        let mut session = EditSession::new(immediate());
        session.load(file).unwrap();
        let exported = session.export().unwrap();
        assert_eq!(decode_png(&exported.bytes), original);
    }

    #[test]
    fn test_export_applies_flip() {
        let file = png_file(9, 5);
        let original = decode_png(&file.bytes);

        let mut session = EditSession::new(immediate());
        session.load(file).unwrap();
        session.flip(FlipAxis::Horizontal);
        let exported = decode_png(&session.export().unwrap().bytes);

        assert_eq!(exported.get_pixel(0, 0), original.get_pixel(8, 0));
        assert_eq!(exported.get_pixel(8, 4), original.get_pixel(0, 4));
    }

    #[test]
    fn test_export_independent_of_preview_size() {
        let mut session = EditSession::new(immediate());
        session.load(png_file(64, 48)).unwrap();
        session.set_filter(FilterKind::Grayscale, 70.0);
        session.rotate(180);
        let first = session.export().unwrap();

        session.resize_container(200, 150).unwrap();
        let second = session.export().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resize_container_refits_preview() {
        let mut session = loaded_session(1000, 500);
        assert_eq!(session.preview_size(), (1000, 500));

        session.resize_container(540, 540).unwrap();
        assert_eq!(session.preview_size(), (500, 250));
    }

    #[test]
    fn test_restore_state_is_sanitized() {
        let mut session = loaded_session(4, 4);
        let mut state = EditState::new();
        state.filters.contrast = 999;
        state.transform.rotation_degrees = -180;

        session.restore_state(state);
        let restored = session.state().unwrap();
        assert_eq!(restored.filters.contrast, 200);
        assert_eq!(restored.transform.rotation_degrees, 180);
    }

    #[test]
    fn test_phased_export_matches_export() {
        let mut session = loaded_session(7, 5);
        session.set_filter(FilterKind::Contrast, 140.0);
        session.flip(FlipAxis::Vertical);

        let rendered = session.render_export().unwrap();
        assert_eq!(
            (rendered.surface().width(), rendered.surface().height()),
            (7, 5)
        );

        // State changes after rendering do not reach the pending export
        let expected = session.export().unwrap();
        session.reset();
        assert_eq!(rendered.encode().unwrap(), expected);
    }

    #[test]
    fn test_render_export_without_image_fails() {
        let session = EditSession::default();
        assert!(matches!(session.render_export(), Err(SessionError::NoImage)));
    }

    #[test]
    fn test_export_file_name() {
        let exported = ExportedImage {
            bytes: Vec::new(),
            width: 1,
            height: 1,
            format: ExportFormat::Png,
        };
        assert_eq!(exported.file_name(1234), "edited-image-1234.png");
    }

    /// Surface whose encoder always fails.
    #[derive(Debug, Default)]
    struct BrokenEncoder(RasterSurface);

    impl Surface for BrokenEncoder {
        fn width(&self) -> u32 {
            self.0.width()
        }
        fn height(&self) -> u32 {
            self.0.height()
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.0.resize(width, height);
        }
        fn clear(&mut self) {
            self.0.clear();
        }
        fn set_transform(&mut self, matrix: &crate::transform::TransformMatrix) {
            self.0.set_transform(matrix);
        }
        fn draw_image(&mut self, source: &DecodedImage, dest: crate::render::DestRect) {
            self.0.draw_image(source, dest);
        }
        fn apply_filter_chain(&mut self, chain: &crate::filter::FilterChain) {
            self.0.apply_filter_chain(chain);
        }
        fn to_encoded_buffer(&self, _: ExportFormat, _: f32) -> Result<Vec<u8>, EncodeError> {
            Err(EncodeError::EncodingFailed("disk full".into()))
        }
    }

    #[test]
    fn test_encode_failure_is_reported() {
        let mut session = EditSession::with_surface(immediate(), BrokenEncoder::default());
        session.load(png_file(4, 4)).unwrap();

        let err = session.export().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodeError);
        assert!(session.is_loaded());
    }
}
