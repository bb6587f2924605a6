//! Brushstroke captures pen and touch input as calligraphy strokes and renders them with
//! variable width.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: `PointerEvent -> Stroke` through a [`CaptureController`], optionally
//!    snapping to a reference drawing.
//! 2. **Compile**: `Drawing -> DrawList` through the [`StrokeEngine`]: width from tilt,
//!    color from speed, a taper polygon over a fast release.
//! 3. **Render**: `DrawList -> FrameRGBA` (CPU backend, premultiplied RGBA8).
//! 4. **Handoff**: `Drawing -> DrawingRecord`, the flat per-point JSON record.
//!
//! [`CaptureSession`] bundles the first three steps for a live session;
//! [`render_playback`] replays a finished drawing over time.
#![forbid(unsafe_code)]

mod capture;
mod config;
mod foundation;
mod geometry;
mod render;
mod session;
mod stroke;

pub use capture::controller::{CaptureController, CaptureOutcome, PointerEvent, PointerPhase};
pub use capture::repaint::{NoRepaint, RepaintCounter, RepaintRequester};
pub use capture::snap::{SnapConfig, SnapCorrector};
pub use config::BrushConfig;
pub use foundation::core::{BezPath, Canvas, Point, Rgba8, Vec2};
pub use foundation::error::{BrushError, BrushResult};
pub use geometry::classify::{
    Hold, HoldConfig, TaperConfig, TaperRegion, classify_taper, detect_holds, flagged_segments,
    taper_polygon,
};
pub use geometry::engine::{StrokeAnalysis, StrokeEngine};
pub use geometry::paint::{
    ColorMode, HeatmapParams, PaintConfig, SpeedAlphaParams, heatmap_hue, speed_alpha,
};
pub use geometry::primitive::{DrawList, Primitive};
pub use geometry::width::WidthModel;
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use render::cpu::CpuBackend;
pub use render::draw::{PrimitiveBackend, execute_draw_list};
pub use render::playback::{
    MAX_PLAYBACK_FRAMES, PlaybackOpts, PlaybackStats, RenderThreading, playback_times,
    render_playback,
};
pub use session::CaptureSession;
pub use stroke::model::{Drawing, Stroke};
pub use stroke::record::{DrawingRecord, PointRecord, StrokeRecord};
pub use stroke::sample::{PointerSample, SamplePoint, derive_speed};
