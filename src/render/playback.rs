use rayon::prelude::*;

use crate::{
    foundation::core::Canvas,
    foundation::error::{BrushError, BrushResult},
    geometry::engine::StrokeEngine,
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::cpu::CpuBackend,
    stroke::model::Drawing,
};

/// Most frames a single playback may produce.
pub const MAX_PLAYBACK_FRAMES: u64 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Frames rendered per batch; at most this many frames are held at once.
    pub chunk_size: usize,
    pub threads: Option<usize>,
    /// Reuse the previous frame when no new point became visible since it.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: true,
        }
    }
}

/// Options for [`render_playback`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackOpts {
    pub fps: f64,
    pub canvas: Canvas,
    pub threading: RenderThreading,
}

impl PlaybackOpts {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            fps: 30.0,
            canvas,
            threading: RenderThreading::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    pub frames_elided: u64,
}

/// Frame times covering the drawing's time span at `fps`, both ends included.
///
/// Fails when the span needs more than [`MAX_PLAYBACK_FRAMES`] frames.
pub fn playback_times(drawing: &Drawing, fps: f64) -> BrushResult<Vec<f64>> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(BrushError::validation("playback fps must be finite and > 0"));
    }
    let Some((start, end)) = drawing.time_span() else {
        return Ok(Vec::new());
    };
    let steps = frame_steps((end - start) * fps)?;
    Ok((0..=steps)
        .map(|i| (start + i as f64 / fps).min(end))
        .collect())
}

fn frame_steps(span_frames: f64) -> BrushResult<u64> {
    let steps = span_frames.ceil();
    // `steps + 1` frames are produced; the bound check makes the cast exact.
    if !steps.is_finite() || steps < 0.0 || steps >= MAX_PLAYBACK_FRAMES as f64 {
        return Err(BrushError::validation(format!(
            "playback would exceed {MAX_PLAYBACK_FRAMES} frames; lower fps or split the drawing"
        )));
    }
    Ok(steps as u64)
}

/// Replay `drawing` progressively: frame `i` shows every point with a timestamp up to
/// the `i`-th frame time. Each finished frame is handed to `sink` with its index, in order.
///
/// Frames are produced in chunks of `threading.chunk_size`, so memory stays bounded by the
/// chunk rather than the playback length. An elided frame is passed to `sink` as the
/// previous frame again. Sequential playback renders on `backend`. Parallel playback
/// builds one CPU backend per worker from [`RenderBackend::worker_render_settings`].
#[tracing::instrument(skip_all, fields(strokes = drawing.strokes().len(), fps = opts.fps))]
pub fn render_playback<S>(
    drawing: &Drawing,
    engine: &StrokeEngine,
    backend: &mut dyn RenderBackend,
    opts: &PlaybackOpts,
    mut sink: S,
) -> BrushResult<PlaybackStats>
where
    S: FnMut(usize, &FrameRGBA) -> BrushResult<()>,
{
    let times = playback_times(drawing, opts.fps)?;
    let threading = &opts.threading;
    let chunk_size = normalized_chunk_size(threading.chunk_size);

    let workers = if threading.parallel {
        let settings = backend.worker_render_settings().ok_or_else(|| {
            BrushError::render("parallel playback requires a replicable backend (CpuBackend)")
        })?;
        Some((settings, build_thread_pool(threading.threads)?))
    } else {
        None
    };

    let render_at = |backend: &mut dyn RenderBackend, t: f64| {
        let partial = drawing.truncated_at(t);
        backend.render(&engine.compile_drawing(&partial, opts.canvas))
    };

    let mut stats = PlaybackStats::default();
    // Visible point count and frame of the last emitted frame.
    let mut prev: Option<(usize, FrameRGBA)> = None;

    for (chunk_idx, chunk) in times.chunks(chunk_size).enumerate() {
        let base = chunk_idx * chunk_size;

        // Frames showing the same number of points as their predecessor are identical.
        let mut visible = Vec::with_capacity(chunk.len());
        let mut last_count = prev.as_ref().map(|(count, _)| *count);
        for &t in chunk {
            let count = visible_points(drawing, t);
            let reuse = threading.static_frame_elision && last_count == Some(count);
            visible.push((count, !reuse));
            last_count = Some(count);
        }

        let mut prerendered: Vec<Option<FrameRGBA>> = match &workers {
            Some((settings, pool)) => {
                let pending: Vec<f64> = chunk
                    .iter()
                    .zip(&visible)
                    .filter(|(_, (_, fresh))| *fresh)
                    .map(|(&t, _)| t)
                    .collect();
                let mut rendered =
                    render_parallel(pool, settings, &pending, &render_at)?.into_iter();
                visible
                    .iter()
                    .map(|&(_, fresh)| if fresh { rendered.next() } else { None })
                    .collect()
            }
            None => Vec::new(),
        };

        for (i, &(count, fresh)) in visible.iter().enumerate() {
            if fresh {
                let frame = match prerendered.get_mut(i).and_then(Option::take) {
                    Some(frame) => frame,
                    None => render_at(&mut *backend, chunk[i])?,
                };
                prev = Some((count, frame));
                stats.frames_rendered += 1;
            } else {
                stats.frames_elided += 1;
            }
            let (_, frame) = prev
                .as_ref()
                .ok_or_else(|| BrushError::render("elided frame has no predecessor"))?;
            sink(base + i, frame)?;
            stats.frames_total += 1;
        }
    }

    tracing::debug!(?stats, "playback rendered");
    Ok(stats)
}

fn visible_points(drawing: &Drawing, t: f64) -> usize {
    drawing
        .strokes()
        .iter()
        .map(|s| s.points().partition_point(|p| p.timestamp <= t))
        .sum()
}

fn render_parallel<F>(
    pool: &rayon::ThreadPool,
    settings: &RenderSettings,
    times: &[f64],
    render_at: &F,
) -> BrushResult<Vec<FrameRGBA>>
where
    F: Fn(&mut dyn RenderBackend, f64) -> BrushResult<FrameRGBA> + Sync,
{
    let rendered = pool.install(|| {
        times
            .par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker_backend, &t| render_at(worker_backend, t),
            )
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> BrushResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BrushError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BrushError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/playback.rs"]
mod tests;
