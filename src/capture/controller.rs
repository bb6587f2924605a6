use crate::{
    capture::repaint::{NoRepaint, RepaintRequester},
    capture::snap::SnapCorrector,
    foundation::core::Point,
    geometry::width::WidthModel,
    stroke::model::{Drawing, Stroke},
    stroke::sample::{PointerSample, SamplePoint},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer event from the host's input system.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    #[serde(flatten)]
    pub sample: PointerSample,
}

impl PointerEvent {
    pub fn down(sample: PointerSample) -> Self {
        Self {
            phase: PointerPhase::Down,
            sample,
        }
    }

    pub fn moved(sample: PointerSample) -> Self {
        Self {
            phase: PointerPhase::Move,
            sample,
        }
    }

    pub fn up(sample: PointerSample) -> Self {
        Self {
            phase: PointerPhase::Up,
            sample,
        }
    }

    pub fn cancel(sample: PointerSample) -> Self {
        Self {
            phase: PointerPhase::Cancel,
            sample,
        }
    }
}

/// What an event did to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A new stroke was started.
    Started,
    /// A point was appended to the active stroke.
    Extended,
    /// The active stroke was sealed into the drawing.
    Committed,
    /// The active stroke was dropped.
    Discarded,
    /// The event did not apply to the current state.
    Ignored,
}

struct ActiveStroke {
    pointer_id: u64,
    stroke: Stroke,
}

/// Turns a live pointer-event stream into committed strokes.
///
/// Idle until pointer-down; while a stroke is active only events from the same pointer
/// are accepted. Every accepted change requests a repaint.
pub struct CaptureController<R = NoRepaint> {
    drawing: Drawing,
    active: Option<ActiveStroke>,
    width: WidthModel,
    snap: Option<SnapCorrector>,
    repaint: R,
}

impl CaptureController<NoRepaint> {
    /// Headless controller.
    pub fn headless(width: WidthModel, created_at: f64) -> Self {
        Self::new(width, created_at, NoRepaint)
    }
}

impl<R: RepaintRequester> CaptureController<R> {
    pub fn new(width: WidthModel, created_at: f64, repaint: R) -> Self {
        Self {
            drawing: Drawing::new(created_at),
            active: None,
            width,
            snap: None,
            repaint,
        }
    }

    /// Enable trace correction: every captured position is pulled toward `snap`'s reference.
    pub fn with_snap(mut self, snap: SnapCorrector) -> Self {
        self.snap = Some(snap);
        self
    }

    pub fn handle(&mut self, event: &PointerEvent) -> CaptureOutcome {
        let outcome = match event.phase {
            PointerPhase::Down => self.pointer_down(&event.sample),
            PointerPhase::Move => self.pointer_move(&event.sample),
            PointerPhase::Up => self.pointer_up(&event.sample),
            PointerPhase::Cancel => self.pointer_cancel(&event.sample),
        };
        if outcome == CaptureOutcome::Ignored {
            tracing::debug!(
                phase = ?event.phase,
                pointer = event.sample.pointer_id,
                active = self.is_active(),
                "ignored pointer event"
            );
        } else {
            self.repaint.request_repaint();
        }
        outcome
    }

    fn corrected(&self, raw: &PointerSample) -> Point {
        match &self.snap {
            Some(snap) => snap.correct(raw.position),
            None => raw.position,
        }
    }

    fn pointer_down(&mut self, sample: &PointerSample) -> CaptureOutcome {
        if self.active.is_some() {
            return CaptureOutcome::Ignored;
        }
        let point = SamplePoint::capture(sample, self.corrected(sample), None, &self.width);
        self.active = Some(ActiveStroke {
            pointer_id: sample.pointer_id,
            stroke: Stroke::begin(point, sample.timestamp),
        });
        CaptureOutcome::Started
    }

    fn pointer_move(&mut self, sample: &PointerSample) -> CaptureOutcome {
        let position = self.corrected(sample);
        let width = self.width;
        match &mut self.active {
            Some(active) if active.pointer_id == sample.pointer_id => {
                let point =
                    SamplePoint::capture(sample, position, Some(active.stroke.last()), &width);
                active.stroke.push(point);
                CaptureOutcome::Extended
            }
            _ => CaptureOutcome::Ignored,
        }
    }

    fn pointer_up(&mut self, sample: &PointerSample) -> CaptureOutcome {
        match self.take_active(sample.pointer_id) {
            Some(stroke) => {
                self.drawing.push(stroke);
                CaptureOutcome::Committed
            }
            None => CaptureOutcome::Ignored,
        }
    }

    fn pointer_cancel(&mut self, sample: &PointerSample) -> CaptureOutcome {
        match self.take_active(sample.pointer_id) {
            Some(_) => CaptureOutcome::Discarded,
            None => CaptureOutcome::Ignored,
        }
    }

    fn take_active(&mut self, pointer_id: u64) -> Option<Stroke> {
        if !self
            .active
            .as_ref()
            .is_some_and(|a| a.pointer_id == pointer_id)
        {
            return None;
        }
        self.active.take().map(|a| a.stroke)
    }

    /// Drop every committed stroke and any stroke in progress.
    pub fn clear(&mut self) {
        self.drawing.clear();
        self.active = None;
        self.repaint.request_repaint();
    }

    /// Committed strokes.
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Stroke currently being captured, if any.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref().map(|a| &a.stroke)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn repaint(&self) -> &R {
        &self.repaint
    }

    /// Hand off the committed drawing. A stroke still in progress is discarded.
    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/controller.rs"]
mod tests;
