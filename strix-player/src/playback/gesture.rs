//! Vertical drag gestures for volume and brightness
//!
//! A drag only becomes a gesture once it moves past a small vertical
//! threshold, so taps stay taps. The horizontal start position picks the
//! axis once per gesture: left edge drives brightness, right edge drives
//! volume, the middle band does nothing. The adjusted value is derived from
//! a baseline captured at gesture start, never re-read mid-drag.

/// Vertical displacement before a drag is captured as a gesture
pub const CAPTURE_THRESHOLD_PX: f64 = 10.0;

/// Pixels of vertical travel per full 0..1 swing
pub const DRAG_SENSITIVITY_PX: f64 = 200.0;

/// Which value a captured gesture adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAxis {
    Brightness,
    Volume,
}

/// Classify the gesture's starting x position (0..1 across the screen)
pub fn classify_start(x_ratio: f64) -> Option<GestureAxis> {
    if x_ratio < 0.25 {
        Some(GestureAxis::Brightness)
    } else if x_ratio > 0.75 {
        Some(GestureAxis::Volume)
    } else {
        None
    }
}

/// Result of a gesture movement: the new absolute value for the axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    Volume(f64),
    Brightness(f64),
}

#[derive(Debug)]
struct ActiveDrag {
    axis: Option<GestureAxis>,
    baseline: f64,
    captured: bool,
}

/// Maps an in-progress drag to volume/brightness adjustments
#[derive(Debug, Default)]
pub struct GestureInputMapper {
    active: Option<ActiveDrag>,
}

impl GestureInputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a drag. Baselines are the current values at gesture
    /// start; the relevant one is frozen for the whole drag.
    pub fn begin(&mut self, x_ratio: f64, volume: f64, brightness: f64) {
        let axis = classify_start(x_ratio);
        let baseline = match axis {
            Some(GestureAxis::Volume) => volume,
            Some(GestureAxis::Brightness) => brightness,
            None => 0.0,
        };
        self.active = Some(ActiveDrag {
            axis,
            baseline,
            captured: false,
        });
    }

    /// Process cumulative vertical displacement since gesture start.
    /// Positive `dy_px` means the finger moved down, which lowers the value.
    pub fn on_move(&mut self, dy_px: f64) -> Option<GestureEffect> {
        let drag = self.active.as_mut()?;

        if !drag.captured {
            if dy_px.abs() <= CAPTURE_THRESHOLD_PX {
                return None;
            }
            drag.captured = true;
        }

        let axis = drag.axis?;
        let value = (drag.baseline - dy_px / DRAG_SENSITIVITY_PX).clamp(0.0, 1.0);
        Some(match axis {
            GestureAxis::Volume => GestureEffect::Volume(value),
            GestureAxis::Brightness => GestureEffect::Brightness(value),
        })
    }

    /// Finish the drag
    pub fn end(&mut self) {
        self.active = None;
    }

    pub fn is_captured(&self) -> bool {
        self.active.as_ref().is_some_and(|d| d.captured)
    }
}
