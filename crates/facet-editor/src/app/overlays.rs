//! Performance overlay and status line

use crate::state::{SharedAppState, StatusLevel};

/// Length of an FPS sampling window in seconds.
const FPS_WINDOW: f64 = 1.0;

/// Frames counted over one-second windows.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    window_start: Option<f64>,
    frames: u32,
    fps: f32,
    frame_time_ms: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame at time `now` (seconds) that took `dt` seconds.
    pub fn tick(&mut self, now: f64, dt: f32) {
        self.frame_time_ms = dt * 1000.0;
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now - start;
        if elapsed >= FPS_WINDOW {
            self.fps = (self.frames as f64 / elapsed) as f32;
            self.frames = 0;
            self.window_start = Some(now);
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }
}

/// FPS and frame time in the top-right corner of the viewport.
pub fn render_performance_overlay(ctx: &egui::Context, stats: &FrameStats, rect: egui::Rect) {
    egui::Area::new(egui::Id::new("performance_overlay"))
        .fixed_pos(rect.right_top() + egui::vec2(-140.0, 8.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.monospace(format!("FPS: {:>6.1}", stats.fps()));
                ui.monospace(format!("Frame: {:>5.2} ms", stats.frame_time_ms()));
            });
        });
}

/// Last status message at the bottom of the window.
pub fn render_status_line(ctx: &egui::Context, app_state: &SharedAppState) {
    egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
        let state = app_state.lock();
        match state.status() {
            Some(status) if status.level == StatusLevel::Error => {
                ui.colored_label(ui.visuals().error_fg_color, &status.text);
            }
            Some(status) => {
                ui.label(&status.text);
            }
            None => {
                ui.weak("Ready");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fps_over_one_second_window() {
        let mut stats = FrameStats::new();
        for i in 0..=60 {
            stats.tick(i as f64 / 60.0, 1.0 / 60.0);
        }
        assert_relative_eq!(stats.fps(), 61.0, epsilon = 1e-3);
        assert_relative_eq!(stats.frame_time_ms(), 1000.0 / 60.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fps_not_reported_before_window_ends() {
        let mut stats = FrameStats::new();
        stats.tick(10.0, 0.016);
        stats.tick(10.5, 0.016);
        assert_eq!(stats.fps(), 0.0);
    }
}
