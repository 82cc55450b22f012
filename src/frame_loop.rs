//! Cooperative frame loop. The host's display refresh calls [`FrameLoop::tick`];
//! each tick evaluates one frame and re-requests the next one unless the loop
//! was cancelled in between.

use crate::animation::{Frame, MotionTable, PoseEvaluator, RigState};
use crate::model::JointId;
use crate::renderer::camera::OrbitView;
use nalgebra_glm as glm;

/// Receives evaluated frames, typically a renderer.
pub trait FrameSink {
    fn submit(&mut self, frame: &Frame);
}

impl FrameSink for Vec<Frame> {
    fn submit(&mut self, frame: &Frame) {
        self.push(frame.clone());
    }
}

/// Frames counted over one-second windows
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: f32,
    frames: u32,
    last_fps: Option<u32>,
}

impl FpsCounter {
    /// Count a frame. Returns the frame count of a window when one closes.
    pub fn record(&mut self, seconds: f32) -> Option<u32> {
        self.frames += 1;
        if seconds - self.window_start >= 1.0 {
            let fps = self.frames;
            self.frames = 0;
            self.window_start = seconds;
            self.last_fps = Some(fps);
            return Some(fps);
        }
        None
    }

    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }
}

pub struct FrameLoop {
    evaluator: PoseEvaluator,
    state: RigState,
    root: glm::Mat4,
    view: OrbitView,
    scheduled: bool,
    fps: FpsCounter,
    frames_rendered: u64,
}

impl FrameLoop {
    pub fn new(evaluator: PoseEvaluator) -> Self {
        Self {
            evaluator,
            state: RigState::new(),
            root: glm::identity(),
            view: OrbitView::default(),
            scheduled: false,
            fps: FpsCounter::default(),
            frames_rendered: 0,
        }
    }

    pub fn with_root(mut self, root: glm::Mat4) -> Self {
        self.root = root;
        self
    }

    pub fn with_view(mut self, view: OrbitView) -> Self {
        self.view = view;
        self
    }

    pub fn state(&self) -> &RigState {
        &self.state
    }

    pub fn evaluator(&self) -> &PoseEvaluator {
        &self.evaluator
    }

    pub fn view(&self) -> &OrbitView {
        &self.view
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Request the first frame
    pub fn start(&mut self) {
        self.scheduled = true;
    }

    /// Drop the pending frame request; nothing else needs tearing down.
    pub fn cancel(&mut self) {
        self.scheduled = false;
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn set_animation(&mut self, enabled: bool) {
        self.state.animation_enabled = enabled;
    }

    pub fn toggle_animation(&mut self) {
        self.state.animation_enabled = !self.state.animation_enabled;
    }

    pub fn trigger_explosion(&mut self, seconds: f32) {
        self.state.explosion.trigger(seconds);
    }

    pub fn release_explosion(&mut self) {
        self.state.explosion.release();
    }

    pub fn set_base(&mut self, joint: JointId, value: f32) {
        self.state.set_base(joint, value);
    }

    pub fn set_motions(&mut self, motions: MotionTable) {
        self.evaluator.set_motions(motions);
    }

    /// Mouse drag over the canvas, in pixels
    pub fn drag_view(&mut self, delta_x: f32, delta_y: f32) {
        self.view.drag(delta_x, delta_y);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    /// Stops animation and clears explosion and bases, like the reset button.
    pub fn reset(&mut self) {
        self.state.animation_enabled = false;
        self.state.reset();
    }

    /// Runs one scheduled frame. Returns false (and does nothing) when no
    /// frame was requested.
    pub fn tick(&mut self, seconds: f32, sink: &mut impl FrameSink) -> bool {
        if !self.scheduled {
            return false;
        }
        self.scheduled = false;

        let mut frame = self.evaluator.update_at(&mut self.state, seconds, &self.root);
        frame.view = self.view.matrix();
        sink.submit(&frame);
        self.frames_rendered += 1;

        if let Some(fps) = self.fps.record(seconds) {
            log::debug!(
                "fps: {} | magnitude: {:.3} | animating: {}",
                fps,
                frame.magnitude,
                self.state.animation_enabled
            );
        }

        // Request the next frame
        self.scheduled = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_requires_a_request() {
        let mut frames: Vec<Frame> = Vec::new();
        let mut frame_loop = FrameLoop::new(PoseEvaluator::bunny());
        assert!(!frame_loop.tick(0.0, &mut frames));

        frame_loop.start();
        assert!(frame_loop.tick(0.0, &mut frames));
        assert!(frame_loop.is_scheduled());

        frame_loop.cancel();
        assert!(!frame_loop.tick(0.016, &mut frames));
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn fps_window_closes_after_one_second() {
        let mut fps = FpsCounter::default();
        let mut reported = None;
        for i in 0..=60 {
            if let Some(n) = fps.record(i as f32 / 60.0) {
                reported = Some(n);
            }
        }
        assert_eq!(reported, Some(61));
        assert_eq!(fps.last_fps(), Some(61));
    }

    #[test]
    fn frames_carry_the_current_view() {
        let mut frames: Vec<Frame> = Vec::new();
        let mut frame_loop =
            FrameLoop::new(PoseEvaluator::bunny()).with_view(OrbitView::new(15.0, 0.0, 0.0));
        frame_loop.start();
        frame_loop.tick(0.0, &mut frames);
        assert_eq!(frames[0].view, frame_loop.view().matrix());
        assert_ne!(frames[0].view, glm::identity::<f32, 4>());
    }

    #[test]
    fn reset_stops_animation_too() {
        let mut frame_loop = FrameLoop::new(PoseEvaluator::bunny());
        frame_loop.toggle_animation();
        frame_loop.set_base(JointId::Ear, 12.0);
        frame_loop.reset();
        assert!(!frame_loop.state().animation_enabled);
        assert_eq!(frame_loop.state().base(JointId::Ear), 0.0);
    }
}
