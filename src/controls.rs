use crate::{
    config::ViewerConfig,
    transform::{Transformations, aspect_ratio},
};

/// Input relevant to the viewers, independent of the windowing library.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewerEvent {
    /// The framebuffer was resized.
    Resize { width: u32, height: u32 },
    /// The cursor moved by this many pixels with the left button held down.
    MouseDrag { dx: f32, dy: f32 },
    Scroll { dy: f32 },
    Escape,
}

/// Radians of rotation per pixel of mouse drag.
pub const DRAG_SENSITIVITY: f32 = 0.05;

/// Updates the [`Transformations`] of a viewer in response to input.
#[derive(Debug, Clone)]
pub struct Controls {
    pub transformations: Transformations,
    pub window_size: (u32, u32),
    pub drag_sensitivity: f32,
    pub should_close: bool,
}

impl Controls {
    pub fn new(width: u32, height: u32) -> Self {
        Controls {
            transformations: Transformations::new(aspect_ratio(width, height)),
            window_size: (width, height),
            drag_sensitivity: DRAG_SENSITIVITY,
            should_close: false,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.window.width, config.window.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.window_size.0, self.window_size.1)
    }

    /// Returns true if the scene needs to be redrawn.
    pub fn handle(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::Resize { width, height } => {
                self.window_size = (width, height);
                self.transformations.update_projection(self.aspect_ratio());
                true
            }
            ViewerEvent::MouseDrag { dx, dy } => {
                let s = self.drag_sensitivity;
                // Vertical motion turns about X, horizontal about Y.
                self.transformations.rotate_view(s * dy, s * dx);
                self.transformations.update_view();
                true
            }
            ViewerEvent::Scroll { dy } => {
                self.transformations.update_fov(dy);
                self.transformations.update_projection(self.aspect_ratio());
                true
            }
            ViewerEvent::Escape => {
                self.should_close = true;
                false
            }
        }
    }

    /// Per frame update. Returns true if the scene needs to be redrawn.
    pub fn tick(&mut self, config: &ViewerConfig) -> bool {
        if config.constant_rotation {
            self.transformations.constant_rotation();
            true
        } else {
            false
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

#[cfg(test)]
mod test {
    use super::{Controls, ViewerEvent};
    use crate::{
        config::ViewerConfig,
        macros::{assert_f32_eq, assert_mat4_eq},
        transform::Transformations,
    };

    #[test]
    fn t_resize() {
        let mut controls = Controls::default();
        assert!(controls.handle(ViewerEvent::Resize {
            width: 400,
            height: 400
        }));
        assert_eq!(controls.window_size, (400, 400));
        let mut expected = Transformations::default();
        expected.update_projection(1.0);
        assert_mat4_eq!(
            controls.transformations.projection(),
            expected.projection()
        );
        // Minimized windows don't break the projection.
        controls.handle(ViewerEvent::Resize {
            width: 400,
            height: 0,
        });
        assert!(controls.transformations.projection().is_finite());
    }

    #[test]
    fn t_drag() {
        let mut controls = Controls::default();
        assert!(controls.handle(ViewerEvent::MouseDrag { dx: 4.0, dy: 2.0 }));
        let mut expected = Transformations::default();
        expected.rotate_view(0.1, 0.2);
        expected.update_view();
        assert_mat4_eq!(controls.transformations.view(), expected.view());
    }

    #[test]
    fn t_scroll() {
        let mut controls = Controls::default();
        assert!(controls.handle(ViewerEvent::Scroll { dy: 5.0 }));
        assert_f32_eq!(controls.transformations.fov(), 40.0);
        let mut expected = Transformations::default();
        expected.update_fov(5.0);
        expected.update_projection(800.0 / 600.0);
        assert_mat4_eq!(
            controls.transformations.projection(),
            expected.projection()
        );
    }

    #[test]
    fn t_escape() {
        let mut controls = Controls::default();
        assert!(!controls.should_close);
        assert!(!controls.handle(ViewerEvent::Escape));
        assert!(controls.should_close);
    }

    #[test]
    fn t_tick() {
        let mut controls = Controls::default();
        let mut config = ViewerConfig::default();
        assert!(!controls.tick(&config));
        assert_eq!(controls.transformations.step(), 0);
        config.constant_rotation = true;
        assert!(controls.tick(&config));
        assert!(controls.tick(&config));
        assert_eq!(controls.transformations.step(), 2);
    }
}
