//! An empty window cleared to a flat colour

use super::{clear_color, Lesson};
use crate::{error::Result, gfx::rendering::FrameContext};

pub struct HelloWindow {
    clear: wgpu::Color,
}

impl HelloWindow {
    pub fn new() -> Self {
        Self {
            clear: clear_color(0.5, 0.5, 0.3),
        }
    }
}

impl Default for HelloWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl Lesson for HelloWindow {
    fn name(&self) -> &'static str {
        "hello-window"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        // clearing is the whole frame
        let _pass = frame.begin_pass(self.clear);
        Ok(())
    }
}
