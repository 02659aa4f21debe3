//! Cursor tracking for winit hosts (feature `winit`).
//!
//! The rope only needs one position sample per frame and the current
//! viewport. [`CursorTracker`] distils winit window events into exactly that:
//!
//! ```ignore
//! fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
//!     self.cursor.handle_event(&event);
//!     if let Some(viewport) = self.cursor.take_resize() {
//!         self.rope.set_viewport(viewport)?;
//!     }
//!     if let WindowEvent::RedrawRequested = event {
//!         self.rope.tick_now(self.cursor.anchor());
//!     }
//! }
//! ```

use crate::sanitize::Rect;
use glam::Vec2;
use winit::event::WindowEvent;

/// Last known cursor position and window size.
#[derive(Debug, Clone)]
pub struct CursorTracker {
    position: Option<Vec2>,
    inside: bool,
    viewport: Rect,
    pending_resize: Option<Rect>,
}

impl CursorTracker {
    /// Create a tracker for a window of the given physical size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: None,
            inside: false,
            viewport: Rect::from_size(width as f32, height as f32),
            pending_resize: None,
        }
    }

    /// Anchor sample for this frame: the last cursor position, or the
    /// viewport centre before the cursor has been seen.
    pub fn anchor(&self) -> Vec2 {
        self.position.unwrap_or_else(|| self.viewport.center())
    }

    /// Whether the cursor is currently over the window.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Current viewport in physical pixels.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Viewport change since the last call, if any.
    pub fn take_resize(&mut self) -> Option<Rect> {
        self.pending_resize.take()
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.move_to(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorEntered { .. } => self.inside = true,
            // Keep the last position so the rope stays where the cursor left.
            WindowEvent::CursorLeft { .. } => self.inside = false,
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            _ => {}
        }
    }

    fn move_to(&mut self, position: Vec2) {
        self.position = Some(position);
        self.inside = true;
    }

    fn resize(&mut self, width: u32, height: u32) {
        let viewport = Rect::from_size(width as f32, height as f32);
        if viewport.is_valid() && viewport != self.viewport {
            self.viewport = viewport;
            self.pending_resize = Some(viewport);
        }
    }
}
