/// Input event types the engine understands.
/// Generic — no game-specific semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at viewport pixel coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at viewport pixel coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to viewport pixel coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel; positive `delta` zooms in.
    Wheel { delta: f32 },
    /// The viewport was resized (CSS pixels).
    Resize { width: f32, height: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A text control now holds `value`.
    TextChanged { value: String },
    /// The host finished fetching an asset.
    AssetLoaded { name: String, payload: String },
    /// The host failed to fetch an asset.
    AssetFailed { name: String, reason: String },
    /// A page query parameter was read.
    QueryParam { key: String, value: String },
    /// A custom event from the UI layer (buttons, overlays, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
