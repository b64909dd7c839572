/// Outcome the host reports after trying to share the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share sheet opened.
    Opened,
    /// The link was copied to the clipboard.
    Copied,
    /// Sharing and the clipboard both failed.
    CopyFailed,
}

impl ShareOutcome {
    pub fn from_code(code: f32) -> Option<Self> {
        match code as i32 {
            0 => Some(Self::Opened),
            1 => Some(Self::Copied),
            2 => Some(Self::CopyFailed),
            _ => None,
        }
    }

    /// Message code sent back to the host.
    pub fn code(self) -> f32 {
        match self {
            Self::Opened => 0.0,
            Self::Copied => 1.0,
            Self::CopyFailed => 2.0,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Opened => "Opened sharing!",
            Self::Copied => "Link copied to clipboard!",
            Self::CopyFailed => "Failed to copy link",
        }
    }
}

/// Visibility change of the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeChange {
    Shown(ShareOutcome),
    Hidden,
}

/// A transient notification that hides itself after a fixed time.
#[derive(Debug, Clone)]
pub struct Notice {
    current: Option<ShareOutcome>,
    remaining: f32,
    duration: f32,
}

impl Notice {
    pub fn new(duration: f32) -> Self {
        Self {
            current: None,
            remaining: 0.0,
            duration,
        }
    }

    pub fn current(&self) -> Option<ShareOutcome> {
        self.current
    }

    /// Show `outcome`, restarting the timer.
    pub fn show(&mut self, outcome: ShareOutcome) -> NoticeChange {
        self.current = Some(outcome);
        self.remaining = self.duration;
        NoticeChange::Shown(outcome)
    }

    pub fn tick(&mut self, dt: f32) -> Option<NoticeChange> {
        self.current?;
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.current = None;
            return Some(NoticeChange::Hidden);
        }
        None
    }
}
