/// Slack for comparing accumulated step times against the delay.
const TIME_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
enum ReplayState {
    Idle,
    Running {
        /// Display characters still to drop, snapshot at start.
        pending: Vec<char>,
        next: usize,
        /// Seconds until the next letter.
        countdown: f32,
    },
}

/// What a replay tick asks the caller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayEvent {
    /// Drop one free-fall letter for this character.
    Spawn(char),
    /// The last letter has been dropped.
    Finished,
}

/// Re-drops the whole text one letter at a time, with a fixed delay before
/// each letter. At most one replay runs at a time and it always runs to the
/// end, whatever happens to the text meanwhile.
#[derive(Debug, Clone)]
pub struct ReplayOrchestrator {
    state: ReplayState,
    delay: f32,
}

impl ReplayOrchestrator {
    pub fn new(delay: f32) -> Self {
        Self {
            state: ReplayState::Idle,
            delay: delay.max(0.0),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ReplayState::Running { .. })
    }

    /// Letters dropped so far and total, while running.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match &self.state {
            ReplayState::Running { pending, next, .. } => Some((*next, pending.len())),
            ReplayState::Idle => None,
        }
    }

    /// Begin a replay of `glyphs`. Returns false, changing nothing, when a
    /// replay is already running or there is nothing to replay.
    pub fn start(&mut self, glyphs: impl IntoIterator<Item = char>) -> bool {
        if self.is_running() {
            return false;
        }
        let pending: Vec<char> = glyphs.into_iter().collect();
        if pending.is_empty() {
            return false;
        }
        self.state = ReplayState::Running {
            pending,
            next: 0,
            countdown: self.delay,
        };
        true
    }

    /// Advance by `dt` seconds and report letters due.
    pub fn tick(&mut self, dt: f32) -> Vec<ReplayEvent> {
        let mut out = Vec::new();
        let ReplayState::Running { pending, next, countdown } = &mut self.state else {
            return out;
        };

        *countdown -= dt;
        while *countdown <= TIME_EPSILON && *next < pending.len() {
            out.push(ReplayEvent::Spawn(pending[*next]));
            *next += 1;
            *countdown += self.delay;
        }

        if *next >= pending.len() {
            out.push(ReplayEvent::Finished);
            self.state = ReplayState::Idle;
        }
        out
    }
}
