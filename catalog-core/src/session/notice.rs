#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short user-facing message shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledClear {
    generation: u64,
    due_ms: u64,
}

/// The current notice plus its pending auto-clear. Every new notice cancels
/// the previous clear, so an old deadline can never wipe a newer message.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
    generation: u64,
    pending_clear: Option<ScheduledClear>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Show `notice` and schedule its removal `clear_after_ms` from `now_ms`.
    pub fn show(&mut self, notice: Notice, now_ms: u64, clear_after_ms: u64) {
        self.cancel_clear();
        self.generation += 1;
        self.current = Some(notice);
        self.pending_clear = Some(ScheduledClear {
            generation: self.generation,
            due_ms: now_ms.saturating_add(clear_after_ms),
        });
    }

    pub fn cancel_clear(&mut self) {
        self.pending_clear = None;
    }

    pub fn dismiss(&mut self) {
        self.cancel_clear();
        self.current = None;
    }

    /// Deadline of the pending clear, if any. Lets the UI schedule a repaint.
    pub fn clear_due_at(&self) -> Option<u64> {
        self.pending_clear.map(|clear| clear.due_ms)
    }

    /// Fire the pending clear if its deadline has passed. Returns true when a
    /// notice was removed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.pending_clear {
            Some(clear) if clear.generation == self.generation && now_ms >= clear.due_ms => {
                self.pending_clear = None;
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
