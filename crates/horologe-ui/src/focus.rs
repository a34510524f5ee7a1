//! Keyboard focus management.
//!
//! [`FocusManager`] lives on [`crate::scene::UiScene`] and is threaded into
//! [`crate::painter::Painter`] and [`crate::constraints::LayoutCtx`] each frame.
//!
//! # How focus works
//!
//! 1. During **on_event**, focusable widgets call `ctx.request_focus(id)` when they
//!    receive a `Click`. The scene clears focus before routing a click, so a
//!    click that nobody claims leaves nothing focused. Tab cycles through the
//!    widgets registered by the previous paint.
//! 2. After the input events, [`FocusManager::commit`] applies any pending
//!    request and reports what changed since the previous commit. The scene
//!    turns that into `FocusLost`/`FocusGained`.
//! 3. During **paint**, focusable widgets call `painter.register_focusable(id)` to
//!    enroll in Tab cycling, and `painter.is_focused(id)` to query current state.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FOCUS_ID: AtomicU64 = AtomicU64::new(1);

// ── FocusId ───────────────────────────────────────────────────────────────

/// Unique identifier for a focusable widget.
///
/// Allocated once per widget construction and stable for its lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FocusId(u64);

impl FocusId {
    pub fn new() -> Self {
        FocusId(NEXT_FOCUS_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for FocusId {
    fn default() -> Self {
        Self::new()
    }
}

// ── FocusChange ───────────────────────────────────────────────────────────

/// Focus transition observed by [`FocusManager::commit`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FocusChange {
    pub lost: Option<FocusId>,
    pub gained: Option<FocusId>,
}

impl FocusChange {
    pub fn is_empty(&self) -> bool {
        self.lost.is_none() && self.gained.is_none()
    }
}

// ── FocusManager ──────────────────────────────────────────────────────────

/// Tracks keyboard focus across the widget tree.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<FocusId>,
    /// Focus IDs registered by the last paint, in paint order (for Tab cycling).
    registered: Vec<FocusId>,
    /// Focus requested this frame (applied in [`FocusManager::commit`]).
    requested: Option<FocusId>,
    /// Focus as of the last `commit`; the baseline for change detection.
    reported: Option<FocusId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn focused(&self) -> Option<FocusId> {
        self.focused
    }

    #[inline]
    pub fn is_focused(&self, id: FocusId) -> bool {
        self.focused == Some(id)
    }

    #[inline]
    pub fn request_focus(&mut self, id: FocusId) {
        self.requested = Some(id);
    }

    /// Register `id` as focusable this frame. Must be called in paint order.
    #[inline]
    pub fn register(&mut self, id: FocusId) {
        self.registered.push(id);
    }

    /// Move focus to the next (or previous, if `reverse`) registered widget.
    pub fn advance(&mut self, reverse: bool) {
        if self.registered.is_empty() {
            return;
        }
        let n = self.registered.len();
        let next = match self.focused.and_then(|f| self.registered.iter().position(|&x| x == f)) {
            None if reverse => n - 1,
            None => 0,
            Some(i) if reverse => (i + n - 1) % n,
            Some(i) => (i + 1) % n,
        };
        self.focused = Some(self.registered[next]);
        self.requested = None;
    }

    /// Drop focus and any pending request.
    #[inline]
    pub fn clear(&mut self) {
        self.focused = None;
        self.requested = None;
    }

    /// Forget last frame's registrations; called right before paint.
    pub fn begin_paint(&mut self) {
        self.registered.clear();
    }

    /// Apply the pending request and report the transition since the
    /// previous call.
    pub fn commit(&mut self) -> FocusChange {
        if let Some(req) = self.requested.take() {
            self.focused = Some(req);
        }

        let change = if self.focused == self.reported {
            FocusChange::default()
        } else {
            FocusChange { lost: self.reported, gained: self.focused }
        };
        self.reported = self.focused;
        change
    }
}
