//! Lifecycle observer trait and a closure-backed implementation.

use mf_core::SimTime;

use crate::{SimError, SimResult, StepReport};

/// Callbacks invoked by [`SimEngine::advance_to`][crate::SimEngine::advance_to]
/// as entities move through `pending → active → arrived`.
///
/// The three lifecycle hooks are required; the frame hooks default to
/// no-ops.
///
/// # Example — arrival counter
///
/// ```rust,ignore
/// struct Arrivals(usize);
///
/// impl LifecycleObserver<Refugee> for Arrivals {
///     fn on_started(&mut self, _r: &Refugee) {}
///     fn on_updated(&mut self, _r: &Refugee) {}
///     fn on_finished(&mut self, _r: &Refugee) { self.0 += 1; }
/// }
/// ```
pub trait LifecycleObserver<E> {
    /// Called at the start of each frame, before activation.
    fn on_frame_start(&mut self, _now: SimTime) {}

    /// The entity has just been activated.
    fn on_started(&mut self, entity: &E);

    /// The entity moved and is still en route.
    fn on_updated(&mut self, entity: &E);

    /// The entity has arrived and left the active set for good.
    fn on_finished(&mut self, entity: &E);

    /// Called at the end of each frame with that frame's counts.
    fn on_frame_end(&mut self, _now: SimTime, _report: &StepReport) {}
}

/// A [`LifecycleObserver`] that does nothing.
pub struct NoopObserver;

impl<E> LifecycleObserver<E> for NoopObserver {
    fn on_started(&mut self, _entity: &E) {}
    fn on_updated(&mut self, _entity: &E) {}
    fn on_finished(&mut self, _entity: &E) {}
}

// ── FnObserver ────────────────────────────────────────────────────────────────

type Callback<'a, E> = Box<dyn FnMut(&E) + 'a>;

/// A [`LifecycleObserver`] assembled from three closures.
///
/// Built with [`FnObserver::builder`]; `build` fails if any callback is
/// missing, so an incompletely wired observer never reaches the frame loop.
pub struct FnObserver<'a, E> {
    on_started:  Callback<'a, E>,
    on_updated:  Callback<'a, E>,
    on_finished: Callback<'a, E>,
}

impl<'a, E> FnObserver<'a, E> {
    pub fn builder() -> FnObserverBuilder<'a, E> {
        FnObserverBuilder::default()
    }
}

impl<E> LifecycleObserver<E> for FnObserver<'_, E> {
    fn on_started(&mut self, entity: &E) {
        (self.on_started)(entity)
    }

    fn on_updated(&mut self, entity: &E) {
        (self.on_updated)(entity)
    }

    fn on_finished(&mut self, entity: &E) {
        (self.on_finished)(entity)
    }
}

pub struct FnObserverBuilder<'a, E> {
    on_started:  Option<Callback<'a, E>>,
    on_updated:  Option<Callback<'a, E>>,
    on_finished: Option<Callback<'a, E>>,
}

impl<E> Default for FnObserverBuilder<'_, E> {
    fn default() -> Self {
        Self { on_started: None, on_updated: None, on_finished: None }
    }
}

impl<'a, E> FnObserverBuilder<'a, E> {
    pub fn on_started(mut self, f: impl FnMut(&E) + 'a) -> Self {
        self.on_started = Some(Box::new(f));
        self
    }

    pub fn on_updated(mut self, f: impl FnMut(&E) + 'a) -> Self {
        self.on_updated = Some(Box::new(f));
        self
    }

    pub fn on_finished(mut self, f: impl FnMut(&E) + 'a) -> Self {
        self.on_finished = Some(Box::new(f));
        self
    }

    /// # Errors
    ///
    /// [`SimError::CallbackNotConfigured`] naming the first missing callback.
    pub fn build(self) -> SimResult<FnObserver<'a, E>> {
        Ok(FnObserver {
            on_started:  self.on_started.ok_or(SimError::CallbackNotConfigured("on_started"))?,
            on_updated:  self.on_updated.ok_or(SimError::CallbackNotConfigured("on_updated"))?,
            on_finished: self.on_finished.ok_or(SimError::CallbackNotConfigured("on_finished"))?,
        })
    }
}
