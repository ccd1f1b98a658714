//! Live coordinate readout next to the crosshair.
//!
//! A [`ReadoutTicker`] polls the pointer on the host's `calloop` event loop
//! and, whenever [`InputState::should_show_coordinate_readout`] allows it,
//! rebuilds the readout label. Label sizes come from glyph metrics measured
//! once up front; nothing is measured per tick.

use crate::config::ReadoutConfig;
use crate::draw::GlyphMetrics;
use crate::input::InputState;
use crate::util::{Point, Rect};
use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use thiserror::Error;

/// Gap between the pointer hotspot and the label.
const LABEL_OFFSET: f64 = 12.0;

#[derive(Debug, Error)]
pub enum ReadoutError {
    #[error("failed to register readout timer: {0}")]
    Register(#[source] calloop::Error),
}

/// Coordinate label to draw beside the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadoutCursor {
    /// Pointer hotspot
    pub position: Point,
    pub label: String,
    /// Background box of the label, below and to the right of the pointer
    pub label_rect: Rect,
    pub font_size: f64,
    pub padding: f64,
}

/// Builds readout labels from pre-measured glyph metrics.
#[derive(Debug, Clone)]
pub struct ReadoutBuilder {
    metrics: GlyphMetrics,
    padding: f64,
}

impl ReadoutBuilder {
    pub fn new(metrics: GlyphMetrics, padding: f64) -> Self {
        Self { metrics, padding }
    }

    /// Builder with estimated metrics, for hosts without a text backend.
    pub fn from_config(config: &ReadoutConfig) -> Self {
        Self::new(GlyphMetrics::estimated(config.font_size), config.padding)
    }

    pub fn build(&self, position: Point) -> ReadoutCursor {
        let label = format!("({}, {})", position.x.round() as i64, position.y.round() as i64);
        let width = self.metrics.text_width(&label) + self.padding * 2.0;
        let height = self.metrics.line_height() + self.padding * 2.0;
        let label_rect = Rect::new(
            position.x + LABEL_OFFSET,
            position.y - LABEL_OFFSET - height,
            width,
            height,
        );

        ReadoutCursor {
            position,
            label,
            label_rect,
            font_size: self.metrics.font_size(),
            padding: self.padding,
        }
    }
}

/// Periodic readout refresh registered on a `calloop` loop.
///
/// The timer holds only a weak reference to the state; once the state is
/// gone the timer removes itself. `start` and `stop` are idempotent.
pub struct ReadoutTicker<'l, D> {
    handle: LoopHandle<'l, D>,
    interval: Duration,
    token: Option<RegistrationToken>,
}

impl<'l, D> ReadoutTicker<'l, D> {
    pub fn new(handle: LoopHandle<'l, D>, interval: Duration) -> Self {
        Self {
            handle,
            interval,
            token: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    /// Registers the timer; a running ticker is left as is.
    pub fn start(
        &mut self,
        state: Weak<RefCell<InputState>>,
        builder: ReadoutBuilder,
    ) -> Result<(), ReadoutError> {
        if self.token.is_some() {
            return Ok(());
        }

        let interval = self.interval;
        let token = self
            .handle
            .insert_source(Timer::from_duration(interval), move |_deadline, _, _data| {
                let Some(state) = state.upgrade() else {
                    log::debug!("Readout state dropped; removing timer");
                    return TimeoutAction::Drop;
                };
                // Skip the tick if an event handler still holds the state.
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.refresh_readout(&builder);
                }
                TimeoutAction::ToDuration(interval)
            })
            .map_err(|err| ReadoutError::Register(err.error))?;

        log::debug!("Readout ticker started ({} ms)", interval.as_millis());
        self.token = Some(token);
        Ok(())
    }

    /// Removes the timer; stopping twice or before starting does nothing.
    pub fn stop(&mut self) {
        if let Some(token) = self.token.take() {
            self.handle.remove(token);
            log::debug!("Readout ticker stopped");
        }
    }
}

impl<D> Drop for ReadoutTicker<'_, D> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Interaction state plus its readout tick, scoped to one overlay showing.
///
/// `show` starts the tick, `hide` stops it. Dropping the surface stops the
/// tick before the state is released.
pub struct InteractionSurface<'l, D> {
    state: Rc<RefCell<InputState>>,
    ticker: ReadoutTicker<'l, D>,
    builder: ReadoutBuilder,
    readout_enabled: bool,
    visible: bool,
}

impl<'l, D> InteractionSurface<'l, D> {
    pub fn new(
        state: InputState,
        handle: LoopHandle<'l, D>,
        config: &ReadoutConfig,
        builder: ReadoutBuilder,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            ticker: ReadoutTicker::new(handle, Duration::from_millis(config.interval_ms)),
            builder,
            readout_enabled: config.enabled,
            visible: false,
        }
    }

    /// Shared state for the host's event handlers.
    pub fn state(&self) -> &Rc<RefCell<InputState>> {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn show(&mut self) -> Result<(), ReadoutError> {
        if self.readout_enabled {
            self.ticker
                .start(Rc::downgrade(&self.state), self.builder.clone())?;
        }
        self.visible = true;
        self.state.borrow_mut().needs_redraw = true;
        Ok(())
    }

    pub fn hide(&mut self) {
        self.ticker.stop();
        self.visible = false;
        let mut state = self.state.borrow_mut();
        state.cancel_gesture();
        state.on_pointer_exit();
    }
}

impl<D> Drop for InteractionSurface<'_, D> {
    fn drop(&mut self) {
        self.ticker.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::Mode;
    use calloop::EventLoop;

    fn state() -> InputState {
        InputState::from_config(&Config::default()).unwrap()
    }

    fn builder() -> ReadoutBuilder {
        ReadoutBuilder::new(GlyphMetrics::estimated(10.0), 2.0)
    }

    fn tick(event_loop: &mut EventLoop<'_, ()>) {
        event_loop
            .dispatch(Some(Duration::from_millis(50)), &mut ())
            .unwrap();
    }

    #[test]
    fn label_uses_premeasured_metrics() {
        let readout = builder().build(Point::new(12.4, 7.6));
        assert_eq!(readout.label, "(12, 8)");
        // 7 glyphs at 6.0 each plus padding
        assert!((readout.label_rect.width - 46.0).abs() < 1e-9);
        assert!(readout.label_rect.max_y() < readout.position.y);
    }

    #[test]
    fn tick_refreshes_readout_when_guard_allows() {
        let mut event_loop: EventLoop<()> = EventLoop::try_new().unwrap();
        let state = Rc::new(RefCell::new(state()));
        let mut ticker = ReadoutTicker::new(event_loop.handle(), Duration::from_millis(1));
        ticker.start(Rc::downgrade(&state), builder()).unwrap();

        {
            let mut state = state.borrow_mut();
            state.set_mode(Mode::Rectangle);
            state.on_pointer_move(Point::new(40.0, 30.0));
        }
        tick(&mut event_loop);
        assert_eq!(
            state.borrow().readout().map(|r| r.label.as_str()),
            Some("(40, 30)")
        );

        state.borrow_mut().set_mode(Mode::Select);
        tick(&mut event_loop);
        assert!(state.borrow().readout().is_none());
    }

    #[test]
    fn stop_is_idempotent() {
        let event_loop: EventLoop<()> = EventLoop::try_new().unwrap();
        let state = Rc::new(RefCell::new(state()));
        let mut ticker = ReadoutTicker::new(event_loop.handle(), Duration::from_millis(5));

        ticker.stop();
        ticker.start(Rc::downgrade(&state), builder()).unwrap();
        ticker.start(Rc::downgrade(&state), builder()).unwrap();
        assert!(ticker.is_running());
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
    }

    #[test]
    fn ticker_does_not_keep_state_alive() {
        let mut event_loop: EventLoop<()> = EventLoop::try_new().unwrap();
        let state = Rc::new(RefCell::new(state()));
        let weak = Rc::downgrade(&state);
        let mut ticker = ReadoutTicker::new(event_loop.handle(), Duration::from_millis(1));
        ticker.start(weak.clone(), builder()).unwrap();

        drop(state);
        assert!(weak.upgrade().is_none());
        tick(&mut event_loop);
        ticker.stop();
    }

    #[test]
    fn surface_ticks_only_while_shown() {
        let event_loop: EventLoop<()> = EventLoop::try_new().unwrap();
        let config = Config::default();
        let mut surface =
            InteractionSurface::new(state(), event_loop.handle(), &config.readout, builder());

        assert!(!surface.is_ticking());
        surface.show().unwrap();
        assert!(surface.is_ticking());
        assert!(surface.is_visible());

        surface.hide();
        surface.hide();
        assert!(!surface.is_ticking());
        assert!(!surface.is_visible());
    }

    #[test]
    fn disabled_readout_never_ticks() {
        let event_loop: EventLoop<()> = EventLoop::try_new().unwrap();
        let mut config = Config::default();
        config.readout.enabled = false;
        let mut surface =
            InteractionSurface::new(state(), event_loop.handle(), &config.readout, builder());
        surface.show().unwrap();
        assert!(!surface.is_ticking());
    }
}
