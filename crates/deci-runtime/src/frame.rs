//! Frame loop - read clock, convert, draw, repeat
//!
//! The loop only reads the offset; input handlers are the only writers.
//! It runs until the shutdown signal fires.

use std::time::{Duration, Instant};

use deci_core::{DecimalTime, DeciResult, EpochMillis, TimeSystem, UtcOffset};
use deci_face::{ClockFace, FaceStyle, ReadoutTarget, Readouts, Surface};
use deci_time::{local_time_of_day, DecimalConverter, WallClock};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::ClockConfig;

#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    pub frames: u64,
    pub last_frame_duration: Duration,
    pub max_frame_duration: Duration,
}

/// Everything produced for one frame
#[derive(Clone, Debug)]
pub struct Frame {
    pub instant: EpochMillis,
    pub offset: UtcOffset,
    pub time: DecimalTime,
    pub readouts: Readouts,
}

/// Where frames are drawn
pub trait Presenter {
    /// Drawing surface and readout elements for the next frame
    fn targets(&mut self) -> (&mut dyn Surface, &mut dyn ReadoutTarget);

    /// Called after a frame has been drawn
    fn present(&mut self, frame: &Frame) -> DeciResult<()>;
}

/// Draws frames from a wall clock
pub struct FrameRenderer<C: WallClock> {
    clock: C,
    converter: DecimalConverter,
    face: ClockFace,
    stats: FrameStats,
}

impl<C: WallClock> FrameRenderer<C> {
    pub fn new(clock: C, system: TimeSystem, style: FaceStyle) -> Self {
        FrameRenderer {
            clock,
            converter: DecimalConverter::new(system),
            face: ClockFace::with_style(system, style),
            stats: FrameStats::default(),
        }
    }

    pub fn from_config(clock: C, config: &ClockConfig) -> Self {
        Self::new(
            clock,
            TimeSystem::DECIMAL,
            FaceStyle::default().with_radius(config.radius),
        )
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Draw one frame for `offset`
    pub fn render(
        &mut self,
        offset: UtcOffset,
        surface: &mut dyn Surface,
        readouts: &mut dyn ReadoutTarget,
    ) -> Frame {
        let start = Instant::now();

        let instant = self.clock.now();
        let time = self.converter.convert(instant, offset);
        self.face.draw(surface, &time);

        let text = Readouts::new(&local_time_of_day(instant), &time);
        text.apply(readouts);

        let elapsed = start.elapsed();
        self.stats.frames += 1;
        self.stats.last_frame_duration = elapsed;
        self.stats.max_frame_duration = self.stats.max_frame_duration.max(elapsed);
        tracing::trace!(
            frame = self.stats.frames,
            decimal = %text.decimal,
            ?elapsed,
            "frame drawn"
        );

        Frame {
            instant,
            offset,
            time,
            readouts: text,
        }
    }
}

/// Periodic frame loop
///
/// The offset arrives through a `watch` channel fed by the selector, so a
/// frame never waits on the selector lock or a preference write.
pub struct FrameLoop<C: WallClock> {
    renderer: FrameRenderer<C>,
    offset: watch::Receiver<UtcOffset>,
    interval: Duration,
}

impl<C: WallClock> FrameLoop<C> {
    pub fn new(
        renderer: FrameRenderer<C>,
        offset: watch::Receiver<UtcOffset>,
        interval: Duration,
    ) -> Self {
        FrameLoop {
            renderer,
            offset,
            interval,
        }
    }

    pub fn renderer(&self) -> &FrameRenderer<C> {
        &self.renderer
    }

    /// Draw one frame with the current offset
    pub fn step(&mut self, presenter: &mut dyn Presenter) -> DeciResult<Frame> {
        let offset = *self.offset.borrow();
        let (surface, readouts) = presenter.targets();
        let frame = self.renderer.render(offset, surface, readouts);
        presenter.present(&frame)?;
        Ok(frame)
    }

    /// Draw frames every `interval` until `shutdown` becomes true or its
    /// sender is dropped. Missed ticks are skipped, never replayed.
    pub async fn run(
        &mut self,
        presenter: &mut dyn Presenter,
        mut shutdown: watch::Receiver<bool>,
    ) -> DeciResult<FrameStats> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(interval = ?self.interval, "frame loop started");

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    self.step(presenter)?;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        let stats = self.renderer.stats().clone();
        tracing::info!(
            frames = stats.frames,
            max = ?stats.max_frame_duration,
            "frame loop stopped"
        );
        Ok(stats)
    }
}
