use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{task::JoinHandle, time};
use tracing::debug;

/// How often the hero carousel advances on its own.
pub const SLIDE_ADVANCE_PERIOD: Duration = Duration::from_millis(4000);

/// Each slide change rotates the orbiting satellites by this many degrees.
const ORBIT_DEGREES_PER_SLIDE: f64 = 30.0;

/// One promotional panel in the hero carousel. The sequence is fixed at
/// compile time and never edited by users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub id: u32,
    pub badge: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub cta: &'static str,
    pub link: &'static str,
}

static HERO_SLIDES: [Slide; 3] = [
    Slide {
        id: 1,
        badge: "New Collection",
        title: "Premium Personal Care",
        description: "Discover our curated selection of luxury skincare and beauty essentials",
        cta: "Shop Now",
        link: "/category/personal-care",
    },
    Slide {
        id: 2,
        badge: "Best Sellers",
        title: "Home Essentials",
        description: "Everything you need to keep your home fresh and clean",
        cta: "Explore",
        link: "/category/household-cleaning",
    },
    Slide {
        id: 3,
        badge: "Limited Offer",
        title: "Up to 40% Off",
        description: "Grab exclusive deals on your favorite products before they are gone",
        cta: "View Deals",
        link: "/category/personal-care",
    },
];

pub fn hero_slides() -> &'static [Slide] {
    &HERO_SLIDES
}

/// Cartesian offset of one orbiting satellite around the carousel's focal
/// element. Slots are spread evenly around the circle and the whole ring
/// turns [`ORBIT_DEGREES_PER_SLIDE`] per slide, so the layout is periodic in
/// `current_index` with period 12.
pub fn orbit_offset(
    current_index: usize,
    slot_index: usize,
    slot_count: usize,
    radius: f64,
) -> (f64, f64) {
    let slot_step = 360.0 / slot_count.max(1) as f64;
    let angle_degrees =
        slot_index as f64 * slot_step + current_index as f64 * ORBIT_DEGREES_PER_SLIDE;
    let angle = angle_degrees.to_radians();
    (angle.cos() * radius, angle.sin() * radius)
}

/// Owns the active slide index and the repeating timer that advances it.
///
/// The timer task holds only a clone of the index, so dropping or stopping
/// the scheduler aborts the task and nothing can mutate the index behind the
/// consumer's back. Manual navigation deliberately does not reset the timer;
/// the next automatic tick still fires on the original schedule.
pub struct CarouselScheduler {
    index: Arc<AtomicUsize>,
    slide_count: usize,
    period: Duration,
    timer: Option<JoinHandle<()>>,
}

impl CarouselScheduler {
    pub fn new(slide_count: usize) -> Self {
        Self::with_period(slide_count, SLIDE_ADVANCE_PERIOD)
    }

    pub fn with_period(slide_count: usize, period: Duration) -> Self {
        Self {
            index: Arc::new(AtomicUsize::new(0)),
            // A carousel with zero slides is degenerate; clamp so the
            // modular arithmetic stays well defined.
            slide_count: slide_count.max(1),
            period,
            timer: None,
        }
    }

    /// Starts the auto-advance timer. Idempotent: calling this while a
    /// timer is already live leaves that timer in place, so repeated starts
    /// never leak a second ticker.
    pub fn start(&mut self) {
        if let Some(timer) = &self.timer {
            if !timer.is_finished() {
                return;
            }
        }
        let index = Arc::clone(&self.index);
        let slide_count = self.slide_count;
        let period = self.period;
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            // The first tick of an interval completes immediately; swallow
            // it so the first advance lands one full period after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                advance_index(&index, slide_count);
            }
        }));
    }

    /// Cancels the timer. After this returns no pending tick can advance
    /// the index. Also runs on drop, so the timer's lifetime never outlives
    /// the scheduler regardless of how the owning view exits.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Next slide. Used by the timer tick and the manual "next" arrow.
    pub fn advance(&self) {
        advance_index(&self.index, self.slide_count);
    }

    /// Previous slide. Manual navigation only, never timer-driven.
    pub fn retreat(&self) {
        let _ = self.index.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
            Some((current + self.slide_count - 1) % self.slide_count)
        });
    }

    /// Jumps straight to `index` (the indicator dots). Out-of-range input
    /// is a local validation error: the call is a no-op and returns false.
    pub fn jump_to(&self, index: usize) -> bool {
        if index >= self.slide_count {
            debug!(index, slide_count = self.slide_count, "ignoring out-of-range slide jump");
            return false;
        }
        self.index.store(index, Ordering::SeqCst);
        true
    }

    pub fn current_index(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// [`orbit_offset`] evaluated at the live slide index.
    pub fn orbit_offset(&self, slot_index: usize, slot_count: usize, radius: f64) -> (f64, f64) {
        orbit_offset(self.current_index(), slot_index, slot_count, radius)
    }
}

impl Drop for CarouselScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn advance_index(index: &AtomicUsize, slide_count: usize) {
    let _ = index.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
        Some((current + 1) % slide_count)
    });
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
