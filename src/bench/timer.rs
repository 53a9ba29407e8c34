//! Scoped wall-clock timing for the operation under test
//!
//! The timer is started immediately before the measured call and records its
//! reading when dropped, so the sample exists whether the call returns `Ok`,
//! returns `Err`, or unwinds.

use std::time::{Duration, Instant};

/// Guard that writes the elapsed time into `slot` when it goes out of scope
pub struct ScopedTimer<'a> {
    start: Instant,
    slot: &'a mut Option<Duration>,
}

impl<'a> ScopedTimer<'a> {
    pub fn start(slot: &'a mut Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        *self.slot = Some(self.start.elapsed());
    }
}

/// Output of a measured call together with its wall-clock time
#[derive(Debug)]
pub struct Timed<R> {
    pub elapsed: Duration,
    pub output: R,
}

/// Runs `f` under a [`ScopedTimer`]
///
/// Nothing else happens between starting the clock and calling `f`.
pub fn measure<R, F>(f: F) -> Timed<R>
where
    F: FnOnce() -> R,
{
    let mut elapsed = None;
    let output = {
        let _timer = ScopedTimer::start(&mut elapsed);
        f()
    };

    Timed {
        // The guard has always run by now
        elapsed: elapsed.unwrap_or_default(),
        output,
    }
}
