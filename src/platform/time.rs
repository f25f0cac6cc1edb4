//! Embassy-based time source implementation.

use confdb_core::traits::TimeSource;

/// Time source backed by the Embassy time driver
///
/// # Example
///
/// ```ignore
/// use confdb::platform::EmbassyTime;
/// use confdb_core::traits::TimeSource;
///
/// let time = EmbassyTime;
/// let now = time.now_ms();
/// ```
#[derive(Clone, Copy, Default)]
pub struct EmbassyTime;

impl TimeSource for EmbassyTime {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}
