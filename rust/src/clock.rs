use chrono::{DateTime, FixedOffset, Local};

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall-clock time in the local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// RFC 1123 rendering with a two-digit day, e.g. `Tue, 01 Apr 2025 10:00:00 +0000`.
pub fn rfc1123(ts: &DateTime<FixedOffset>) -> String {
    ts.format(RFC1123_FORMAT).to_string()
}
