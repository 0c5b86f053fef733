use alloc::format;
use alloc::string::String;

/// Elapsed play time in whole seconds, advanced by an external 1 s tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameTimer {
    elapsed_secs: u32,
    running: bool,
}

impl GameTimer {
    pub const TICK_MILLIS: u32 = 1_000;

    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Zeroes and starts.
    pub fn restart(&mut self) {
        self.elapsed_secs = 0;
        self.running = true;
    }

    pub fn freeze(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.running
    }
}

/// `mm:ss`, minutes keep growing past 99.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let mut timer = GameTimer::default();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 0);

        timer.restart();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 2);

        timer.freeze();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 2);

        timer.resume();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 3);

        timer.restart();
        assert_eq!(timer.elapsed_secs(), 0);
        assert!(timer.is_running());
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(6_000), "100:00");
    }
}
