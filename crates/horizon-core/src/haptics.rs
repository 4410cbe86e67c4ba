//! Vibration patterns requested by the watchface.

/// Ordered vibrate/pause segments in milliseconds, starting with a vibrate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HapticPattern {
    pub durations: &'static [u32],
}

/// Three short pulses at the top of each daytime hour.
pub const HOURLY_CHIME: HapticPattern = HapticPattern {
    durations: &[100, 100, 100],
};

/// Companion link regained.
pub const LINK_CONNECT: HapticPattern = HapticPattern {
    durations: &[50, 100, 50, 100, 50],
};

/// Companion link lost. Longer pulses than the connect pattern.
pub const LINK_DISCONNECT: HapticPattern = HapticPattern {
    durations: &[300, 100, 300, 100, 300],
};
