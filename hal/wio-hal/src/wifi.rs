//! WiFi station abstraction
//!
//! The radio reports scan progress through a signed count: `-2` means no
//! scan has been started, `-1` means a scan is still running, and any
//! non-negative value is the number of networks found. [`ScanState`] gives
//! those sentinels names.

/// Association status of the station interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WifiStatus {
    /// Associated with the access point and holding an address
    Connected,
    /// Not associated (idle, failed, lost or still associating)
    Disconnected,
}

/// Raw scan count reported before any scan was triggered
pub const SCAN_NOT_TRIGGERED: i32 = -2;

/// Raw scan count reported while a scan is in progress
pub const SCAN_RUNNING: i32 = -1;

/// Progress of the asynchronous network scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanState {
    /// No scan started, or the last results were cleared
    NotTriggered,
    /// Scan running, results not yet available
    Running,
    /// Scan finished with this many results
    Complete(u8),
}

impl ScanState {
    /// Decode the radio's signed scan count
    ///
    /// Anything at or below `-2` is treated as "not triggered"; counts above
    /// `u8::MAX` saturate.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            SCAN_RUNNING => ScanState::Running,
            r if r <= SCAN_NOT_TRIGGERED => ScanState::NotTriggered,
            r => ScanState::Complete(r.min(u8::MAX as i32) as u8),
        }
    }

    /// Encode back into the radio's signed convention
    pub fn to_raw(self) -> i32 {
        match self {
            ScanState::NotTriggered => SCAN_NOT_TRIGGERED,
            ScanState::Running => SCAN_RUNNING,
            ScanState::Complete(n) => n as i32,
        }
    }
}

/// WiFi station link
///
/// All methods must return promptly. `begin_connect` and `start_scan` only
/// kick off work on the co-processor; completion is observed through
/// `status` and `scan_state` on later polls.
pub trait WifiLink {
    /// Current association status
    fn status(&mut self) -> WifiStatus;

    /// Start associating with the given network
    fn begin_connect(&mut self, ssid: &str, password: &str);

    /// Drop the current association, if any
    fn disconnect(&mut self);

    /// Start an asynchronous scan
    fn start_scan(&mut self);

    /// Progress of the last scan
    fn scan_state(&mut self) -> ScanState;

    /// SSID of scan result `index`
    fn scan_ssid(&self, index: u8) -> Option<&str>;

    /// Received signal strength of scan result `index` in dBm
    fn scan_rssi(&self, index: u8) -> i32;

    /// Channel number of scan result `index`
    fn scan_channel(&self, index: u8) -> i32;

    /// Discard scan results so the next poll can start a fresh scan
    fn clear_scan_results(&mut self);

    /// IPv4 address while connected
    fn local_ip(&self) -> Option<[u8; 4]> {
        None
    }
}
