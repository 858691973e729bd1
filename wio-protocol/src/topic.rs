//! Bounded MQTT topic strings

use core::fmt::Write;

use heapless::String;

/// Maximum topic length in characters
pub const MAX_TOPIC_LEN: usize = 49;

/// Topic string
pub type Topic = String<MAX_TOPIC_LEN>;

/// Root of per-device configuration topics
pub const CONFIG_ROOT: &str = "cfg";

/// Root of telemetry topics
pub const STATUS_ROOT: &str = "stat";

/// Errors building a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopicError {
    /// Topic would be empty
    Empty,
    /// Topic exceeds [`MAX_TOPIC_LEN`]
    TooLong,
}

/// Copy `text` into a topic
pub fn topic(text: &str) -> Result<Topic, TopicError> {
    if text.is_empty() {
        return Err(TopicError::Empty);
    }
    let mut t = Topic::new();
    t.push_str(text).map_err(|_| TopicError::TooLong)?;
    Ok(t)
}

/// Join non-empty levels with `/`
///
/// Leading and trailing separators on each level are dropped so that
/// `"home/"` and `"home"` produce the same topic.
pub fn join(levels: &[&str]) -> Result<Topic, TopicError> {
    let mut t = Topic::new();
    for level in levels {
        let level = level.trim_matches('/');
        if level.is_empty() {
            continue;
        }
        if !t.is_empty() {
            t.push('/').map_err(|_| TopicError::TooLong)?;
        }
        t.push_str(level).map_err(|_| TopicError::TooLong)?;
    }
    if t.is_empty() {
        return Err(TopicError::Empty);
    }
    Ok(t)
}

/// Configuration topic of a device: `cfg/<device_id>`
pub fn config_topic(device_id: &str) -> Result<Topic, TopicError> {
    join(&[CONFIG_ROOT, device_id])
}

/// Telemetry topic of a device: `stat/<device_id>/<leaf>`
pub fn status_topic(device_id: &str, leaf: &str) -> Result<Topic, TopicError> {
    join(&[STATUS_ROOT, device_id, leaf])
}

/// Function topic: `<prefix>/<functionality>`
pub fn function_topic(prefix: &str, functionality: &str) -> Result<Topic, TopicError> {
    join(&[prefix, functionality])
}

/// MQTT client identifier for a device
pub fn client_id(device_id: &str) -> String<64> {
    let mut id = String::new();
    // 13 + device id (<= 24) always fits
    let _ = write!(id, "wioTerminal-{}", device_id);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled<const N: usize>(ch: char, count: usize) -> String<N> {
        let mut s = String::new();
        for _ in 0..count {
            let _ = s.push(ch);
        }
        s
    }

    #[test]
    fn test_topic_bounds() {
        assert_eq!(topic(""), Err(TopicError::Empty));
        let max: String<64> = filled('a', MAX_TOPIC_LEN);
        assert!(topic(&max).is_ok());
        let mut over: String<64> = String::new();
        let _ = over.push_str(&max);
        let _ = over.push('b');
        assert_eq!(topic(&over), Err(TopicError::TooLong));
    }

    #[test]
    fn test_config_topic() {
        assert_eq!(config_topic("device-1").unwrap().as_str(), "cfg/device-1");
    }

    #[test]
    fn test_status_topic() {
        assert_eq!(
            status_topic("device-1", "rssi").unwrap().as_str(),
            "stat/device-1/rssi"
        );
    }

    #[test]
    fn test_function_topic_trims_separators() {
        assert_eq!(
            function_topic("home/1OG/", "Heizung").unwrap().as_str(),
            "home/1OG/Heizung"
        );
        assert_eq!(
            function_topic("home/1OG", "/Heizung").unwrap().as_str(),
            "home/1OG/Heizung"
        );
    }

    #[test]
    fn test_join_skips_empty_levels() {
        assert_eq!(join(&["", "Heizung"]).unwrap().as_str(), "Heizung");
        assert_eq!(join(&["", "/"]), Err(TopicError::Empty));
    }

    #[test]
    fn test_client_id() {
        assert_eq!(client_id("device-1").as_str(), "wioTerminal-device-1");
    }
}
