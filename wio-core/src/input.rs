//! Button input events

/// A debounced button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Top key A (rightmost)
    KeyA,
    /// Top key B
    KeyB,
    /// Top key C (leftmost)
    KeyC,
    /// 5-way switch up
    Up,
    /// 5-way switch down
    Down,
    /// 5-way switch left
    Left,
    /// 5-way switch right
    Right,
    /// 5-way switch pressed
    Press,
}

impl ButtonEvent {
    /// All buttons, in scan priority order
    ///
    /// When several buttons read pressed in the same scan, the first one
    /// listed wins.
    pub const PRIORITY: [ButtonEvent; 8] = [
        ButtonEvent::Down,
        ButtonEvent::Up,
        ButtonEvent::Press,
        ButtonEvent::Right,
        ButtonEvent::Left,
        ButtonEvent::KeyA,
        ButtonEvent::KeyB,
        ButtonEvent::KeyC,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ButtonEvent::KeyA => "A",
            ButtonEvent::KeyB => "B",
            ButtonEvent::KeyC => "C",
            ButtonEvent::Up => "Up",
            ButtonEvent::Down => "Down",
            ButtonEvent::Left => "Left",
            ButtonEvent::Right => "Right",
            ButtonEvent::Press => "Press",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_covers_every_button_once() {
        for (i, a) in ButtonEvent::PRIORITY.iter().enumerate() {
            for b in &ButtonEvent::PRIORITY[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(ButtonEvent::PRIORITY[0], ButtonEvent::Down);
    }
}
