//! Menu navigation and the input events that drive it.

/// One selectable item on the screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug, defmt::Format)]
pub enum Entry {
    Frequency,
    Volume,
}

pub const ENTRY_COUNT: u8 = 2;

impl Entry {
    fn index(self) -> u8 {
        match self {
            Entry::Frequency => 0,
            Entry::Volume => 1,
        }
    }

    fn from_index(index: u8) -> Self {
        match index % ENTRY_COUNT {
            0 => Entry::Frequency,
            _ => Entry::Volume,
        }
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Wraps backward from the first entry to the last.
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + ENTRY_COUNT - 1)
    }
}

/// One directional input sample (joystick edges).
#[derive(Clone, Copy, Default, defmt::Format)]
pub struct DirInput {
    pub up: bool,
    pub down: bool,
}

/// One rotary encoder detent.
#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

pub struct MenuState {
    active: Entry,
}

impl MenuState {
    pub const fn new() -> Self {
        Self {
            active: Entry::Frequency,
        }
    }

    pub fn active(&self) -> Entry {
        self.active
    }

    /// Apply one directional sample; both directions are honored in the same
    /// tick (they cancel out). Returns whether the selection changed.
    pub fn select(&mut self, dir: DirInput) -> bool {
        let before = self.active;
        if dir.up {
            self.active = self.active.next();
        }
        if dir.down {
            self.active = self.active.prev();
        }
        self.active != before
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_cycles_forward_with_wraparound() {
        let mut menu = MenuState::new();
        assert_eq!(menu.active(), Entry::Frequency);
        assert!(menu.select(DirInput { up: true, down: false }));
        assert_eq!(menu.active(), Entry::Volume);
        assert!(menu.select(DirInput { up: true, down: false }));
        assert_eq!(menu.active(), Entry::Frequency);
    }

    #[test]
    fn decreasing_from_the_first_entry_wraps_to_the_last() {
        let mut menu = MenuState::new();
        assert!(menu.select(DirInput { up: false, down: true }));
        assert_eq!(menu.active(), Entry::Volume);
    }

    #[test]
    fn opposing_edges_in_one_tick_cancel_out() {
        let mut menu = MenuState::new();
        assert!(!menu.select(DirInput { up: true, down: true }));
        assert_eq!(menu.active(), Entry::Frequency);
    }

    #[test]
    fn no_input_is_not_a_change() {
        let mut menu = MenuState::new();
        assert!(!menu.select(DirInput::default()));
    }
}
