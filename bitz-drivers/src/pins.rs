//! Pin bank
//!
//! Owns the lines a board hands to the drivers and looks them up by GPIO
//! number, enabling config-driven pin routing. Each pin can be registered
//! once.

use heapless::Vec;

/// Error when registering a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number already registered
    AlreadyTaken(u8),
    /// Bank capacity exhausted
    Full,
}

/// Lines keyed by GPIO number
pub struct PinBank<L, const N: usize> {
    lines: Vec<(u8, L), N>,
}

impl<L, const N: usize> Default for PinBank<L, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, const N: usize> PinBank<L, N> {
    /// Create an empty bank
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Register a line under its GPIO number
    pub fn insert(&mut self, pin: u8, line: L) -> Result<(), PinError> {
        if self.contains(pin) {
            return Err(PinError::AlreadyTaken(pin));
        }
        self.lines.push((pin, line)).map_err(|_| PinError::Full)
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, pin: u8, line: L) -> Result<Self, PinError> {
        self.insert(pin, line)?;
        Ok(self)
    }

    /// Borrow a registered line
    pub fn get_mut(&mut self, pin: u8) -> Option<&mut L> {
        self.lines
            .iter_mut()
            .find(|(p, _)| *p == pin)
            .map(|(_, line)| line)
    }

    /// Borrow a registered line immutably
    pub fn get(&self, pin: u8) -> Option<&L> {
        self.lines
            .iter()
            .find(|(p, _)| *p == pin)
            .map(|(_, line)| line)
    }

    /// Take a line back out of the bank
    pub fn remove(&mut self, pin: u8) -> Option<L> {
        let index = self.lines.iter().position(|(p, _)| *p == pin)?;
        Some(self.lines.swap_remove(index).1)
    }

    /// Check if a pin is registered
    pub fn contains(&self, pin: u8) -> bool {
        self.lines.iter().any(|(p, _)| *p == pin)
    }

    /// Number of registered lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut bank: PinBank<&str, 4> = PinBank::new();

        assert!(bank.insert(1, "trig").is_ok());
        assert!(bank.insert(2, "echo").is_ok());
        assert_eq!(bank.get(1), Some(&"trig"));
        assert_eq!(bank.len(), 2);

        // Can't register same pin twice
        assert_eq!(bank.insert(1, "again"), Err(PinError::AlreadyTaken(1)));
    }

    #[test]
    fn test_capacity() {
        let mut bank: PinBank<u8, 2> = PinBank::new();
        bank.insert(1, 0).unwrap();
        bank.insert(2, 0).unwrap();
        assert_eq!(bank.insert(3, 0), Err(PinError::Full));
    }

    #[test]
    fn test_remove_and_reinsert() {
        let mut bank: PinBank<u8, 4> = PinBank::new().with(11, 7).unwrap();

        *bank.get_mut(11).unwrap() = 9;
        assert_eq!(bank.remove(11), Some(9));
        assert!(!bank.contains(11));
        assert!(bank.is_empty());
        assert!(bank.insert(11, 1).is_ok());
    }
}
