//! Currency identifiers and the bounded universe they live in.

use crate::core::error::RouteError;

/// Identifies a currency inside a [`Universe`].
pub type CurrencyId = u32;

/// Default and largest number of currencies a universe can hold.
pub const MAX_CURRENCIES: u32 = 2000;

/// The fixed range `[0, size)` of valid currency identifiers.
///
/// The size is chosen when a graph is constructed and never grows afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Universe {
    size: u32,
}

impl Universe {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub(crate) fn len(&self) -> usize {
        self.size as usize
    }

    /// Fails for universes larger than [`MAX_CURRENCIES`], before any table
    /// sized by them is allocated.
    pub fn check(&self) -> Result<(), RouteError> {
        if self.size > MAX_CURRENCIES {
            return Err(RouteError::UniverseTooLarge {
                size: self.size,
                max: MAX_CURRENCIES,
            });
        }
        Ok(())
    }

    pub fn contains(&self, id: CurrencyId) -> bool {
        id < self.size
    }

    /// Returns `id` as an index, or an error if it lies outside the universe.
    pub fn index(&self, id: CurrencyId) -> Result<usize, RouteError> {
        if self.contains(id) {
            Ok(id as usize)
        } else {
            Err(RouteError::CurrencyOutOfRange {
                id,
                universe: self.size,
            })
        }
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(MAX_CURRENCIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_bounds() {
        let universe = Universe::new(3);
        assert!(universe.contains(0));
        assert!(universe.contains(2));
        assert!(!universe.contains(3));
        assert_eq!(universe.index(2).unwrap(), 2);
        assert_eq!(
            universe.index(3),
            Err(RouteError::CurrencyOutOfRange { id: 3, universe: 3 })
        );
    }

    #[test]
    fn test_default_universe_size() {
        assert_eq!(Universe::default().size(), MAX_CURRENCIES);
        assert_eq!(Universe::default().len(), 2000);
        assert_eq!(Universe::default().check(), Ok(()));
    }

    #[test]
    fn test_oversized_universe_is_rejected() {
        assert_eq!(
            Universe::new(3_000_000_000).check(),
            Err(RouteError::UniverseTooLarge {
                size: 3_000_000_000,
                max: MAX_CURRENCIES
            })
        );
        assert!(Universe::new(MAX_CURRENCIES + 1).check().is_err());
    }
}
