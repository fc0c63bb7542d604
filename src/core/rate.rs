//! Rate providers, the registry that owns them, and applying hops to an amount.

use crate::core::currency::CurrencyId;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Result of `convert` when no rate can be produced.
pub const UNAVAILABLE: f64 = 0.0;

/// A live source of a directly quoted exchange rate.
///
/// Returning `0` means the rate is temporarily unavailable. The value must be
/// stable for the duration of a single conversion but may change between them.
pub trait RateProvider: Send + Sync {
    fn rate(&self) -> f64;
}

impl<F> RateProvider for F
where
    F: Fn() -> f64 + Send + Sync,
{
    fn rate(&self) -> f64 {
        self()
    }
}

/// A provider quoting a constant rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRate(pub f64);

impl RateProvider for FixedRate {
    fn rate(&self) -> f64 {
        self.0
    }
}

/// A directly quoted pair: one unit of `from` buys `provider.rate()` units of `to`.
#[derive(Clone)]
pub struct RateEdge {
    pub from: CurrencyId,
    pub to: CurrencyId,
    pub provider: Arc<dyn RateProvider>,
}

impl RateEdge {
    pub fn new(from: CurrencyId, to: CurrencyId, provider: impl RateProvider + 'static) -> Self {
        Self {
            from,
            to,
            provider: Arc::new(provider),
        }
    }

    /// Edge backed by a constant rate.
    pub fn fixed(from: CurrencyId, to: CurrencyId, rate: f64) -> Self {
        Self::new(from, to, FixedRate(rate))
    }
}

impl fmt::Debug for RateEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateEdge")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Position of a provider inside a [`RateRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateHandle(u32);

impl RateHandle {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// How a single hop applies a registered provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// Multiply by the quoted rate.
    Forward(RateHandle),
    /// Divide by the quoted rate.
    Inverse(RateHandle),
}

impl Quote {
    pub fn handle(&self) -> RateHandle {
        match self {
            Quote::Forward(h) | Quote::Inverse(h) => *h,
        }
    }

    /// The same provider applied in the opposite direction.
    pub fn reversed(&self) -> Quote {
        match *self {
            Quote::Forward(h) => Quote::Inverse(h),
            Quote::Inverse(h) => Quote::Forward(h),
        }
    }
}

/// Providers in registration order. Built once per `init`, read-only after.
#[derive(Default, Clone)]
pub struct RateRegistry {
    providers: Vec<Arc<dyn RateProvider>>,
}

impl RateRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            providers: Vec::with_capacity(capacity),
        }
    }

    /// Registers a provider and returns the forward quote for it.
    pub fn register(&mut self, provider: Arc<dyn RateProvider>) -> Quote {
        let handle = RateHandle(self.providers.len() as u32);
        self.providers.push(provider);
        Quote::Forward(handle)
    }

    pub(crate) fn len(&self) -> usize {
        self.providers.len()
    }

    /// Current quoted value behind `quote`, or `None` if the provider is unavailable.
    ///
    /// Zero, negative and non-finite quotes are all treated as unavailable.
    pub fn resolve(&self, quote: Quote) -> Option<f64> {
        let rate = self.providers.get(quote.handle().index())?.rate();
        if !rate.is_finite() || rate <= 0.0 {
            debug!(?quote, rate, "Rate unavailable");
            return None;
        }
        Some(rate)
    }

    /// Carries `amount` across each hop in order, multiplying by forward
    /// quotes and dividing by inverse ones. Stops at the first unavailable rate.
    pub fn apply<I>(&self, amount: f64, quotes: I) -> Option<f64>
    where
        I: IntoIterator<Item = Quote>,
    {
        quotes.into_iter().try_fold(amount, |total, quote| {
            let rate = self.resolve(quote)?;
            Some(match quote {
                Quote::Forward(_) => total * rate,
                Quote::Inverse(_) => total / rate,
            })
        })
    }
}
