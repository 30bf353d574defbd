//! Keys: the order every collection sorts by, and a seedable source of random keys.
//!
//! # Examples
//!
//! ```
//! use keytrees::keys::KeyGenerator;
//!
//! let first: Vec<String> = KeyGenerator::seeded(7).take(3).collect();
//! let again: Vec<String> = KeyGenerator::seeded(7).take(3).collect();
//!
//! // The same seed always yields the same keys.
//! assert_eq!(first, again);
//! assert!(first
//!     .iter()
//!     .all(|key| (1..=5).contains(&key.len()) && key.chars().all(|c| c.is_ascii_uppercase())));
//! ```

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{KeySpecError, Violation};

/// The total order over keys: plain lexicographic comparison of the strings' bytes.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Checks that `keys` are in non-decreasing order, reporting the first pair that isn't.
pub fn check_sorted<'a, I>(keys: I) -> Result<(), Violation>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut keys = keys.into_iter();
    let Some(mut previous) = keys.next() else {
        return Ok(());
    };
    for key in keys {
        if compare(previous, key) == Ordering::Greater {
            return Err(Violation::Unsorted {
                before: previous.to_owned(),
                after: key.to_owned(),
            });
        }
        previous = key;
    }
    Ok(())
}

/// Describes the random keys a [`KeyGenerator`] produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySpec {
    alphabet: Vec<char>,
    min_len: usize,
    max_len: usize,
}

impl Default for KeySpec {
    /// Uppercase `A` through `Z`, between one and five characters long.
    fn default() -> Self {
        Self {
            alphabet: ('A'..='Z').collect(),
            min_len: 1,
            max_len: 5,
        }
    }
}

impl KeySpec {
    /// Builds a spec for keys made of characters of `alphabet` with a length in
    /// `min_len..=max_len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytrees::error::KeySpecError;
    /// use keytrees::keys::KeySpec;
    ///
    /// assert!(KeySpec::new("01", 2, 4).is_ok());
    /// assert_eq!(KeySpec::new("", 1, 5), Err(KeySpecError::EmptyAlphabet));
    /// assert_eq!(
    ///     KeySpec::new("AB", 3, 2),
    ///     Err(KeySpecError::InvalidLength { min: 3, max: 2 })
    /// );
    /// ```
    pub fn new(alphabet: &str, min_len: usize, max_len: usize) -> Result<Self, KeySpecError> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(KeySpecError::EmptyAlphabet);
        }
        // Empty keys are never generated.
        if min_len == 0 || min_len > max_len {
            return Err(KeySpecError::InvalidLength {
                min: min_len,
                max: max_len,
            });
        }
        Ok(Self {
            alphabet,
            min_len,
            max_len,
        })
    }

    /// The shortest key this spec allows.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// The longest key this spec allows.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

/// An endless, reproducible stream of random keys. Every collection's `fill_random` draws from
/// one of these rather than from a process-wide generator.
#[derive(Clone, Debug)]
pub struct KeyGenerator {
    spec: KeySpec,
    rng: StdRng,
}

impl KeyGenerator {
    /// A generator of default keys (see [`KeySpec::default`]) seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_spec(KeySpec::default(), seed)
    }

    /// A generator of keys matching `spec` seeded with `seed`.
    pub fn with_spec(spec: KeySpec, seed: u64) -> Self {
        Self {
            spec,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A generator of default keys seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            spec: KeySpec::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// The [`KeySpec`] keys are drawn from.
    pub fn spec(&self) -> &KeySpec {
        &self.spec
    }

    /// Draws a length uniformly from the allowed range, then each character uniformly from the
    /// alphabet.
    pub fn next_key(&mut self) -> String {
        let len = self.rng.gen_range(self.spec.min_len..=self.spec.max_len);
        let alphabet = &self.spec.alphabet;
        let rng = &mut self.rng;
        (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect()
    }
}

impl Iterator for KeyGenerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_key())
    }
}
