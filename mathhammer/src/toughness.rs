use std::num::NonZeroU8;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

use serde::Serialize;

pub const TOUGHNESS_COUNT: usize = 6;

/// A defender toughness value from the evaluated sweep.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Toughness(NonZeroU8);

impl Toughness {

    pub const THREE: Toughness = Toughness(NonZeroU8::new(3).unwrap());
    pub const FOUR: Toughness = Toughness(NonZeroU8::new(4).unwrap());
    pub const FIVE: Toughness = Toughness(NonZeroU8::new(5).unwrap());
    pub const SIX: Toughness = Toughness(NonZeroU8::new(6).unwrap());
    pub const SEVEN: Toughness = Toughness(NonZeroU8::new(7).unwrap());
    pub const EIGHT: Toughness = Toughness(NonZeroU8::new(8).unwrap());

    pub const ALL: [Toughness; TOUGHNESS_COUNT] = [
        Toughness::THREE,
        Toughness::FOUR,
        Toughness::FIVE,
        Toughness::SIX,
        Toughness::SEVEN,
        Toughness::EIGHT
    ];

    /// Returns the toughness with the given value if it is part of the sweep.
    pub fn new(value: u8) -> Option<Toughness> {
        Toughness::ALL.into_iter().find(|toughness| toughness.as_u8() == value)
    }

    pub fn as_u8(self) -> u8 {
        self.0.get()
    }

    fn index(self) -> usize {
        (self.0.get() - Toughness::THREE.0.get()) as usize
    }
}

/// Every toughness value the wound and damage stages are evaluated against, in ascending order.
pub const TOUGHNESS_SWEEP: [Toughness; TOUGHNESS_COUNT] = Toughness::ALL;

/// One value per toughness of the sweep.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct ToughnessMap<T>([T; TOUGHNESS_COUNT]);

impl<T> ToughnessMap<T> {

    pub fn from_fn(f: impl FnMut(Toughness) -> T) -> ToughnessMap<T> {
        ToughnessMap(Toughness::ALL.map(f))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Toughness, &T)> {
        Toughness::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ToughnessMap<U> {
        ToughnessMap::from_fn(|toughness| f(&self[toughness]))
    }

    pub fn zip_with<U, V>(
        &self,
        other: &ToughnessMap<U>,
        mut f: impl FnMut(&T, &U) -> V
    ) -> ToughnessMap<V> {
        ToughnessMap::from_fn(|toughness| f(&self[toughness], &other[toughness]))
    }

    pub fn into_array(self) -> [T; TOUGHNESS_COUNT] {
        self.0
    }
}

impl<T: Clone> ToughnessMap<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.0.to_vec()
    }
}

impl<T> From<[T; TOUGHNESS_COUNT]> for ToughnessMap<T> {
    fn from(values: [T; TOUGHNESS_COUNT]) -> ToughnessMap<T> {
        ToughnessMap(values)
    }
}

impl<T> Index<Toughness> for ToughnessMap<T> {
    type Output = T;

    fn index(&self, index: Toughness) -> &T {
        &self.0[index.index()]
    }
}

impl<T> IndexMut<Toughness> for ToughnessMap<T> {
    fn index_mut(&mut self, index: Toughness) -> &mut T {
        &mut self.0[index.index()]
    }
}
