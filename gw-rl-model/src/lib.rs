use std::marker::PhantomData;

use rand::Rng;

pub trait Action: Sized + Copy + Send + Sync {
    const SIZE: usize;

    fn as_u32(&self) -> u32;
    fn from_u32(value: u32) -> Self;

    fn all() -> impl Iterator<Item = Self> {
        (0..Self::SIZE as u32).map(Self::from_u32)
    }
}

pub trait Environment {
    type Action: Action;
    type Observation: Clone;

    fn reset(&mut self) -> Self::Observation;
    fn step<R: Rng + ?Sized>(
        &mut self,
        action: Self::Action,
        rng: &mut R,
    ) -> Step<Self::Observation>;
}

/// The outcome of a single call to [`Environment::step`].
///
/// `state` and `reward` are absent when the environment could not act from its
/// current state, in which case `done` is always set.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<O> {
    pub state: Option<O>,
    pub reward: Option<f64>,
    pub done: bool,
}

impl<O> Step<O> {
    pub fn new(state: O, reward: f64, done: bool) -> Self {
        Step {
            state: Some(state),
            reward: Some(reward),
            done,
        }
    }

    pub fn terminal() -> Self {
        Step {
            state: None,
            reward: None,
            done: true,
        }
    }
}

pub trait Policy<O, A>: Send + Sync {
    fn react<R: Rng + ?Sized>(&self, observation: &O, rng: &mut R) -> A;
}

impl<F, O, A> Policy<O, A> for F
where
    F: Fn(&O) -> A + Send + Sync,
{
    fn react<R: Rng + ?Sized>(&self, observation: &O, _: &mut R) -> A {
        (self)(observation)
    }
}

/// Picks every action with equal probability, ignoring the observation.
pub struct RandomPolicy<A> {
    action: PhantomData<fn() -> A>,
}

impl<A> RandomPolicy<A> {
    pub fn new() -> Self {
        RandomPolicy {
            action: PhantomData,
        }
    }
}

impl<A> Default for RandomPolicy<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, A: Action> Policy<O, A> for RandomPolicy<A> {
    fn react<R: Rng + ?Sized>(&self, _: &O, rng: &mut R) -> A {
        A::from_u32(rng.random_range(0..A::SIZE as u32))
    }
}
