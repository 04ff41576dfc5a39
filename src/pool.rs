//! Type-keyed object reuse cache.
//!
//! The [`Pool`] keeps retired instances on per-type stacks so that emitters can
//! recycle particles instead of allocating a fresh one every spawn. The pool is
//! a cache, not an owner: instances handed out belong to whoever asked for them
//! until they are [`expire`](Pool::expire)d, and must be reset before they are
//! returned (emitters call [`Particle::reset`](crate::Particle::reset)).
//!
//! # Type keys
//!
//! Stacks are keyed by [`TypeId`], so an instance's key travels with its type:
//! `expire(Box<Particle>)` always lands on the `Particle` stack.
//!
//! # Example
//!
//! ```ignore
//! let mut pool = Pool::new();
//! let particle = pool.get::<Particle>();
//! pool.expire(particle);
//! let recycled = pool.get::<Particle>(); // same allocation
//! ```

use crate::error::{ParticleError, Result};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

type Factory = Box<dyn Fn() -> Box<dyn Any + Send> + Send>;

/// Object reuse cache keyed by type identity.
#[derive(Default)]
pub struct Pool {
    /// Free instances per type.
    stacks: HashMap<TypeId, Vec<Box<dyn Any + Send>>>,
    /// Registered constructors for type-erased creation.
    factories: HashMap<TypeId, Factory>,
    /// Monotonic count of `get` calls (diagnostic).
    total: u64,
}

impl Pool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a free `T`, or construct one with `T::default()`.
    pub fn get<T: Default + Any + Send>(&mut self) -> Box<T> {
        self.total += 1;
        self.pop::<T>().unwrap_or_default()
    }

    /// Take a free `T`, or clone one from `prototype`.
    pub fn get_cloned<T: Clone + Any + Send>(&mut self, prototype: &T) -> Box<T> {
        self.total += 1;
        self.pop::<T>()
            .unwrap_or_else(|| Box::new(prototype.clone()))
    }

    /// Register a constructor used by [`get_registered`](Self::get_registered).
    pub fn register<T, F>(&mut self, factory: F)
    where
        T: Any + Send,
        F: Fn() -> T + Send + 'static,
    {
        self.factories.insert(
            TypeId::of::<T>(),
            Box::new(move || Box::new(factory()) as Box<dyn Any + Send>),
        );
    }

    /// Take a free `T`, or build one from its registered constructor.
    ///
    /// Fails when no instance is available and no constructor was registered.
    pub fn get_registered<T: Any + Send>(&mut self) -> Result<Box<T>> {
        self.total += 1;
        if let Some(instance) = self.pop::<T>() {
            return Ok(instance);
        }

        let factory = self
            .factories
            .get(&TypeId::of::<T>())
            .ok_or(ParticleError::PoolUnconstructible(type_name::<T>()))?;

        factory()
            .downcast::<T>()
            .map_err(|_| ParticleError::PoolUnconstructible(type_name::<T>()))
    }

    /// Return an instance to its type's stack.
    pub fn expire<T: Any + Send>(&mut self, instance: Box<T>) {
        self.stacks
            .entry(TypeId::of::<T>())
            .or_default()
            .push(instance);
    }

    /// Stock the pool with `count` fresh instances of `T`.
    pub fn prefill<T: Default + Any + Send>(&mut self, count: usize) {
        let stack = self.stacks.entry(TypeId::of::<T>()).or_default();
        stack.extend((0..count).map(|_| Box::new(T::default()) as Box<dyn Any + Send>));
    }

    /// Number of free instances across all types.
    pub fn count(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }

    /// Number of free instances of `T`.
    pub fn count_of<T: Any>(&self) -> usize {
        self.stacks.get(&TypeId::of::<T>()).map_or(0, Vec::len)
    }

    /// Total number of `get` calls served.
    pub fn total_created(&self) -> u64 {
        self.total
    }

    /// Drop every cached instance.
    pub fn destroy(&mut self) {
        log::debug!("Pool destroyed with {} cached instances", self.count());
        self.stacks.clear();
    }

    fn pop<T: Any + Send>(&mut self) -> Option<Box<T>> {
        let instance = self.stacks.get_mut(&TypeId::of::<T>())?.pop()?;
        // The stack is keyed by T's TypeId, so the downcast cannot fail.
        instance.downcast::<T>().ok()
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("free", &self.count())
            .field("types", &self.stacks.len())
            .field("factories", &self.factories.len())
            .field("total", &self.total)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Clone, Debug, PartialEq)]
    struct Spark {
        heat: f32,
    }

    struct Ember(u32);

    #[test]
    fn test_round_trip_reuses_allocation() {
        let mut pool = Pool::new();
        let before = pool.count();

        let spark = pool.get::<Spark>();
        let address = &*spark as *const Spark;
        pool.expire(spark);
        assert_eq!(pool.count(), before + 1);

        let again = pool.get::<Spark>();
        assert_eq!(&*again as *const Spark, address);
        assert_eq!(pool.count(), before);
    }

    #[test]
    fn test_get_cloned_uses_prototype() {
        let mut pool = Pool::new();
        let spark = pool.get_cloned(&Spark { heat: 3.0 });
        assert_eq!(spark.heat, 3.0);
    }

    #[test]
    fn test_get_registered_requires_factory() {
        let mut pool = Pool::new();
        assert!(matches!(
            pool.get_registered::<Ember>(),
            Err(ParticleError::PoolUnconstructible(_))
        ));

        pool.register(|| Ember(7));
        let ember = pool.get_registered::<Ember>().unwrap();
        assert_eq!(ember.0, 7);
    }

    #[test]
    fn test_counters() {
        let mut pool = Pool::new();
        pool.prefill::<Spark>(4);
        assert_eq!(pool.count_of::<Spark>(), 4);

        let a = pool.get::<Spark>();
        let b = pool.get::<Spark>();
        assert_eq!(pool.total_created(), 2);
        assert_eq!(pool.count(), 2);

        pool.expire(a);
        pool.expire(b);
        pool.destroy();
        assert_eq!(pool.count(), 0);
        assert_eq!(pool.total_created(), 2);
    }

    #[test]
    fn test_types_do_not_mix() {
        let mut pool = Pool::new();
        pool.expire(Box::new(Spark { heat: 1.0 }));
        assert_eq!(pool.count_of::<Ember>(), 0);
        assert_eq!(pool.count_of::<Spark>(), 1);
    }
}
