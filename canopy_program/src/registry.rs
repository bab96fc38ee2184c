// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kind-tag program registry.
//!
//! This module provides [`ProgramRegistry`] for registering and looking up
//! draw programs by the kind tag they handle.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// A registry of draw programs keyed by kind tag.
///
/// Programs are registered once at startup, and the registry provides
/// lookup by kind tag as well as iteration in registration order. The
/// registration order is significant: it is the order the engine draws
/// batches in, so later registrations paint over earlier ones.
///
/// The registry is generic over the program trait so the same structure
/// serves node and edge programs:
/// `ProgramRegistry<dyn NodeProgram>`, `ProgramRegistry<dyn EdgeProgram>`.
///
/// # Example
///
/// ```rust
/// use canopy_program::{NodeProgram, ProgramRegistry, RenderParams};
/// use canopy_display::NodeDisplayData;
///
/// struct NullProgram;
///
/// impl NodeProgram for NullProgram {
///     fn allocate(&mut self, _capacity: usize) {}
///     fn process(&mut self, _data: &NodeDisplayData, _hidden: bool, _index: usize) {}
///     fn bind(&mut self) {}
///     fn buffer_data(&mut self) {}
///     fn render(&mut self, _params: &RenderParams) {}
/// }
///
/// let mut registry: ProgramRegistry<dyn NodeProgram> = ProgramRegistry::new();
/// let circle = registry.register("circle", Box::new(NullProgram));
/// let square = registry.register("square", Box::new(NullProgram));
///
/// assert_eq!(circle, 0);
/// assert_eq!(square, 1);
/// assert_eq!(registry.index_of("circle"), Some(0));
/// assert_eq!(registry.kind(1), Some("square"));
/// ```
pub struct ProgramRegistry<P: ?Sized> {
    programs: Vec<(String, Box<P>)>,
    by_kind: HashMap<String, usize>,
}

impl<P: ?Sized> Default for ProgramRegistry<P> {
    fn default() -> Self {
        Self {
            programs: Vec::new(),
            by_kind: HashMap::new(),
        }
    }
}

impl<P: ?Sized> ProgramRegistry<P> {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a program for the given kind tag.
    ///
    /// Returns the program's index, which stays stable for the life of the
    /// registry.
    ///
    /// # Panics
    ///
    /// Panics if a program with the same kind tag is already registered.
    pub fn register(&mut self, kind: impl Into<String>, program: Box<P>) -> usize {
        let kind = kind.into();
        assert!(
            !self.by_kind.contains_key(&kind),
            "Program for kind '{kind}' is already registered"
        );

        let index = self.programs.len();
        self.by_kind.insert(kind.clone(), index);
        self.programs.push((kind, program));
        index
    }

    /// Returns the number of registered programs.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Returns `true` if no programs are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Looks up a program's index by kind tag.
    #[must_use]
    pub fn index_of(&self, kind: &str) -> Option<usize> {
        self.by_kind.get(kind).copied()
    }

    /// Returns whether a program is registered for the given kind tag.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.by_kind.contains_key(kind)
    }

    /// Returns the kind tag at the given index.
    #[must_use]
    pub fn kind(&self, index: usize) -> Option<&str> {
        self.programs.get(index).map(|(kind, _)| kind.as_str())
    }

    /// Returns the program at the given index.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut P> {
        self.programs.get_mut(index).map(|(_, program)| &mut **program)
    }

    /// Returns an iterator over all programs in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut P> {
        self.programs.iter_mut().map(|(_, program)| &mut **program)
    }

    /// Returns an iterator over all kind tags in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.programs.iter().map(|(kind, _)| kind.as_str())
    }
}

impl<P: ?Sized> core::fmt::Debug for ProgramRegistry<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgramRegistry")
            .field("count", &self.programs.len())
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}
