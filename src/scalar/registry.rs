use super::ScalarType;
use hashbrown::HashMap;
use std::{fmt, sync::Arc};

/// A registry of custom scalar types keyed by their names, which a host engine consults when it
/// meets a named type that isn't one of GraphQL's built-in scalars.
#[derive(Clone, Default)]
pub struct ScalarRegistry {
    types: HashMap<String, Arc<dyn ScalarType>>,
}

impl ScalarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scalar under its own name.
    ///
    /// When a scalar with the same name was registered before it's replaced and returned.
    pub fn register<T: ScalarType + 'static>(&mut self, scalar: T) -> Option<Arc<dyn ScalarType>> {
        self.register_shared(Arc::new(scalar))
    }

    /// Register a scalar that's already shared elsewhere under its own name.
    pub fn register_shared(&mut self, scalar: Arc<dyn ScalarType>) -> Option<Arc<dyn ScalarType>> {
        let name = scalar.name().to_string();
        let previous = self.types.insert(name, scalar);
        if let Some(previous) = &previous {
            tracing::debug!(name = previous.name(), "replaced registered scalar type");
        }
        previous
    }

    /// Returns the scalar registered under `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&dyn ScalarType> {
        self.types.get(name).map(|scalar| scalar.as_ref())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the names of all registered scalars in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl fmt::Debug for ScalarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl<T: ScalarType + 'static> FromIterator<T> for ScalarRegistry {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = ScalarRegistry::new();
        for scalar in iter {
            registry.register(scalar);
        }
        registry
    }
}
