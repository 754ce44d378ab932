//! Anything that can turn selectors into a parameter tree

use std::sync::Arc;

use confres_model::{Configuration, ParameterTree, Selector};

use crate::cache::SelectorCache;
use crate::error::Result;
use crate::resolver;

/// A named configuration that resolves selectors to parameters.
///
/// Reference targets are looked up through this trait, so they may be plain
/// configurations or caches in front of them.
pub trait ParameterSource {
    fn name(&self) -> &str;

    fn resolve_parameters(&self, selectors: &[Selector]) -> Result<ParameterTree>;
}

impl ParameterSource for Configuration {
    fn name(&self) -> &str {
        Configuration::name(self)
    }

    fn resolve_parameters(&self, selectors: &[Selector]) -> Result<ParameterTree> {
        resolver::resolve(self, selectors)
    }
}

impl ParameterSource for SelectorCache {
    fn name(&self) -> &str {
        self.configuration().name()
    }

    fn resolve_parameters(&self, selectors: &[Selector]) -> Result<ParameterTree> {
        self.get(selectors)
    }
}

impl<T: ParameterSource + ?Sized> ParameterSource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve_parameters(&self, selectors: &[Selector]) -> Result<ParameterTree> {
        (**self).resolve_parameters(selectors)
    }
}
