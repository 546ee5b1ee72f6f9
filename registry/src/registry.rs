use crate::environment::{Category, Environment, DEVELOPMENT, LOCAL, PRODUCTION, STAGING};
use crate::error::{EnvError, EnvResult};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Set of known environments and their classification.
///
/// Every registered environment is *valid*; some are additionally classified
/// as local, development or production. An environment holds at most one
/// category, and registering it under a second one is rejected.
///
/// Registration takes `&mut self` and is meant to happen once at startup;
/// queries only need `&self`.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentRegistry {
    all: HashSet<Environment>,
    categories: HashMap<Environment, Category>,
}

impl EnvironmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register environments as valid without classifying them.
    ///
    /// Blank names are skipped.
    pub fn define_all<I>(&mut self, environments: I)
    where
        I: IntoIterator,
        I::Item: Into<Environment>,
    {
        for env in environments.into_iter().map(Into::into) {
            if env.is_empty() {
                continue;
            }
            debug!(environment = %env, "defined environment");
            self.all.insert(env);
        }
    }

    /// Register environments under `category`.
    ///
    /// Blank names are skipped and re-registering under the same category is
    /// a no-op. If any name already belongs to another category the call
    /// fails with [`EnvError::CategoryConflict`] and the registry is left
    /// exactly as it was.
    pub fn define<I>(&mut self, category: Category, environments: I) -> EnvResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Environment>,
    {
        let pending: Vec<Environment> = environments
            .into_iter()
            .map(Into::into)
            .filter(|env| !env.is_empty())
            .collect();

        for env in &pending {
            if let Some(&existing) = self.categories.get(env) {
                if existing != category {
                    debug!(environment = %env, %existing, requested = %category, "category conflict");
                    return Err(EnvError::CategoryConflict {
                        environment: env.to_string(),
                        requested: category,
                        existing,
                    });
                }
            }
        }

        for env in pending {
            debug!(environment = %env, %category, "defined environment");
            self.all.insert(env.clone());
            self.categories.insert(env, category);
        }
        Ok(())
    }

    pub fn define_local<I>(&mut self, environments: I) -> EnvResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Environment>,
    {
        self.define(Category::Local, environments)
    }

    pub fn define_development<I>(&mut self, environments: I) -> EnvResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Environment>,
    {
        self.define(Category::Development, environments)
    }

    pub fn define_production<I>(&mut self, environments: I) -> EnvResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Environment>,
    {
        self.define(Category::Production, environments)
    }

    /// Register `local`, `development` and `production` under their
    /// namesake categories, plus an unclassified `staging`.
    pub fn define_defaults(&mut self) -> EnvResult<()> {
        self.define_local([LOCAL])?;
        self.define_development([DEVELOPMENT])?;
        self.define_production([PRODUCTION])?;
        self.define_all([STAGING]);
        Ok(())
    }

    pub fn is_valid(&self, env: impl AsRef<str>) -> bool {
        self.all.contains(env.as_ref().trim())
    }

    pub fn category_of(&self, env: impl AsRef<str>) -> Option<Category> {
        self.categories.get(env.as_ref().trim()).copied()
    }

    pub fn is_local(&self, env: impl AsRef<str>) -> bool {
        self.category_of(env) == Some(Category::Local)
    }

    pub fn is_development(&self, env: impl AsRef<str>) -> bool {
        self.category_of(env) == Some(Category::Development)
    }

    pub fn is_production(&self, env: impl AsRef<str>) -> bool {
        self.category_of(env) == Some(Category::Production)
    }

    /// All registered environments, sorted by name.
    pub fn environments(&self) -> Vec<&Environment> {
        let mut envs: Vec<_> = self.all.iter().collect();
        envs.sort();
        envs
    }

    /// Environments classified under `category`, sorted by name.
    pub fn in_category(&self, category: Category) -> Vec<&Environment> {
        let mut envs: Vec<_> = self
            .categories
            .iter()
            .filter(|(_, c)| **c == category)
            .map(|(env, _)| env)
            .collect();
        envs.sort();
        envs
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
