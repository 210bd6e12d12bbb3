//! The population engine.

use crate::config::PopulatorConfig;
use crate::error::{ConfigError, PopulatorError, Result};
use crate::generators::{generate_scalar, random_variant, small_count};
use crate::plan::{build_plans, FieldPlan, FieldStrategy, PlanKind, TypePlan};
use crate::randomizer::Randomizer;
use crate::registry::RandomizerRegistry;
use rand::Rng;
use record_core::{FieldType, TypeSchema, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Configures and builds a [`Populator`].
///
/// # Example
///
/// ```rust
/// use record_core::{FieldDescriptor, FieldType, TypeDescriptor, TypeSchema, Value};
/// use record_generator::{PopulatorBuilder, RandomizerError};
///
/// let schema = TypeSchema::new(vec![TypeDescriptor::record(
///     "Person",
///     vec![FieldDescriptor::new("name", FieldType::text())],
/// )])
/// .unwrap();
///
/// let populator = PopulatorBuilder::new(schema)
///     .register_randomizer("Person", FieldType::text(), "name", || {
///         Ok::<_, RandomizerError>(Value::from("Ada"))
///     })
///     .build()
///     .unwrap();
///
/// let person = populator.populate_bean("Person").unwrap();
/// assert_eq!(person.as_record().unwrap().get("name"), Some(&Value::from("Ada")));
/// ```
#[derive(Debug)]
pub struct PopulatorBuilder {
    schema: TypeSchema,
    registry: RandomizerRegistry,
    max_depth: Option<usize>,
}

impl PopulatorBuilder {
    pub fn new(schema: TypeSchema) -> Self {
        Self {
            schema,
            registry: RandomizerRegistry::new(),
            max_depth: None,
        }
    }

    /// Create a builder from a YAML configuration.
    ///
    /// Builds the schema, compiles every randomizer binding and applies the
    /// configured depth guard.
    pub fn from_config(config: &PopulatorConfig) -> Result<Self> {
        let schema = config.schema()?;
        let mut builder = Self::new(schema);
        builder.max_depth = config.max_depth;

        for (binding, randomizer) in config.build_randomizers()? {
            if let Some(value) = randomizer
                .literal_values()
                .iter()
                .find(|value| !builder.schema.is_assignable(value, &binding.field_type))
            {
                return Err(ConfigError::InvalidBinding {
                    binding: binding.to_string(),
                    source: Box::new(ConfigError::InvalidRandomizer {
                        generator: randomizer.name(),
                        message: format!("{value:?} is not a valid {}", binding.field_type),
                    }),
                }
                .into());
            }
            builder.registry.register(
                binding.owning_type.as_str(),
                binding.field_type.clone(),
                binding.field.as_str(),
                Arc::new(randomizer),
            );
        }

        Ok(builder)
    }

    /// Bind a randomizer to `(owning type, field type, field name)`.
    ///
    /// The owning type is the concrete type being populated, also for
    /// fields it inherits. A later registration for the same triple
    /// replaces an earlier one.
    pub fn register_randomizer(
        mut self,
        owning_type: impl Into<String>,
        field_type: FieldType,
        field_name: impl Into<String>,
        randomizer: impl Randomizer + 'static,
    ) -> Self {
        self.registry
            .register(owning_type, field_type, field_name, Arc::new(randomizer));
        self
    }

    /// Like [`register_randomizer`](Self::register_randomizer) for a shared randomizer.
    pub fn register_shared(
        mut self,
        owning_type: impl Into<String>,
        field_type: FieldType,
        field_name: impl Into<String>,
        randomizer: Arc<dyn Randomizer>,
    ) -> Self {
        self.registry
            .register(owning_type, field_type, field_name, randomizer);
        self
    }

    /// Fail with [`PopulatorError::DepthExceeded`] instead of recursing
    /// deeper than `max_depth` nested types.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Precompute the field plans and produce a ready-to-use populator.
    pub fn build(self) -> Result<Populator> {
        let plan_set = build_plans(&self.schema, &self.registry)?;

        for key in self.registry.keys() {
            if !plan_set.used_bindings.contains(key) {
                warn!("Randomizer bound to {} matches no populated field", key);
            }
        }

        info!(
            "Built populator for {} types with {} custom randomizers",
            plan_set.plans.len(),
            self.registry.len()
        );

        Ok(Populator {
            schema: self.schema,
            plans: plan_set.plans,
            max_depth: self.max_depth,
        })
    }
}

/// Produces fully populated instances of schema types.
///
/// Immutable once built; every method takes `&self` and the populator can be
/// shared across threads.
#[derive(Debug)]
pub struct Populator {
    schema: TypeSchema,
    plans: HashMap<String, TypePlan>,
    max_depth: Option<usize>,
}

impl Populator {
    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Precomputed plan for a type.
    pub fn plan(&self, type_name: &str) -> Option<&TypePlan> {
        self.plans.get(type_name)
    }

    /// Populate one instance of `type_name` using the thread-local RNG.
    ///
    /// Records come back as `Value::Record`, enumerations as `Value::Enum`.
    pub fn populate_bean(&self, type_name: &str) -> Result<Value> {
        self.populate_bean_with(type_name, &mut rand::thread_rng())
    }

    /// Populate one instance of `type_name` drawing from `rng`.
    pub fn populate_bean_with<R: Rng>(&self, type_name: &str, rng: &mut R) -> Result<Value> {
        self.populate(type_name, rng, 0).map_err(|e| {
            error!("Failed to populate '{}': {}", type_name, e);
            e
        })
    }

    /// Populate a randomly sized batch (between 0 and 128 instances).
    pub fn populate_beans(&self, type_name: &str) -> Result<Vec<Value>> {
        self.populate_beans_with(type_name, &mut rand::thread_rng())
    }

    pub fn populate_beans_with<R: Rng>(&self, type_name: &str, rng: &mut R) -> Result<Vec<Value>> {
        let size = small_count(rng);
        self.populate_batch(type_name, size, rng)
    }

    /// Populate exactly `size` independent instances.
    ///
    /// A negative size fails with [`PopulatorError::InvalidSize`]. The first
    /// failing instance fails the whole batch.
    pub fn populate_beans_sized(&self, type_name: &str, size: i64) -> Result<Vec<Value>> {
        self.populate_beans_sized_with(type_name, size, &mut rand::thread_rng())
    }

    pub fn populate_beans_sized_with<R: Rng>(
        &self,
        type_name: &str,
        size: i64,
        rng: &mut R,
    ) -> Result<Vec<Value>> {
        let size = usize::try_from(size).map_err(|_| {
            let e = PopulatorError::InvalidSize(size);
            error!("Failed to populate '{}': {}", type_name, e);
            e
        })?;
        self.populate_batch(type_name, size, rng)
    }

    fn populate_batch<R: Rng>(
        &self,
        type_name: &str,
        size: usize,
        rng: &mut R,
    ) -> Result<Vec<Value>> {
        debug!("Populating {} instances of '{}'", size, type_name);
        (0..size)
            .map(|_| self.populate(type_name, rng, 0))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| {
                error!("Failed to populate '{}': {}", type_name, e);
                e
            })
    }

    fn populate<R: Rng>(&self, type_name: &str, rng: &mut R, depth: usize) -> Result<Value> {
        let plan = self
            .plans
            .get(type_name)
            .ok_or_else(|| PopulatorError::UnknownType(type_name.to_string()))?;

        if let Some(max_depth) = self.max_depth {
            if depth > max_depth {
                return Err(PopulatorError::DepthExceeded {
                    type_name: type_name.to_string(),
                    max_depth,
                });
            }
        }

        match &plan.kind {
            PlanKind::Enum { variants } => random_variant(type_name, variants, rng)
                .ok_or_else(|| PopulatorError::NotInstantiable(type_name.to_string())),
            PlanKind::NotInstantiable => Err(PopulatorError::NotInstantiable(type_name.to_string())),
            PlanKind::Record { fields } => {
                let mut record = self.schema.instantiate(type_name)?;
                for field in fields {
                    let value = self.resolve(type_name, field, rng, depth)?;
                    self.schema
                        .set_field(&mut record, &field.name, value)
                        .map_err(|source| PopulatorError::FieldAssignment {
                            type_name: type_name.to_string(),
                            field: field.name.clone(),
                            source,
                        })?;
                }
                Ok(Value::Record(record))
            }
        }
    }

    fn resolve<R: Rng>(
        &self,
        type_name: &str,
        field: &FieldPlan,
        rng: &mut R,
        depth: usize,
    ) -> Result<Value> {
        match &field.strategy {
            FieldStrategy::Custom(randomizer) => {
                randomizer
                    .random_value()
                    .map_err(|source| PopulatorError::Randomizer {
                        type_name: type_name.to_string(),
                        field: field.name.clone(),
                        source,
                    })
            }
            FieldStrategy::Container(kind) => Ok(Value::empty_container(*kind)),
            FieldStrategy::Scalar(kind) => Ok(generate_scalar(*kind, rng)),
            FieldStrategy::Nested(name) => self.populate(name, rng, depth + 1),
        }
    }
}
