//! Per-type population plans.
//!
//! When a populator is built, every type in the schema is turned into a
//! [`TypePlan`]: enumerations keep their variants, record types get the
//! ordered list of populatable fields, each tagged with the strategy that
//! will produce its value. Strategies are chosen by running the classifiers
//! in [`CLASSIFIERS`] in order; the first one that claims a field wins.

use crate::error::PopulatorError;
use crate::randomizer::Randomizer;
use crate::registry::{RandomizerKey, RandomizerRegistry};
use record_core::{
    ContainerKind, FieldDescriptor, FieldType, ScalarKind, TypeClass, TypeKind, TypeSchema,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// How the value of a single field is produced.
#[derive(Clone)]
pub enum FieldStrategy {
    /// A registered randomizer, output used verbatim
    Custom(Arc<dyn Randomizer>),
    /// An empty container of the declared shape
    Container(ContainerKind),
    /// A random value from the built-in generator
    Scalar(ScalarKind),
    /// Recursive population of the named type
    Nested(String),
}

impl fmt::Debug for FieldStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom"),
            Self::Container(kind) => f.debug_tuple("Container").field(kind).finish(),
            Self::Scalar(kind) => f.debug_tuple("Scalar").field(kind).finish(),
            Self::Nested(name) => f.debug_tuple("Nested").field(name).finish(),
        }
    }
}

/// A populatable field together with its strategy.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    pub name: String,
    pub field_type: FieldType,
    pub strategy: FieldStrategy,
}

/// What population does for one type.
#[derive(Debug, Clone)]
pub enum PlanKind {
    /// Pick one of the variants
    Enum { variants: Vec<String> },
    /// Instantiate, then fill fields in order (own fields first, then ancestors')
    Record { fields: Vec<FieldPlan> },
    /// Record type that cannot be default-constructed
    NotInstantiable,
}

#[derive(Debug, Clone)]
pub struct TypePlan {
    pub type_name: String,
    pub kind: PlanKind,
}

/// Inputs available to a classifier.
pub struct ClassifyContext<'a> {
    /// Concrete type being populated, which owns the field for registry lookup
    pub owning_type: &'a str,
    pub registry: &'a RandomizerRegistry,
}

/// A step in the classification chain.
pub type Classifier = fn(&ClassifyContext<'_>, &FieldDescriptor) -> Option<FieldStrategy>;

/// Classification chain, in precedence order.
pub const CLASSIFIERS: &[Classifier] = &[
    classify_custom,
    classify_container,
    classify_scalar,
    classify_nested,
];

fn classify_custom(ctx: &ClassifyContext<'_>, field: &FieldDescriptor) -> Option<FieldStrategy> {
    ctx.registry
        .lookup(ctx.owning_type, &field.field_type, &field.name)
        .map(|randomizer| FieldStrategy::Custom(Arc::clone(randomizer)))
}

fn classify_container(_: &ClassifyContext<'_>, field: &FieldDescriptor) -> Option<FieldStrategy> {
    field.field_type.container_kind().map(FieldStrategy::Container)
}

fn classify_scalar(_: &ClassifyContext<'_>, field: &FieldDescriptor) -> Option<FieldStrategy> {
    field.field_type.scalar_kind().map(FieldStrategy::Scalar)
}

fn classify_nested(_: &ClassifyContext<'_>, field: &FieldDescriptor) -> Option<FieldStrategy> {
    match field.field_type.classify() {
        TypeClass::Named(name) => Some(FieldStrategy::Nested(name.to_string())),
        _ => None,
    }
}

/// Run the classification chain for one field.
pub fn classify(ctx: &ClassifyContext<'_>, field: &FieldDescriptor) -> Option<FieldStrategy> {
    CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(ctx, field))
}

/// Plans for every type of a schema, plus the registry bindings they use.
#[derive(Debug, Default)]
pub struct PlanSet {
    pub plans: HashMap<String, TypePlan>,
    pub used_bindings: HashSet<RandomizerKey>,
}

/// Compute the plan of every type in the schema.
pub fn build_plans(
    schema: &TypeSchema,
    registry: &RandomizerRegistry,
) -> Result<PlanSet, PopulatorError> {
    let mut set = PlanSet::default();

    for ty in schema.types() {
        let kind = match &ty.kind {
            TypeKind::Enum { variants } => PlanKind::Enum {
                variants: variants.clone(),
            },
            TypeKind::Record { .. } if !ty.instantiable => PlanKind::NotInstantiable,
            TypeKind::Record { .. } => {
                let ctx = ClassifyContext {
                    owning_type: &ty.name,
                    registry,
                };
                let mut fields = Vec::new();
                for field in schema.all_fields(&ty.name)? {
                    if field.is_excluded() {
                        continue;
                    }
                    let strategy = classify(&ctx, field)
                        .ok_or_else(|| PopulatorError::UnknownType(field.field_type.to_string()))?;
                    if matches!(strategy, FieldStrategy::Custom(_)) {
                        set.used_bindings.insert(RandomizerKey::new(
                            ty.name.as_str(),
                            field.field_type.clone(),
                            field.name.as_str(),
                        ));
                    }
                    fields.push(FieldPlan {
                        name: field.name.clone(),
                        field_type: field.field_type.clone(),
                        strategy,
                    });
                }
                debug!("Planned {} fields for type '{}'", fields.len(), ty.name);
                PlanKind::Record { fields }
            }
        };

        set.plans.insert(
            ty.name.clone(),
            TypePlan {
                type_name: ty.name.clone(),
                kind,
            },
        );
    }

    Ok(set)
}
