use std::collections::BTreeMap;

/// Template variables keyed by name. Ordered so substitution and listing are
/// deterministic.
pub type EnvMap = BTreeMap<String, String>;

mod placeholders;
mod store;

pub use placeholders::substitute;
pub use store::{EnvironmentStore, ENVIRONMENT_FILE};
