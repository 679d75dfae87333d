pub mod crossover;
pub mod mutation;
pub mod selection;

pub use crossover::crossover;
pub use mutation::{mutate, mutate_random, MutationContext, MutationKind};
pub use selection::Selection;
