pub mod gene;
pub mod operators;
pub mod population;
pub mod seeding;
pub mod solution;
pub mod sorting;

pub use gene::Gene;
pub use operators::{crossover, mutate, mutate_random, MutationContext, MutationKind, Selection};
pub use population::Population;
pub use seeding::{random_solution, seed_population};
pub use solution::{ObjectiveScore, Solution, UNRANKED};
pub use sorting::{assign_crowding_distance, non_dominated_sort};
