/// Cooperative cancellation of running solves
pub mod cancellation;
/// Committing a concrete tile to a selected cell
pub mod collapse;
/// Solver attempt/retry loop
pub mod executor;
/// Constraint propagation and contradiction reporting
pub mod propagation;
/// Lowest-entropy cell selection
pub mod selection;
