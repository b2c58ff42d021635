//! Custom actions for the Production actor.

#[derive(Debug, Clone)]
pub enum ProductionAction {
    /// The run finished; the units are ready to be restocked.
    Complete,
    Cancel,
}
