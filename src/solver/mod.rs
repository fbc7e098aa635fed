pub mod dispatch;
pub mod fleet;
pub mod selection;

pub use dispatch::{schedule_deliveries, DispatchScheduler, Schedule, ScheduleSummary};
pub use fleet::FleetClock;
pub use selection::{ExhaustiveSelector, GreedySelector, SelectionPolicy, ShipmentSelector};
