pub mod run_state;
pub mod snapshot;

pub use run_state::{RunState, merge, severity};
pub use snapshot::{
    ApplicationSnapshot, DesiredState, RawInstanceState, aggregate, map_instance_state,
};
