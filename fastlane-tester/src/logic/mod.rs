pub mod reports;
pub mod rig;
pub mod seeds;
pub mod tester;

pub use rig::LapRig;
pub use seeds::resolve_seed_inputs;
pub use tester::*;
