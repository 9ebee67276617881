pub mod elective_pools;

pub mod elective_rules;

pub mod me;

pub mod programs;

pub mod subjects;

pub use me::configure_me_routes;
pub use programs::configure_programs_routes;
pub use subjects::configure_subjects_routes;
