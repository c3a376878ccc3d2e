pub mod project;
pub mod record;
