pub mod front_matter;
pub mod project;
pub mod publication;
