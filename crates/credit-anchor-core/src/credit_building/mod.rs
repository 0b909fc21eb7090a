pub mod roadmap;
pub mod what_if;
