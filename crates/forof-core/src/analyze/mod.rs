pub mod for_loop;
pub mod identifier;
