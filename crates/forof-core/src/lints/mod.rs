pub(crate) mod prefer_for_of;

pub use prefer_for_of::prefer_for_of::RULE_NAME as PREFER_FOR_OF;
