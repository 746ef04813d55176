pub(crate) mod prefer_for_of;
pub(crate) mod scope;
