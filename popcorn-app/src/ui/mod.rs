pub(crate) mod controls;
pub(crate) mod help;
pub(crate) mod info;
