pub(crate) mod expenses;
pub(crate) mod history;
pub(crate) mod summary;
