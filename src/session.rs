pub(crate) mod page_session;
pub(crate) mod script;
