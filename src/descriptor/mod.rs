pub(crate) mod inherit;
pub(crate) mod url;
pub(crate) mod value;
