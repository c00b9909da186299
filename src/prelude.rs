pub(crate) use log::{debug, info, warn};

pub type Result<T> = std::result::Result<T, crate::Error>;
