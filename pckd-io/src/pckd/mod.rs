mod pckd_types;
pub use self::pckd_types::*;

mod pckd_err;
pub use self::pckd_err::*;

mod read_helpers;
pub use self::read_helpers::*;

mod pckd_metadata;
pub use self::pckd_metadata::*;

mod pckd_reader;
pub use self::pckd_reader::*;

#[cfg(test)]
mod test_util;
#[cfg(test)]
pub(crate) use self::test_util::*;
