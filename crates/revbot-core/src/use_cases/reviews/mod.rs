pub(crate) mod utils;

pub use utils::ReviewerChooser;
