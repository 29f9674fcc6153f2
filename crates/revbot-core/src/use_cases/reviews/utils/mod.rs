mod reviewer_chooser;

pub use reviewer_chooser::ReviewerChooser;
