mod slug;

pub use slug::{detail_file_stem, level_file_stem, OVERVIEW_FILE_STEM, SUMMARY_FILE_NAME};
