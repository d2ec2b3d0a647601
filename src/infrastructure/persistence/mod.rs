// Local file access
pub mod local_file_picker;
