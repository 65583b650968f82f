mod exiftool_info;
mod media_scanner;
mod path_validator;

pub use exiftool_info::{
    DATE_TIME_ORIGINAL, ExifTool, FileMetadata, MetadataReader, parse_exiftool_output,
};
pub use media_scanner::{extension_matches, scan_media_files};
pub use path_validator::validate_directory_exists;
